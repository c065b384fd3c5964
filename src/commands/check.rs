use clap::Args;

use podroll::check::{self, TagCheckResult};
use podroll::CommandRunner;

use super::CmdResult;

#[derive(Args)]
pub struct CheckArgs {
    /// Full image name without tag, e.g. 'docker.io/library/alpine'
    pub image: String,

    /// Report whether this tag is published
    #[arg(long)]
    pub tag: Option<String>,
}

pub fn run(args: CheckArgs, global: &crate::commands::GlobalArgs) -> CmdResult<TagCheckResult> {
    let toolchain = global.toolchain()?;
    let runner = CommandRunner::new(&super::SYSTEM);

    let result = check::run(&runner, &toolchain, &args.image, args.tag.as_deref())?;
    Ok((result, 0))
}
