use clap::Args;

use podroll::fallback::{self, FallbackRequest, FallbackResult};
use podroll::shell::split_options;
use podroll::{CommandExecutor, CommandRunner, ExecutionMode, Toolchain};

use super::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Full image name without tag, e.g. 'docker.io/library/alpine'
    pub image: String,

    /// Options for the image tool's `run` (quote them), e.g. "-p 8091:8091 -p 11210:11210"
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    pub run_options: String,

    /// Main tag of the image, e.g. 'test' or 'abcd'
    #[arg(long)]
    pub tag: String,

    /// Tag to run when the main tag is not in the registry
    #[arg(long)]
    pub tag_backup: String,

    /// Resolve the tag but don't run the image
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: RunArgs, global: &crate::commands::GlobalArgs) -> CmdResult<FallbackResult> {
    let toolchain = global.toolchain()?;
    execute(args, &toolchain, &super::SYSTEM)
}

fn execute(
    args: RunArgs,
    toolchain: &Toolchain,
    executor: &dyn CommandExecutor,
) -> CmdResult<FallbackResult> {
    let request = FallbackRequest {
        image: args.image,
        tag: args.tag,
        tag_backup: args.tag_backup,
        run_options: split_options(&args.run_options),
        mode: ExecutionMode::from_dry_run(args.dry_run),
    };

    let runner = CommandRunner::new(executor);
    let result = fallback::run(&runner, toolchain, &request)?;
    Ok((result, 0))
}
