use clap::Args;

use podroll::rollout::{self, RolloutRequest, RolloutResult};
use podroll::{CommandExecutor, CommandRunner, ExecutionMode, Toolchain};

use super::CmdResult;

#[derive(Args)]
pub struct RolloutArgs {
    /// Full image name without tag, e.g. 'docker.io/library/alpine'
    pub image: String,

    /// Tag produced by this CI run (e.g. the commit hash)
    #[arg(long)]
    pub process_tag: String,

    /// Tag to publish the image under, e.g. 'test' or '1.2.3'
    #[arg(long)]
    pub label: String,

    /// Deployment to update
    #[arg(long)]
    pub deployment: String,

    /// Container name in the pod
    #[arg(long)]
    pub container_name: String,

    /// Check the registry and pull/tag locally, but don't push or update the deployment
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: RolloutArgs, global: &crate::commands::GlobalArgs) -> CmdResult<RolloutResult> {
    let toolchain = global.toolchain()?;
    execute(args, &toolchain, &super::SYSTEM)
}

fn execute(
    args: RolloutArgs,
    toolchain: &Toolchain,
    executor: &dyn CommandExecutor,
) -> CmdResult<RolloutResult> {
    let request = RolloutRequest {
        image: args.image,
        process_tag: args.process_tag,
        label: args.label,
        deployment: args.deployment,
        container_name: args.container_name,
        mode: ExecutionMode::from_dry_run(args.dry_run),
    };

    let runner = CommandRunner::new(executor);
    let result = rollout::run(&runner, toolchain, &request)?;

    // A missing process image is "nothing to do", not a failure.
    Ok((result, 0))
}
