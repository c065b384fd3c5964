use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{check, rollout, run};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "podroll")]
#[command(version = VERSION)]
#[command(about = "Promote container images between tags and roll them out")]
struct Cli {
    /// JSON file naming the registry, image and orchestrator programs
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a CI-built image under a label and roll a deployment onto it
    ///
    /// 1. Check that the image was built in this CI run (if not, do nothing)
    /// 2. Pull it and tag it with the label (e.g. 'test')
    /// 3. Push the label to the registry
    /// 4. Point the deployment's container at the image
    #[command(visible_alias = "rollup")]
    Rollout(rollout::RolloutArgs),
    /// Run an image by tag, falling back to a backup tag if it isn't published
    Run(run::RunArgs),
    /// List an image's published tags
    Check(check::CheckArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs { config: cli.config };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
