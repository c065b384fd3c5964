use podroll::{SystemExecutor, Toolchain};

pub type CmdResult<T> = podroll::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Path to a JSON toolchain file (`--config`)
    pub config: Option<String>,
}

impl GlobalArgs {
    pub fn toolchain(&self) -> podroll::Result<Toolchain> {
        Toolchain::load(self.config.as_deref())
    }
}

/// The executor used outside of tests.
pub(crate) static SYSTEM: SystemExecutor = SystemExecutor;

pub mod check;
pub mod rollout;
pub mod run;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (podroll::Result<serde_json::Value>, i32) {
    crate::tty::status("podroll is working...");

    match command {
        crate::Commands::Rollout(args) => dispatch!(args, global, rollout),
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Check(args) => dispatch!(args, global, check),
    }
}
