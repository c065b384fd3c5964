// Command execution with a fail-fast policy.
//
// Every external tool (registry listing, image tool, orchestrator) goes through
// `CommandRunner`. A non-zero exit becomes `ErrorCode::CommandStepFailed`, which
// callers propagate with `?` so the first failed step ends the flow.

use std::process::Command;

use serde::Serialize;

use crate::error::{Error, Result, StepFailedDetails};
use crate::utils::shell;

/// Whether state-changing commands actually run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Live,
    DryRun,
}

impl ExecutionMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            ExecutionMode::DryRun
        } else {
            ExecutionMode::Live
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == ExecutionMode::DryRun
    }
}

/// Raw result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `-1` when the process could not be started or had no exit code (signal).
    pub exit_code: i32,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a program to completion. Implementations block until the process exits.
pub trait CommandExecutor {
    fn run(&self, program: &str, args: &[String]) -> ProcessOutput;
}

/// Executes programs directly (no shell) via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn run(&self, program: &str, args: &[String]) -> ProcessOutput {
        match Command::new(program).args(args).output() {
            Ok(out) => ProcessOutput {
                stdout: out.stdout,
                stderr: out.stderr,
                exit_code: out.status.code().unwrap_or(-1),
            },
            Err(e) => ProcessOutput {
                stdout: Vec::new(),
                stderr: format!("Command error: {}", e).into_bytes(),
                exit_code: -1,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Executed,
    Planned,
}

/// One external invocation issued by a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub command: String,
    pub status: StepStatus,
}

pub struct CommandRunner<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> CommandRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Run `argv` and return its stdout bytes unmodified.
    ///
    /// In dry-run mode nothing is invoked; the would-be command is traced and
    /// the returned output is empty.
    pub fn execute(&self, argv: &[String], mode: ExecutionMode) -> Result<Vec<u8>> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::validation_missing_argument(vec!["argv".to_string()]))?;

        if mode.is_dry_run() {
            log_status!("dry-run", "{}", shell::quote_args(argv));
            return Ok(Vec::new());
        }

        let output = self.executor.run(program, args);
        if !output.success() {
            return Err(Error::step_failed(StepFailedDetails {
                command: shell::quote_args(argv),
                args: argv.to_vec(),
                exit_code: output.exit_code,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }));
        }

        Ok(output.stdout)
    }

    /// Run a command for its side effects and describe what happened.
    pub fn step(&self, name: &str, argv: &[String], mode: ExecutionMode) -> Result<StepRecord> {
        self.execute(argv, mode)?;

        Ok(StepRecord {
            name: name.to_string(),
            command: shell::quote_args(argv),
            status: if mode.is_dry_run() {
                StepStatus::Planned
            } else {
                StepStatus::Executed
            },
        })
    }
}
