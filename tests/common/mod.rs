#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use podroll::{CommandExecutor, ProcessOutput};

/// Fake executor: answers by `program subcommand`, records every argv.
///
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: HashMap<String, ProcessOutput>,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(self, tags_json: &str) -> Self {
        self.respond(
            "skopeo list-tags",
            ProcessOutput {
                stdout: tags_json.as_bytes().to_vec(),
                ..ProcessOutput::default()
            },
        )
    }

    pub fn failing(self, key: &str, exit_code: i32, stderr: &str) -> Self {
        self.respond(
            key,
            ProcessOutput {
                stderr: stderr.as_bytes().to_vec(),
                exit_code,
                ..ProcessOutput::default()
            },
        )
    }

    pub fn respond(mut self, key: &str, output: ProcessOutput) -> Self {
        self.responses.insert(key.to_string(), output);
        self
    }

    /// Recorded calls rendered as single strings, for readable assertions.
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|argv| argv.join(" ")).collect()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[String]) -> ProcessOutput {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().cloned());
        self.calls.borrow_mut().push(argv);

        let key = match args.first() {
            Some(sub) => format!("{} {}", program, sub),
            None => program.to_string(),
        };
        self.responses.get(&key).cloned().unwrap_or_default()
    }
}
