//! Run an image by its primary tag, falling back to a backup tag.
//!
//! Only the primary tag is checked against the registry; the backup is
//! assumed to exist.

use serde::Serialize;

use crate::config::Toolchain;
use crate::error::Result;
use crate::executor::{CommandRunner, ExecutionMode, StepRecord, StepStatus};
use crate::image::ImageRef;
use crate::registry;
use crate::utils::shell;

#[derive(Debug, Clone)]
pub struct FallbackRequest {
    pub image: String,
    pub tag: String,
    pub tag_backup: String,
    pub run_options: Vec<String>,
    pub mode: ExecutionMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct FallbackResult {
    pub selected_image: String,
    pub used_backup: bool,
    pub dry_run: bool,
    pub steps: Vec<StepRecord>,
}

pub fn run(
    runner: &CommandRunner,
    toolchain: &Toolchain,
    request: &FallbackRequest,
) -> Result<FallbackResult> {
    let primary = ImageRef::with_field(&request.image, &request.tag, "tag")?;
    let backup = primary.retag(&request.tag_backup, "tag_backup")?;

    let mut steps = Vec::new();
    let found = registry::tag_exists(runner, toolchain, &primary.name, &primary.tag)?;
    steps.push(StepRecord {
        name: "list-tags".to_string(),
        command: shell::quote_args(&registry::list_tags_argv(toolchain, &primary.name)),
        status: StepStatus::Executed,
    });

    let (selected, used_backup) = if found {
        (primary, false)
    } else {
        (backup, true)
    };

    log_status!("run", "run {}", selected);
    steps.push(runner.step(
        "run",
        &run_argv(toolchain, &request.run_options, &selected),
        request.mode,
    )?);

    Ok(FallbackResult {
        selected_image: selected.to_string(),
        used_backup,
        dry_run: request.mode.is_dry_run(),
        steps,
    })
}

fn run_argv(toolchain: &Toolchain, options: &[String], image: &ImageRef) -> Vec<String> {
    let mut argv = Vec::with_capacity(options.len() + 3);
    argv.push(toolchain.image_tool.clone());
    argv.push("run".to_string());
    argv.extend(options.iter().cloned());
    argv.push(image.to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_sit_between_run_and_image() {
        let image = ImageRef::new("docker.io/couchbase", "test").unwrap();
        let options = shell::split_options("-p 8091-8094:8091-8094 -p 11210:11210");

        let argv = run_argv(&Toolchain::default(), &options, &image);

        assert_eq!(
            argv,
            vec![
                "podman",
                "run",
                "-p",
                "8091-8094:8091-8094",
                "-p",
                "11210:11210",
                "docker.io/couchbase:test"
            ]
        );
    }

    #[test]
    fn no_options() {
        let image = ImageRef::new("docker.io/couchbase", "test").unwrap();
        let argv = run_argv(&Toolchain::default(), &[], &image);
        assert_eq!(argv, vec!["podman", "run", "docker.io/couchbase:test"]);
    }
}
