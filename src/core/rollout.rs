//! Promote a CI-built image to a label and roll a deployment onto it.
//!
//! Order: registry check, pull, tag, push, set image. The check, pull and tag
//! always run; push and set image follow the execution mode.

use serde::Serialize;

use crate::config::Toolchain;
use crate::error::Result;
use crate::executor::{CommandRunner, ExecutionMode, StepRecord, StepStatus};
use crate::image::ImageRef;
use crate::registry;
use crate::utils::{shell, validation};

#[derive(Debug, Clone)]
pub struct RolloutRequest {
    pub image: String,
    pub process_tag: String,
    pub label: String,
    pub deployment: String,
    pub container_name: String,
    pub mode: ExecutionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutStatus {
    /// Label pushed and deployment updated (or planned, in a dry run).
    Promoted,
    /// The process-tagged image is not in the registry; nothing to do.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolloutResult {
    pub status: RolloutStatus,
    pub process_image: String,
    pub target_image: String,
    pub deployment: String,
    pub container_name: String,
    pub dry_run: bool,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

pub fn run(
    runner: &CommandRunner,
    toolchain: &Toolchain,
    request: &RolloutRequest,
) -> Result<RolloutResult> {
    let process_image = ImageRef::with_field(&request.image, &request.process_tag, "process_tag")?;
    let target_image = process_image.retag(&request.label, "label")?;
    let deployment = validation::require_non_empty(
        &request.deployment,
        "deployment",
        "Deployment name is required",
    )?;
    let container_name = validation::require_non_empty(
        &request.container_name,
        "container_name",
        "Container name is required",
    )?;

    let mut result = RolloutResult {
        status: RolloutStatus::Skipped,
        process_image: process_image.to_string(),
        target_image: target_image.to_string(),
        deployment: deployment.to_string(),
        container_name: container_name.to_string(),
        dry_run: request.mode.is_dry_run(),
        steps: Vec::new(),
        notes: Vec::new(),
    };

    let found = registry::tag_exists(runner, toolchain, &process_image.name, &process_image.tag)?;
    result.steps.push(StepRecord {
        name: "list-tags".to_string(),
        command: shell::quote_args(&registry::list_tags_argv(toolchain, &process_image.name)),
        status: StepStatus::Executed,
    });

    if !found {
        result.notes.push(format!(
            "{} is not in the registry, nothing to roll out",
            process_image
        ));
        return Ok(result);
    }

    log_status!("rollout", "pull image and add tag {}", target_image.tag);
    let pull = vec![
        toolchain.image_tool.clone(),
        "pull".to_string(),
        process_image.to_string(),
    ];
    result.steps.push(runner.step("pull", &pull, ExecutionMode::Live)?);

    let tag = vec![
        toolchain.image_tool.clone(),
        "tag".to_string(),
        process_image.to_string(),
        target_image.to_string(),
    ];
    result.steps.push(runner.step("tag", &tag, ExecutionMode::Live)?);

    log_status!("rollout", "push {}", target_image);
    let push = vec![
        toolchain.image_tool.clone(),
        "push".to_string(),
        target_image.to_string(),
    ];
    result.steps.push(runner.step("push", &push, request.mode)?);

    log_status!("rollout", "start rolling update of {}", deployment);
    result.steps.push(runner.step(
        "set-image",
        &set_image_argv(toolchain, deployment, container_name, &process_image),
        request.mode,
    )?);

    result.status = RolloutStatus::Promoted;
    if request.mode.is_dry_run() {
        result.notes.push("dry-run mode, check local images".to_string());
    }

    Ok(result)
}

fn set_image_argv(
    toolchain: &Toolchain,
    deployment: &str,
    container_name: &str,
    image: &ImageRef,
) -> Vec<String> {
    let mut argv = vec![
        toolchain.orchestrator.clone(),
        "set".to_string(),
        "image".to_string(),
        deployment.to_string(),
        format!("{}={}", container_name, image),
    ];
    if toolchain.record_rollout {
        argv.push("--record".to_string());
    }
    argv
}
