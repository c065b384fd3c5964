use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::io;

fn default_registry_tool() -> String {
    "skopeo".to_string()
}

fn default_image_tool() -> String {
    "podman".to_string()
}

fn default_orchestrator() -> String {
    "kubectl".to_string()
}

fn default_record_rollout() -> bool {
    true
}

/// Programs that play the registry, image and orchestrator roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolchain {
    /// Must support `list-tags docker://<image>` with a JSON `Tags` array on stdout.
    #[serde(default = "default_registry_tool")]
    pub registry_tool: String,
    /// Must support `pull`, `tag`, `push` and `run`.
    #[serde(default = "default_image_tool")]
    pub image_tool: String,
    /// Must support `set image <deployment> <container>=<ref>`.
    #[serde(default = "default_orchestrator")]
    pub orchestrator: String,
    /// Append `--record` to the orchestrator update.
    #[serde(default = "default_record_rollout")]
    pub record_rollout: bool,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            registry_tool: default_registry_tool(),
            image_tool: default_image_tool(),
            orchestrator: default_orchestrator(),
            record_rollout: default_record_rollout(),
        }
    }
}

impl Toolchain {
    /// Load from an optional JSON file; `None` yields the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        let raw = io::read_file(Path::new(&expanded), "read toolchain config")?;
        Self::from_json(&raw, &expanded)
    }

    pub fn from_json(raw: &str, source: &str) -> Result<Self> {
        let toolchain: Toolchain =
            serde_json::from_str(raw).map_err(|e| Error::config_invalid_json(source, e))?;
        toolchain.validate()?;
        Ok(toolchain)
    }

    fn validate(&self) -> Result<()> {
        let programs = [
            ("registryTool", &self.registry_tool),
            ("imageTool", &self.image_tool),
            ("orchestrator", &self.orchestrator),
        ];

        for (key, program) in programs {
            if program.trim().is_empty() {
                return Err(Error::config_invalid_value(
                    key,
                    Some(program.clone()),
                    "program name must not be empty",
                ));
            }
        }

        Ok(())
    }
}
