//! Registry tag lookups through the registry listing tool.
//!
//! Listings always run live: verifying what exists is read-only, so a dry run
//! must see the real registry state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::Toolchain;
use crate::error::{Error, Result};
use crate::executor::{CommandRunner, ExecutionMode};

/// The `list-tags` document. Unknown fields are ignored; `Tags` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagListing {
    #[serde(rename = "Repository", default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(rename = "Tags")]
    pub tags: BTreeSet<String>,
}

impl TagListing {
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

pub fn parse_listing(image: &str, output: &[u8]) -> Result<TagListing> {
    serde_json::from_slice(output).map_err(|e| Error::registry_invalid_output(image, e, output))
}

pub fn list_tags_argv(toolchain: &Toolchain, image: &str) -> Vec<String> {
    vec![
        toolchain.registry_tool.clone(),
        "list-tags".to_string(),
        format!("docker://{}", image),
    ]
}

/// Fetch every tag the registry knows for `image`.
pub fn list_tags(runner: &CommandRunner, toolchain: &Toolchain, image: &str) -> Result<TagListing> {
    let output = runner.execute(&list_tags_argv(toolchain, image), ExecutionMode::Live)?;
    parse_listing(image, &output)
}

/// True iff `tag` is currently published for `image`.
pub fn tag_exists(
    runner: &CommandRunner,
    toolchain: &Toolchain,
    image: &str,
    tag: &str,
) -> Result<bool> {
    log_status!("registry", "search {}:{} in central repository", image, tag);

    let listing = list_tags(runner, toolchain, image)?;
    if listing.contains(tag) {
        log_status!("registry", "ok");
        Ok(true)
    } else {
        log_status!("registry", "image is not found");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::executor::{CommandExecutor, ProcessOutput};
    use std::cell::RefCell;

    struct ListingStub {
        stdout: &'static str,
        calls: RefCell<Vec<String>>,
    }

    impl ListingStub {
        fn new(stdout: &'static str) -> Self {
            Self {
                stdout,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandExecutor for ListingStub {
        fn run(&self, program: &str, args: &[String]) -> ProcessOutput {
            self.calls
                .borrow_mut()
                .push(format!("{} {}", program, args.join(" ")));
            ProcessOutput {
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                exit_code: 0,
            }
        }
    }

    #[test]
    fn tag_present_in_listing() {
        let stub = ListingStub::new(r#"{"Tags": ["test", "1.0"]}"#);
        let runner = CommandRunner::new(&stub);

        let found = tag_exists(&runner, &Toolchain::default(), "docker.io/library/alpine", "test")
            .unwrap();

        assert!(found);
        assert_eq!(
            stub.calls.borrow().as_slice(),
            &["skopeo list-tags docker://docker.io/library/alpine".to_string()]
        );
    }

    #[test]
    fn tag_absent_from_listing() {
        let stub = ListingStub::new(r#"{"Tags": ["1.0"]}"#);
        let runner = CommandRunner::new(&stub);

        let found = tag_exists(&runner, &Toolchain::default(), "docker.io/library/alpine", "test")
            .unwrap();

        assert!(!found);
    }

    #[test]
    fn full_skopeo_document_parses() {
        let listing = parse_listing(
            "docker.io/library/alpine",
            br#"{"Repository": "docker.io/library/alpine", "Tags": ["3.18", "3.19", "latest"]}"#,
        )
        .unwrap();

        assert_eq!(listing.repository.as_deref(), Some("docker.io/library/alpine"));
        assert!(listing.contains("latest"));
        assert!(!listing.contains("edge"));
    }

    #[test]
    fn missing_tags_field_is_invalid_output() {
        let err =
            parse_listing("docker.io/app", br#"{"Repository": "docker.io/app"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::RegistryInvalidOutput);
        assert_eq!(err.details["image"], "docker.io/app");
    }

    #[test]
    fn non_json_is_invalid_output() {
        let err = parse_listing("docker.io/app", b"FATA[0000] unauthorized").unwrap_err();
        assert_eq!(err.code, ErrorCode::RegistryInvalidOutput);
        assert_eq!(err.details["output"], "FATA[0000] unauthorized");
    }

    #[test]
    fn tags_of_wrong_type_is_invalid_output() {
        let err = parse_listing("docker.io/app", br#"{"Tags": "1.0"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::RegistryInvalidOutput);
    }

    #[test]
    fn configured_registry_tool_is_used() {
        let toolchain = Toolchain {
            registry_tool: "/usr/local/bin/skopeo".to_string(),
            ..Toolchain::default()
        };
        let argv = list_tags_argv(&toolchain, "ghcr.io/acme/web");
        assert_eq!(argv, vec!["/usr/local/bin/skopeo", "list-tags", "docker://ghcr.io/acme/web"]);
    }
}
