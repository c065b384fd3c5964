mod common;

use common::ScriptedExecutor;
use podroll::check;
use podroll::registry;
use podroll::{CommandRunner, ErrorCode, Toolchain};

const ALPINE: &str = "docker.io/library/alpine";

#[test]
fn tag_exists_matches_listing() {
    let present = ScriptedExecutor::new().with_tags(r#"{"Tags": ["test", "1.0"]}"#);
    let absent = ScriptedExecutor::new().with_tags(r#"{"Tags": ["1.0"]}"#);
    let toolchain = Toolchain::default();

    assert!(registry::tag_exists(
        &CommandRunner::new(&present),
        &toolchain,
        ALPINE,
        "test"
    )
    .unwrap());
    assert!(!registry::tag_exists(
        &CommandRunner::new(&absent),
        &toolchain,
        ALPINE,
        "test"
    )
    .unwrap());
}

#[test]
fn check_lists_sorted_tags_and_reports_found() {
    let exec = ScriptedExecutor::new().with_tags(
        r#"{"Repository": "docker.io/library/alpine", "Tags": ["latest", "3.19", "3.18"]}"#,
    );
    let runner = CommandRunner::new(&exec);

    let result = check::run(&runner, &Toolchain::default(), ALPINE, Some("edge")).unwrap();

    assert_eq!(result.tags, vec!["3.18", "3.19", "latest"]);
    assert_eq!(result.found, Some(false));
}

#[test]
fn check_without_tag_omits_found() {
    let exec = ScriptedExecutor::new().with_tags(r#"{"Tags": []}"#);
    let runner = CommandRunner::new(&exec);

    let result = check::run(&runner, &Toolchain::default(), ALPINE, None).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert!(json.get("found").is_none());
    assert_eq!(json["tags"], serde_json::json!([]));
}

#[test]
fn check_rejects_blank_image() {
    let exec = ScriptedExecutor::new();
    let runner = CommandRunner::new(&exec);

    let err = check::run(&runner, &Toolchain::default(), "  ", None).unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    assert!(exec.calls.borrow().is_empty());
}
