//! Shell quoting for human-readable command traces.
//!
//! Commands are never run through a shell; quoting here only makes
//! dry-run traces and failure diagnostics copy/paste-able.

// Characters that require quoting
const SHELL_META: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}', '<',
    '>', '|', '&', ';', '#', '~',
];

/// Quote a single argument for display.
/// - Empty strings become `''`
/// - Strings with shell metacharacters are wrapped in single quotes
/// - Embedded single quotes become `'\''`
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    if !arg.contains(SHELL_META) {
        return arg.to_string();
    }

    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Quote and join an argv for display.
pub fn quote_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote_arg(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a space-separated option string (e.g. `podman run` flags) into argv entries.
///
/// Runs of whitespace collapse, so `"-p 80:80  --rm"` never yields empty arguments.
pub fn split_options(options: &str) -> Vec<String> {
    options.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_arg_leaves_plain_words() {
        assert_eq!(quote_arg("podman"), "podman");
        assert_eq!(quote_arg("docker://ghcr.io/acme/web"), "docker://ghcr.io/acme/web");
        assert_eq!(quote_arg("web=registry.local/app:abc123"), "web=registry.local/app:abc123");
    }

    #[test]
    fn quote_arg_wraps_spaces_and_quotes() {
        assert_eq!(quote_arg("hello world"), "'hello world'");
        assert_eq!(quote_arg("it's"), "'it'\\''s'");
        assert_eq!(quote_arg(""), "''");
    }

    #[test]
    fn quote_args_joins_with_spaces() {
        let argv = vec!["podman", "run", "-e", "GREETING=hi there", "alpine:3"];
        assert_eq!(quote_args(&argv), "podman run -e 'GREETING=hi there' alpine:3");
    }

    #[test]
    fn split_options_drops_empty_segments() {
        assert_eq!(
            split_options(" -p 8091-8094:8091-8094  -p 11210:11210 "),
            vec!["-p", "8091-8094:8091-8094", "-p", "11210:11210"]
        );
        assert!(split_options("").is_empty());
        assert!(split_options("   ").is_empty());
    }
}
