//! End-to-end tests for the depscope CLI
//!
//! These tests verify:
//! - Pure subcommands (classify, compare) and their JSON output
//! - Argument validation and exit codes
//!
//! Everything here runs without network access.

use assert_cmd::Command;
use predicates::prelude::*;

fn depscope() -> Command {
    Command::cargo_bin("depscope").expect("binary builds")
}

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = depscope().args(args).output().expect("command runs");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is valid JSON")
}

mod classify {
    use super::*;

    #[test]
    fn test_classify_stable_release() {
        depscope()
            .args(["classify", "2.17.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("stable"));
    }

    #[test]
    fn test_classify_release_candidate() {
        depscope()
            .args(["classify", "2.17.0-RC1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("rc"));
    }

    #[test]
    fn test_classify_json_schema() {
        let parsed = json_stdout(&["classify", "1.0.0-alpha.2", "--json"]);
        assert_eq!(parsed["version"], "1.0.0-alpha.2");
        assert_eq!(parsed["type"], "alpha");
        assert_eq!(parsed["is_stable"], false);
    }

    #[test]
    fn test_classify_vendor_tag_is_stable() {
        let parsed = json_stdout(&["classify", "2.8.9-jre8", "--json"]);
        assert_eq!(parsed["type"], "stable");
        assert_eq!(parsed["is_stable"], true);
    }
}

mod compare {
    use super::*;

    #[test]
    fn test_compare_minor_update() {
        depscope()
            .args(["compare", "1.2.3", "1.3.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("minor"));
    }

    #[test]
    fn test_compare_json_schema() {
        let parsed = json_stdout(&["compare", "1.2.3", "2.0.0", "--json"]);
        assert_eq!(parsed["current"], "1.2.3");
        assert_eq!(parsed["latest"], "2.0.0");
        assert_eq!(parsed["update_type"], "major");
        assert_eq!(parsed["is_newer"], true);
    }

    #[test]
    fn test_compare_downgrade_is_unknown() {
        let parsed = json_stdout(&["compare", "2.0.0", "1.9.9", "--json"]);
        assert_eq!(parsed["update_type"], "unknown");
        assert_eq!(parsed["is_newer"], false);
    }

    #[test]
    fn test_compare_prerelease_to_release_is_patch() {
        let parsed = json_stdout(&["compare", "1.0.0-rc1", "1.0.0", "--json"]);
        assert_eq!(parsed["update_type"], "patch");
        assert_eq!(parsed["is_newer"], true);
    }

    #[test]
    fn test_compare_equal_versions() {
        let parsed = json_stdout(&["compare", "1.2.3", "1.2.3", "--json"]);
        assert_eq!(parsed["update_type"], "none");
        assert_eq!(parsed["is_newer"], false);
    }
}

mod argument_errors {
    use super::*;

    #[test]
    fn test_no_subcommand_is_usage_error() {
        depscope()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_batch_requires_dependencies() {
        depscope()
            .args(["batch"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("required"));
    }

    #[test]
    fn test_conflicting_stability_flags() {
        depscope()
            .args(["batch", "a:b", "--stable-only", "--prefer-stable"])
            .assert()
            .failure();
    }

    #[test]
    fn test_latest_rejects_malformed_coordinate() {
        // Coordinate parsing fails before any network access
        depscope()
            .args(["latest", "junit"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("PARSE_ERROR"));
    }

    #[test]
    fn test_exists_requires_a_version() {
        depscope()
            .args(["exists", "junit:junit"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("INVALID_INPUT"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        depscope()
            .args(["batch", "a:b:1.0", "--timeout", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("at least 1 second"));
    }

    #[test]
    fn test_help_lists_subcommands() {
        depscope()
            .args(["--help"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("latest")
                    .and(predicate::str::contains("batch"))
                    .and(predicate::str::contains("health")),
            );
    }
}
