// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for command result classification

use termax::analyzer::{self, CommandAnalyzer};
use termax::types::*;

#[test]
fn test_clean_exit_is_success() {
    let analyzer = CommandAnalyzer::new();
    let analysis = analyzer.analyze("ls", "file.txt\n", "", 0);

    assert!(analysis.success);
    assert_eq!(analysis.error_type, None);
    assert_eq!(analysis.suggestion, None);
    assert_eq!(analysis.details.stdout, "file.txt\n");
    assert_eq!(analysis.details.stderr, None);
    assert_eq!(analysis.details.return_code, None);
}

#[test]
fn test_zero_exit_with_stderr_is_failure() {
    let analyzer = CommandAnalyzer::new();
    let analysis = analyzer.analyze("make", "", "warning: something odd", 0);

    assert!(!analysis.success);
    assert_eq!(analysis.error_type, None);
    assert_eq!(analysis.suggestion, None);
    assert_eq!(analysis.details.return_code, Some(0));
}

#[test]
fn test_permission_denied_any_case_any_code() {
    let analyzer = CommandAnalyzer::new();
    for (stderr, code) in [
        ("cat: /etc/shadow: Permission denied", 1),
        ("PERMISSION DENIED", 0),
        ("error: permission denied (publickey)", 255),
    ] {
        let analysis = analyzer.analyze("cmd", "", stderr, code);
        assert!(!analysis.success);
        assert_eq!(analysis.error_type, Some(ErrorCategory::PermissionDenied), "{stderr}");
        assert_eq!(
            analysis.suggestion.as_deref(),
            Some(ErrorCategory::PermissionDenied.suggestion())
        );
    }
}

#[test]
fn test_earlier_pattern_wins() {
    let analyzer = CommandAnalyzer::new();
    let stderr = "ls: cannot open: No such file or directory\nrm: Permission denied";
    let analysis = analyzer.analyze("rm x", "", stderr, 1);
    assert_eq!(analysis.error_type, Some(ErrorCategory::PermissionDenied));

    let stderr = "Connection refused; also No space left on device";
    let analysis = analyzer.analyze("scp", "", stderr, 1);
    assert_eq!(analysis.error_type, Some(ErrorCategory::ConnectionError));
}

#[test]
fn test_each_category_has_its_suggestion() {
    let analyzer = CommandAnalyzer::new();
    let cases = [
        ("bash: foo: command not found", ErrorCategory::NotFound),
        ("sh: 1: Syntax error: \"(\" unexpected", ErrorCategory::SyntaxError),
        ("curl: (7) Connection refused", ErrorCategory::ConnectionError),
        ("cp: error writing: No space left on device", ErrorCategory::DiskSpace),
    ];
    for (stderr, expected) in cases {
        let analysis = analyzer.analyze("cmd", "", stderr, 1);
        assert_eq!(analysis.error_type, Some(expected));
        assert_eq!(analysis.suggestion.as_deref(), Some(expected.suggestion()));
    }
}

#[test]
fn test_unclassified_failure() {
    let analysis = analyzer::analyze("./crash", "partial", "Segmentation fault", 139);
    assert!(!analysis.success);
    assert_eq!(analysis.error_type, None);
    assert_eq!(analysis.suggestion, None);
    assert_eq!(analysis.details.stdout, "partial");
    assert_eq!(analysis.details.stderr.as_deref(), Some("Segmentation fault"));
    assert_eq!(analysis.details.return_code, Some(139));
}

#[test]
fn test_analyze_multiple_preserves_order_and_defaults() {
    let inputs: Vec<CommandInput> = serde_json::from_str(
        r#"[
            {"command": "true", "return_code": 0},
            {"command": "missing"},
            {"command": "cat x", "stderr": "cat: x: No such file or directory", "return_code": 1}
        ]"#,
    )
    .expect("batch should parse");

    assert_eq!(inputs[1].stdout, "");
    assert_eq!(inputs[1].stderr, "");
    assert_eq!(inputs[1].return_code, 1);

    let analyses = analyzer::analyze_multiple_commands(&inputs);
    assert_eq!(analyses.len(), 3);
    assert!(analyses[0].success);
    assert!(!analyses[1].success);
    assert_eq!(analyses[1].error_type, None);
    assert_eq!(analyses[2].error_type, Some(ErrorCategory::NotFound));
}

#[test]
fn test_extract_keywords_drops_stop_words() {
    let keywords = analyzer::extract_keywords("The Quick Fox and the Lazy Dog");
    assert_eq!(keywords, vec!["quick", "fox", "lazy", "dog"]);
}

#[test]
fn test_extract_keywords_keeps_duplicates_and_splits_punctuation() {
    let analyzer = CommandAnalyzer::new();
    let keywords = analyzer.extract_keywords("disk-usage on /var, disk usage for ALL");
    assert_eq!(keywords, vec!["disk", "usage", "var", "disk", "usage", "all"]);
    assert!(analyzer.extract_keywords("the a an").is_empty());
}

#[test]
fn test_analysis_serializes_like_session_files() {
    let analyzer = CommandAnalyzer::new();

    let ok = serde_json::to_value(analyzer.analyze("echo", "hi\n", "", 0)).expect("serialize");
    assert_eq!(
        ok,
        serde_json::json!({
            "success": true,
            "error_type": null,
            "suggestion": null,
            "details": {"stdout": "hi\n"}
        })
    );

    let failed =
        serde_json::to_value(analyzer.analyze("x", "", "x: command not found", 127)).expect("serialize");
    assert_eq!(failed["error_type"], "not_found");
    assert_eq!(failed["details"]["return_code"], 127);
    assert_eq!(failed["details"]["stderr"], "x: command not found");
}
