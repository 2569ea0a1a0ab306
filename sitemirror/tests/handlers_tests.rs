use sitemirror::handlers::*;
use sitemirror::command_argument_builder;
use std::path::PathBuf;

fn parse(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["sitemirror"];
    argv.extend_from_slice(args);
    command_argument_builder().try_get_matches_from(argv).unwrap()
}

#[test]
fn test_normalize_start_url_with_scheme() {
    let result = normalize_start_url("https://example.com").unwrap();
    assert_eq!(result, "https://example.com/");
}

#[test]
fn test_normalize_start_url_without_scheme() {
    let result = normalize_start_url("example.com/docs").unwrap();
    assert_eq!(result, "https://example.com/docs");
}

#[test]
fn test_normalize_start_url_keeps_http() {
    let result = normalize_start_url("http://localhost:8080/").unwrap();
    assert_eq!(result, "http://localhost:8080/");
}

#[test]
fn test_normalize_start_url_rejects_other_schemes() {
    let err = normalize_start_url("ftp://example.com").unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn test_normalize_start_url_empty() {
    assert!(normalize_start_url("   ").is_err());
}

#[test]
fn test_normalize_start_url_invalid() {
    assert!(normalize_start_url("https://exa mple.com").is_err());
}

#[test]
fn test_resolve_output_dir_plain() {
    assert_eq!(resolve_output_dir("mirrors").unwrap(), PathBuf::from("mirrors"));
}

#[test]
fn test_resolve_output_dir_expands_tilde() {
    let resolved = resolve_output_dir("~/mirrors").unwrap();
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("mirrors"));
}

#[test]
fn test_options_defaults() {
    let options = options_from_matches(&parse(&["-u", "example.com"])).unwrap();
    assert_eq!(options.url, "https://example.com/");
    assert_eq!(options.max_depth, 1);
    assert_eq!(options.concurrency, 5);
    assert_eq!(options.workers, None);
    assert_eq!(options.timeout_secs, 30);
    assert_eq!(options.output_dir, PathBuf::from("."));
    assert!(options.show_progress_bars);
}

#[test]
fn test_options_from_flags() {
    let options = options_from_matches(&parse(&[
        "-u",
        "http://example.com/a/",
        "-d",
        "3",
        "-n",
        "8",
        "-w",
        "12",
        "-t",
        "10",
        "-o",
        "out",
        "-q",
    ]))
    .unwrap();

    assert_eq!(options.url, "http://example.com/a/");
    assert_eq!(options.max_depth, 3);
    assert_eq!(options.concurrency, 8);
    assert_eq!(options.workers, Some(12));
    assert_eq!(options.timeout_secs, 10);
    assert_eq!(options.output_dir, PathBuf::from("out"));
    assert!(!options.show_progress_bars);
}

#[test]
fn test_options_reject_zero_concurrency() {
    let result = options_from_matches(&parse(&["-u", "example.com", "-n", "0"]));
    assert!(result.is_err());
}

#[test]
fn test_url_is_required() {
    let result = command_argument_builder().try_get_matches_from(["sitemirror"]);
    assert!(result.is_err());
}

#[test]
fn test_format_must_be_known() {
    let result =
        command_argument_builder().try_get_matches_from(["sitemirror", "-u", "x.com", "-f", "csv"]);
    assert!(result.is_err());
}
