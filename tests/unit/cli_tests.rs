//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use csvpeek::cli::{Cli, Commands};

#[test]
fn test_cli_view_defaults() {
    let cli = Cli::try_parse_from(["csvpeek", "view", "data.csv"]).unwrap();
    match cli.command {
        Commands::View {
            file,
            required,
            where_clauses,
            take,
            select,
            vertical,
            stats,
            hist,
            out,
            format,
            ..
        } => {
            assert_eq!(file.to_str(), Some("data.csv"));
            assert!(required.is_empty());
            assert!(where_clauses.is_empty());
            assert!(take.is_none());
            assert!(select.is_none());
            assert!(!vertical && !stats);
            assert!(hist.is_none());
            assert!(out.is_none());
            assert_eq!(format, "pretty");
        }
        _ => panic!("Expected View command"),
    }
}

#[test]
fn test_cli_view_with_filters() {
    let cli = Cli::try_parse_from([
        "csvpeek", "view", "data.csv",
        "--required", "A,B",
        "--req", "C",
        "--where", "State=WA",
        "--where", "Age=34",
        "--take", "10",
        "--select", "Name,Age",
        "--out", "out.csv",
    ])
    .unwrap();

    match cli.command {
        Commands::View {
            required,
            where_clauses,
            take,
            select,
            out,
            ..
        } => {
            assert_eq!(required, vec!["A,B", "C"]);
            assert_eq!(where_clauses, vec!["State=WA", "Age=34"]);
            assert_eq!(take, Some(10));
            assert_eq!(select.as_deref(), Some("Name,Age"));
            assert_eq!(out.as_deref().and_then(|p| p.to_str()), Some("out.csv"));
        }
        _ => panic!("Expected View command"),
    }
}

#[test]
fn test_cli_rejects_zero_take() {
    let result = Cli::try_parse_from(["csvpeek", "view", "data.csv", "--take", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_ignore_case_requires_hist() {
    let result = Cli::try_parse_from(["csvpeek", "view", "data.csv", "--ignore-case"]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from([
        "csvpeek", "view", "data.csv", "--hist", "State", "--ignore-case",
    ])
    .unwrap();
    match cli.command {
        Commands::View { hist, ignore_case, .. } => {
            assert_eq!(hist.as_deref(), Some("State"));
            assert!(ignore_case);
        }
        _ => panic!("Expected View command"),
    }
}

#[test]
fn test_cli_diff_command() {
    let cli = Cli::try_parse_from(["csvpeek", "diff", "a.csv", "b.csv", "id", "c1,c2"]).unwrap();
    match cli.command {
        Commands::Diff {
            file1,
            file2,
            primary_key,
            columns,
            format,
        } => {
            assert_eq!(file1.to_str(), Some("a.csv"));
            assert_eq!(file2.to_str(), Some("b.csv"));
            assert_eq!(primary_key, "id");
            assert_eq!(columns, "c1,c2");
            assert_eq!(format, "pretty");
        }
        _ => panic!("Expected Diff command"),
    }
}

#[test]
fn test_cli_diff_requires_all_arguments() {
    assert!(Cli::try_parse_from(["csvpeek", "diff", "a.csv", "b.csv", "id"]).is_err());
}

#[test]
fn test_cli_header_rename_takes_two_values() {
    let cli = Cli::try_parse_from(["csvpeek", "header", "data.csv", "--rename", "old", "new"])
        .unwrap();
    match cli.command {
        Commands::Header { rename, .. } => {
            assert_eq!(rename, Some(vec!["old".to_string(), "new".to_string()]));
        }
        _ => panic!("Expected Header command"),
    }

    assert!(Cli::try_parse_from(["csvpeek", "header", "data.csv", "--rename", "old"]).is_err());
}

#[test]
fn test_cli_global_flags() {
    let cli = Cli::try_parse_from([
        "csvpeek", "view", "data.csv", "--verbose", "--config", "cfg.json",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref().and_then(|p| p.to_str()), Some("cfg.json"));
}
