
use super::*;

fn parse(args: &[&str]) -> RunArgs {
    let cli = Cli::try_parse_from(std::iter::once("calkpi").chain(args.iter().copied())).unwrap();
    let Command::Run(args) = cli.command;
    args
}

#[test]
fn test_parse_run_defaults() {
    let args = parse(&["run", "--input", "drive.tsv", "--out", "out"]);
    assert_eq!(args.input, PathBuf::from("drive.tsv"));
    assert_eq!(args.out, PathBuf::from("out"));
    assert!(args.config.is_none());
    assert!(args.project.is_none());
    assert!(!args.verbose);
}

#[test]
fn test_parse_overrides() {
    let args = parse(&[
        "run",
        "--input",
        "drive.tsv",
        "--out",
        "out",
        "--project",
        "cariad",
        "--statistic",
        "min-med-ave-max",
        "-v",
    ]);
    assert_eq!(args.project, Some(ProjectMode::Cariad));
    assert_eq!(args.statistic, Some(StatisticKind::MinMedAveMax));
    assert!(args.verbose);
}

#[test]
fn test_parse_requires_input() {
    assert!(Cli::try_parse_from(["calkpi", "run", "--out", "out"]).is_err());
    assert!(Cli::try_parse_from(["calkpi"]).is_err());
}

#[test]
fn test_resolve_config_applies_flags() {
    let args = parse(&[
        "run",
        "--input",
        "drive.tsv",
        "--out",
        "out",
        "--project",
        "cariad",
        "--statistic",
        "two-sigma",
    ]);
    let config = resolve_config(&args).unwrap();
    assert_eq!(config.mode, ProjectMode::Cariad);
    assert!(
        config
            .sheets
            .iter()
            .all(|s| s.statistic == StatisticKind::TwoSigma)
    );
}

#[test]
fn test_input_name() {
    assert_eq!(input_name(Path::new("/data/drive.tsv.gz")), "drive.tsv.gz");
}

#[test]
fn test_error_chain_includes_source() {
    let err = error::ReportError::Scenario {
        scenario: "Yaw (0, 0, 0, default)".to_string(),
        source: error::StatsError::missing("weather"),
    };
    let text = error_chain(&err);
    assert!(text.starts_with("scenario Yaw (0, 0, 0, default)"));
    assert!(text.contains("missing column: weather"));
}

#[test]
fn test_log_level_default() {
    assert_eq!(logging::default_directive(true), "debug");
    assert_eq!(logging::default_directive(false), "info");
}
