//! Tests for CLI parsing and input defaulting.

use super::*;
use crate::artefact::platform::{ARCH_ENV_VAR, OS_ENV_VAR};
use clap::CommandFactory;
use clap::error::ErrorKind;
use rstest::rstest;

#[test]
fn cli_command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn version_flag_is_distinct_from_release_version() {
    let err = Cli::try_parse_from(["selfupdatectl", "--version"])
        .expect_err("--version prints the tool version");
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);

    let cli = Cli::parse_from(["selfupdatectl", "app", "3.1"]);
    assert_eq!(cli.version.as_deref(), Some("3.1"));
}

#[test]
fn single_dash_platform_is_rejected_and_documented() {
    Cli::try_parse_from(["selfupdatectl", "-platform", "linux-arm64", "app", "1.0"])
        .expect_err("single-dash long flags are not supported");

    let help = Cli::command().render_long_help().to_string();
    assert!(help.contains("single-dash"), "help mentions the spelling: {help}");
}

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["selfupdatectl"]);
    assert!(cli.source.is_none());
    assert!(cli.version.is_none());
    assert_eq!(cli.output, Utf8PathBuf::from("public"));
    assert!(cli.platform.is_none());
    assert!(cli.jobs.is_none());
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn cli_parses_positionals_and_flags() {
    let cli = Cli::parse_from([
        "selfupdatectl",
        "-o",
        "dist",
        "--platform",
        "linux-arm64",
        "-j",
        "3",
        "target/release/app",
        "1.2",
    ]);
    assert_eq!(cli.source, Some(Utf8PathBuf::from("target/release/app")));
    assert_eq!(cli.version.as_deref(), Some("1.2"));
    assert_eq!(cli.output, Utf8PathBuf::from("dist"));
    assert_eq!(cli.platform.as_deref(), Some("linux-arm64"));
    assert_eq!(cli.jobs.map(NonZeroUsize::get), Some(3));
}

#[test]
fn cli_accepts_long_output_flag() {
    let cli = Cli::parse_from(["selfupdatectl", "--output", "/srv/updates", "app", "1.0"]);
    assert_eq!(cli.output, Utf8PathBuf::from("/srv/updates"));
}

#[test]
fn cli_rejects_zero_jobs() {
    Cli::try_parse_from(["selfupdatectl", "-j", "0", "app", "1.0"])
        .expect_err("expected clap to reject zero jobs");
}

#[test]
fn cli_rejects_verbose_with_quiet() {
    Cli::try_parse_from(["selfupdatectl", "-v", "-q", "app", "1.0"])
        .expect_err("expected clap to reject conflicting flags");
}

#[test]
fn cli_rejects_extra_positionals() {
    Cli::try_parse_from(["selfupdatectl", "app", "1.0", "surplus"])
        .expect_err("expected clap to reject a third positional");
}

#[rstest]
#[case::nothing(&["selfupdatectl"])]
#[case::source_only(&["selfupdatectl", "app"])]
fn inputs_require_both_positionals(#[case] args: &[&str]) {
    let cli = Cli::parse_from(args);
    assert!(cli.inputs().is_none());
}

#[test]
fn inputs_use_explicit_platform() {
    let cli = Cli::parse_from(["selfupdatectl", "--platform", "darwin-arm64", "app", "1.2"]);
    let (request, config) = cli.inputs().expect("both positionals present");
    assert_eq!(request.source, Utf8PathBuf::from("app"));
    assert_eq!(request.platform.as_str(), "darwin-arm64");
    assert_eq!(config.version().as_str(), "1.2");
    assert_eq!(config.layout().root(), "public");
}

#[test]
fn inputs_default_platform_from_env() {
    temp_env::with_vars(
        [(OS_ENV_VAR, Some("linux")), (ARCH_ENV_VAR, Some("riscv64"))],
        || {
            let cli = Cli::parse_from(["selfupdatectl", "app", "1.2"]);
            let (request, _) = cli.inputs().expect("both positionals present");
            assert_eq!(request.platform.as_str(), "linux-riscv64");
        },
    );
}

#[test]
fn inputs_carry_job_bound() {
    let cli = Cli::parse_from(["selfupdatectl", "--jobs", "2", "bins", "1.2"]);
    let (_, config) = cli.inputs().expect("both positionals present");
    assert_eq!(config.jobs().map(NonZeroUsize::get), Some(2));
}

#[rstest]
#[case::default(&["selfupdatectl"], LevelFilter::Warn)]
#[case::verbose(&["selfupdatectl", "-v"], LevelFilter::Info)]
#[case::very_verbose(&["selfupdatectl", "-vv"], LevelFilter::Debug)]
#[case::trace(&["selfupdatectl", "-vvvv"], LevelFilter::Trace)]
#[case::quiet(&["selfupdatectl", "-q"], LevelFilter::Error)]
fn log_level_follows_flags(#[case] args: &[&str], #[case] expected: LevelFilter) {
    assert_eq!(Cli::parse_from(args).log_level(), expected);
}
