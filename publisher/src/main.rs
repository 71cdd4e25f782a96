//! `selfupdatectl` entrypoint.
//!
//! Publishes a binary (or a directory of per-platform binaries) as
//! self-update manifests and gzip artefacts. All failures flow back here;
//! this is the only place that decides the exit status.

use clap::{CommandFactory, Parser};
use selfupdate_publisher::cli::{Cli, CliError};
use selfupdate_publisher::fanout::{self, FanOutReport};
use std::io::{self, Write};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Route `log` records to stderr at the level chosen on the command line.
///
/// `RUST_LOG` still takes precedence when set.
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .parse_default_env();
    if builder.try_init().is_err() {
        // A logger is already installed.
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<(), CliError> {
    let Some((request, config)) = cli.inputs() else {
        write!(stdout, "{}", Cli::command().render_help())?;
        return Ok(());
    };

    let report = fanout::run(&request, &config)?;
    report_outcomes(&report, stdout, stderr)?;

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: report.failures().count(),
            total: report.outcomes().len(),
        })
    }
}

/// Print one line per published platform and one per failure.
fn report_outcomes(
    report: &FanOutReport,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> io::Result<()> {
    for output in report.published() {
        writeln!(
            stdout,
            "Published {} {} -> {}",
            output.platform,
            output.manifest.version(),
            output.artefact_path
        )?;
    }
    for (platform, err) in report.failures() {
        writeln!(stderr, "error: {platform}: {err}")?;
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use selfupdate_publisher::publish_error::PublishError;
    use std::fs;
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("temp dir creation succeeds");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("UTF-8 temp path");
        Workspace { _dir: dir, root }
    }

    fn cli_for(workspace: &Workspace, source: &str, extra: &[&str]) -> Cli {
        let source = workspace.root.join(source);
        let out = workspace.root.join("out");
        let mut args = vec![
            "selfupdatectl".to_owned(),
            "-o".to_owned(),
            out.to_string(),
        ];
        args.extend(extra.iter().map(|arg| (*arg).to_owned()));
        args.push(source.to_string());
        args.push("1.2".to_owned());
        Cli::parse_from(args)
    }

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = CliError::PartialFailure {
            failed: 1,
            total: 3,
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("error: failed to publish 1 of 3 platform(s)"));
    }

    #[test]
    fn missing_positionals_print_usage_and_succeed() {
        let cli = Cli::parse_from(["selfupdatectl", "app"]);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        run(&cli, &mut stdout, &mut stderr).expect("usage is not an error");

        let text = String::from_utf8(stdout).expect("stdout was not UTF-8");
        assert!(text.contains("selfupdatectl myapp 1.2"), "usage examples: {text}");
        assert!(stderr.is_empty());
    }

    #[rstest]
    fn single_file_run_reports_published_platform(workspace: Workspace) {
        fs::write(workspace.root.join("app"), b"hello").expect("write source");
        let cli = cli_for(&workspace, "app", &["--platform", "linux-amd64"]);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        run(&cli, &mut stdout, &mut stderr).expect("run succeeds");

        let text = String::from_utf8(stdout).expect("stdout was not UTF-8");
        assert!(text.starts_with("Published linux-amd64 1.2 -> "), "{text}");
        assert!(text.trim_end().ends_with("linux-amd64.gz"), "{text}");
        assert!(workspace.root.join("out/linux-amd64.json").is_file());
    }

    #[rstest]
    fn directory_failures_are_reported_per_platform(workspace: Workspace) {
        let bins = workspace.root.join("bins");
        fs::create_dir_all(bins.join("broken-dir")).expect("create bins");
        fs::write(bins.join("darwin-amd64"), b"mac").expect("write binary");
        let cli = cli_for(&workspace, "bins", &[]);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let err = run(&cli, &mut stdout, &mut stderr).expect_err("one platform fails");

        assert!(matches!(
            err,
            CliError::PartialFailure {
                failed: 1,
                total: 2
            }
        ));
        let out_text = String::from_utf8(stdout).expect("stdout was not UTF-8");
        assert!(out_text.contains("Published darwin-amd64 1.2"), "{out_text}");
        let err_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(err_text.starts_with("error: broken-dir: "), "{err_text}");
    }

    #[rstest]
    fn missing_source_is_fatal(workspace: Workspace) {
        let cli = cli_for(&workspace, "absent", &[]);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let err = run(&cli, &mut stdout, &mut stderr).expect_err("source is missing");

        assert!(matches!(
            err,
            CliError::Publish(PublishError::SourceMissing { .. })
        ));
        assert!(stdout.is_empty());
    }
}
