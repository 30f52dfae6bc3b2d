//! repo-pulse CLI entrypoint: ranks organization repositories by commit
//! activity over the last six months.

mod cli;

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use repo_pulse::{ActivityError, RepoPulseConfig};
use tracing_subscriber::EnvFilter;

use cli::organization_report::RunSummary;

const DEFAULT_LOG_FILTER: &str = "repo_pulse=info";

/// Flags that take the following argument as their value.
const VALUE_FLAGS: &[&str] = &[
    "--username",
    "-u",
    "--token",
    "-t",
    "--api-url",
    "--github-host",
];

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<RunSummary, ActivityError> {
    let (config, organizations) = parse_invocation(std::env::args_os())?;
    cli::organization_report::run(&config, &organizations).await
}

/// Resolves configuration and the organizations to rank.
///
/// Flags reach ortho-config before the organization list is checked, so
/// `--help` and flag errors are reported even when no organization is given.
///
/// # Errors
///
/// Returns [`ActivityError::Configuration`] when the flags are rejected or
/// no organization was named.
fn parse_invocation<I>(args: I) -> Result<(RepoPulseConfig, Vec<String>), ActivityError>
where
    I: IntoIterator<Item = OsString>,
{
    let (organizations, flags) = extract_organizations(args);
    let config = load_config(flags)?;
    if organizations.is_empty() {
        return Err(ActivityError::Configuration {
            message: "at least one organization is required: repo-pulse <ORG>...".to_owned(),
        });
    }
    Ok((config, organizations))
}

/// Loads configuration from CLI flags, environment, and files.
///
/// # Errors
///
/// Returns [`ActivityError::Configuration`] when ortho-config fails to parse
/// the flags or load configuration files.
fn load_config(flags: Vec<OsString>) -> Result<RepoPulseConfig, ActivityError> {
    RepoPulseConfig::load_from_iter(flags).map_err(|error| ActivityError::Configuration {
        message: error.to_string(),
    })
}

/// Splits positional organization arguments from flags.
///
/// The program name and every flag (with the value of a flag listed in
/// [`VALUE_FLAGS`]) stay in the returned argument list in their original
/// order. Everything after `--` is positional.
fn extract_organizations<I>(args: I) -> (Vec<String>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let mut flags: Vec<OsString> = iter.next().into_iter().collect();
    let mut organizations = Vec::new();
    let mut positional_only = false;

    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy().into_owned();
        if positional_only || !text.starts_with('-') || text == "-" {
            organizations.push(text);
        } else if text == "--" {
            positional_only = true;
        } else {
            let takes_value = VALUE_FLAGS.contains(&text.as_str());
            flags.push(arg);
            if takes_value {
                flags.extend(iter.next());
            }
        }
    }

    (organizations, flags)
}
