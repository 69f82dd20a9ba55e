//! semver-isvalid CLI
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use semver_isvalid::Cli;
use semver_isvalid::commands::{
    self,
    validate::{EXIT_SETUP_FAILURE, EXIT_WRONG_ARGUMENT_COUNT},
};
use semver_isvalid_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version arrive here as "errors" on stdout
            return if err.use_stderr() {
                ExitCode::from(EXIT_WRONG_ARGUMENT_COUNT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    cli.color.apply();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!(
                "{}",
                format!("error: {err:#}").if_supports_color(Stream::Stderr, |text| text.red())
            );
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let config = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let result = commands::validate::cmd_validate(cli.check, cli.json, &config);
    match result {
        Ok(code) => {
            debug!(exit_code = code, "validation complete");
            Ok(code)
        }
        Err(err) => {
            tracing::error!(error = %err, "fatal error");
            Err(err)
        }
    }
}
