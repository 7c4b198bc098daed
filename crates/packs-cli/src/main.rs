mod allocate;
mod catalog;
mod check;
mod config;
mod distractors;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use packs_core::{PackError, PackService, Strategy};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for rejected input (bad amount or catalog)
const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "packs")]
#[command(about = "Work out which packs to ship for an order")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to packs.toml found from the working directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Allocation strategy: reachability, greedy-merge or greedy-divide
    #[arg(long, global = true)]
    strategy: Option<Strategy>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Allocate packs for an order
    Allocate(allocate::AllocateArgs),

    /// List plausible but wrong allocations for an order
    Distractors(distractors::DistractorsArgs),

    /// Compare the configured strategy against greedy-merge
    Check(check::CheckArgs),

    /// Show the effective pack catalog
    Catalog(catalog::ShowCatalogArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: Args) -> Result<i32> {
    run_with_env(args, |var| std::env::var(var).ok())
}

/// Run a command with environment overrides read through `lookup`
fn run_with_env<F>(args: Args, lookup: F) -> Result<i32>
where
    F: Fn(&str) -> Option<String>,
{
    let config = config::load(args.config.as_ref(), lookup)?;
    let (catalog, allocator) = config.resolve(args.strategy)?;
    let service = PackService::with_config(catalog, allocator);
    log::info!(
        "Using {} strategy, table limit {}",
        service.strategy(),
        allocator.table_limit
    );

    match args.command {
        Commands::Allocate(args) => allocate::execute(args, &service),
        Commands::Distractors(args) => distractors::execute(args, &service),
        Commands::Check(args) => check::execute(args, &service),
        Commands::Catalog(args) => catalog::execute(args, &service),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Rejected input exits with 2, anything else with 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<PackError>().is_some() {
        EXIT_INVALID_INPUT
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use clap::CommandFactory;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    /// A config directory holding an empty packs.toml, so runs never pick up
    /// a stray file from the working directory.
    fn empty_config() -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(config::CONFIG_FILE);
        std::fs::write(&path, "").unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    fn run_args(args: &[&str], vars: &[(&str, &str)]) -> Result<i32> {
        let (_dir, path) = empty_config();
        let mut argv = vec!["packs", "--config", path.as_str()];
        argv.extend_from_slice(args);
        run_with_env(Args::try_parse_from(argv).unwrap(), env(vars))
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_allocate() {
        let args = Args::try_parse_from([
            "packs",
            "allocate",
            "12001",
            "--sizes",
            "250,500,1000",
            "--json",
            "--strategy",
            "greedy-merge",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.strategy, Some(Strategy::GreedyMerge));
        match args.command {
            Commands::Allocate(allocate) => {
                assert_eq!(allocate.amount, 12001);
                assert!(allocate.json);
                assert_eq!(allocate.catalog.sizes, Some(vec![250, 500, 1000]));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_amount() {
        let args = Args::try_parse_from(["packs", "distractors", "-5"]).unwrap();
        match args.command {
            Commands::Distractors(distractors) => assert_eq!(distractors.amount, -5),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        assert!(Args::try_parse_from(["packs", "check", "10", "--strategy", "simplex"]).is_err());
    }

    #[test]
    fn test_exit_code_for_rejected_input() {
        let err = anyhow::Error::from(PackError::InvalidAmount(0));
        assert_eq!(exit_code(&err), 2);
        let err = anyhow::Error::from(PackError::InvalidCatalog("empty".to_string()))
            .context("Failed to apply --sizes");
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_exit_code_for_other_failures() {
        assert_eq!(exit_code(&anyhow!("disk on fire")), 1);
    }

    #[test]
    fn test_run_rejects_zero_amount() {
        let err = run_args(&["allocate", "0"], &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidAmount(0))
        ));
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_run_rejects_invalid_environment_catalog() {
        let err = run_args(&["allocate", "10"], &[("PACKS_SIZES", "250,-1")]).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_run_missing_config_file_fails_with_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let args = Args::try_parse_from([
            "packs",
            "--config",
            path.to_str().unwrap(),
            "allocate",
            "10",
        ])
        .unwrap();
        let err = run_with_env(args, env(&[])).unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_run_command_line_sizes_override_environment() {
        let code = run_args(
            &["allocate", "12001", "--sizes", "23,31,53"],
            &[("PACKS_SIZES", "250")],
        )
        .unwrap();
        assert_eq!(code, 0);

        // The environment catalog is valid; only the flag can fail here.
        let err = run_args(
            &["allocate", "12001", "--sizes", "0"],
            &[("PACKS_SIZES", "250")],
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_run_command_line_strategy_overrides_environment() {
        // greedy-divide ships 250x2 for 251 where greedy-merge ships 500x1
        let vars = [("PACKS_STRATEGY", "reachability")];
        assert_eq!(run_args(&["check", "251"], &vars).unwrap(), 0);
        assert_eq!(
            run_args(&["--strategy", "greedy-divide", "check", "251"], &vars).unwrap(),
            1
        );
    }

    #[test]
    fn test_run_check_exits_one_when_strategy_is_worse() {
        let vars = [("PACKS_STRATEGY", "greedy-divide")];
        assert_eq!(run_args(&["check", "251"], &vars).unwrap(), 1);
        assert_eq!(run_args(&["check", "12001"], &vars).unwrap(), 0);
    }
}
