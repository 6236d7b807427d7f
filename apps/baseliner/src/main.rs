//! Baseliner CLI binary entry point.
//! Resolves configuration, loads inputs, and writes the todo document.

use baseliner::cli::{Cli, Commands};
use baseliner::config::{self, CliOverrides, Effective};
use baseliner::output::{display_path, error_prefix, note_prefix, print_completion};
use baseliner::{
    input, logging, DefaultRegistry, OverrideTable, Synthesizer, TodoFormatter,
};
use clap::Parser;
use std::error::Error as _;
use std::io::Write;
use tracing::{debug, info};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Generate {
            repo_root,
            registry,
            overrides,
            output,
            stdout,
            exclude,
            log_level,
            reports,
        } => {
            let overrides_cli = CliOverrides {
                repo_root,
                output,
                registry,
                overrides,
                reports,
                exclude,
                log_level,
            };
            let eff = match config::resolve_effective(&overrides_cli) {
                Ok(eff) => eff,
                Err(e) => fail(&e),
            };
            if let Err(e) = logging::init(&eff.log_level) {
                eprintln!("{} Logging is unavailable: {}", note_prefix(), e);
            }
            if !eff.config_found {
                eprintln!("{} No baseliner.toml found; using defaults.", note_prefix());
            }
            if let Err(e) = generate(&eff, stdout) {
                fail(&e);
            }
        }
    }
}

fn generate(eff: &Effective, to_stdout: bool) -> baseliner::Result<()> {
    if eff.reports.is_empty() {
        return Err(baseliner::Error::NoReports);
    }

    let registry = match eff.registry.as_deref() {
        Some(path) => DefaultRegistry::load(path)?,
        None => {
            eprintln!(
                "{} No rule registry configured; parameter hints are omitted.",
                note_prefix()
            );
            DefaultRegistry::new()
        }
    };
    let overrides = match eff.overrides.as_deref() {
        Some(path) => OverrideTable::load(path)?,
        None => OverrideTable::new(),
    };
    debug!(
        rules = registry.len(),
        overrides = overrides.len(),
        "inputs loaded"
    );

    let paths = input::expand_patterns(&eff.repo_root, &eff.reports)?;
    let aggregator = input::read_reports(&paths)?;
    let synthesizer = Synthesizer::new().with_excluded(eff.exclude.iter().cloned());
    let excluded = synthesizer.excluded().clone();
    let formatter =
        TodoFormatter::new(&registry, &overrides, synthesizer).with_aggregator(aggregator);

    if to_stdout {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        formatter.on_run_finished(&mut lock)?;
        return lock.flush().map_err(|source| baseliner::Error::Io {
            path: "<stdout>".into(),
            source,
        });
    }

    let written = formatter.write_to_path(&eff.output)?;
    let snapshot = formatter.aggregator().snapshot();
    let rules = snapshot.keys().filter(|r| !excluded.contains(*r)).count();
    let offenses: usize = snapshot
        .iter()
        .filter(|(r, _)| !excluded.contains(*r))
        .map(|(_, c)| *c)
        .sum();
    info!(path = %written.display(), rules, offenses, "todo written");
    print_completion(&display_path(&written, &eff.repo_root), rules, offenses);
    Ok(())
}

fn fail(err: &baseliner::Error) -> ! {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        msg.push_str(&format!(": {}", inner));
        source = inner.source();
    }
    eprintln!("{} {}", error_prefix(), msg);
    std::process::exit(2);
}
