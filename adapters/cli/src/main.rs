#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that ranks breeding pairs for a creature roster.

mod config;
mod creature_transfer;
mod roster;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use breeding_planner_core::{BestLevels, BreedingPair, Creature, CreatureId};
use breeding_planner_system_best_levels::compute_best_levels;
use breeding_planner_system_pair_scoring::PairScoring;
use clap::{Parser, Subcommand};

use crate::config::PlannerConfig;
use crate::roster::Roster;

/// Breeding pair planner for single-species creature rosters.
#[derive(Debug, Parser)]
#[command(name = "breeding-planner", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ranks breeding pairs for a roster and prints the result.
    Plan {
        /// Path to the roster JSON file.
        #[arg(long)]
        roster: PathBuf,
        /// Path to the planner TOML configuration. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print at most this many pairs.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Encodes one creature as a single-line clipboard transfer string.
    Export {
        /// Path to the roster JSON file.
        #[arg(long)]
        roster: PathBuf,
        /// Identifier of the creature to export.
        #[arg(long)]
        id: u32,
    },
    /// Decodes a clipboard transfer string and prints the creature as JSON.
    Import {
        /// The transfer string produced by `export`.
        transfer: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Plan {
            roster,
            config,
            limit,
        } => plan(&roster, config.as_deref(), limit),
        Command::Export { roster, id } => export(&roster, CreatureId::new(id)),
        Command::Import { transfer } => import(&transfer),
    }
}

fn plan(
    roster_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    limit: Option<usize>,
) -> Result<()> {
    let roster = Roster::load(roster_path)?;
    let config = match config_path {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    let stat_weights = config.stat_weights()?;
    let settings = config.scoring_settings();
    let mode = config.mode();

    let ignore_sex = settings.ignore_sex || roster.species.no_gender();
    let (females, males) = roster.candidate_pools(ignore_sex);
    if females.is_empty() || males.is_empty() {
        bail!(
            "roster {} has no complete breeding pair to rank",
            roster_path.display()
        );
    }

    let candidates: Vec<Creature> = if ignore_sex {
        females.clone()
    } else {
        females.iter().chain(males.iter()).cloned().collect()
    };
    let mut best_levels = BestLevels::unobserved();
    compute_best_levels(&candidates, &stat_weights, &mut best_levels);

    let mut system = PairScoring::new();
    let mut pairs = Vec::new();
    let summary = system.handle(
        &females,
        &males,
        &roster.species,
        &stat_weights,
        &best_levels,
        mode,
        &settings,
        &mut pairs,
    );

    print_ranking(&roster, &pairs, limit);
    println!("{} pairs ranked ({mode:?})", summary.pairs_ranked);
    if summary.pairs_skipped_by_mutation_limit {
        eprintln!("warning: some pairs were skipped because both parents exceed the mutation limit");
    }
    Ok(())
}

fn print_ranking(roster: &Roster, pairs: &[BreedingPair], limit: Option<usize>) {
    let shown = limit.unwrap_or(pairs.len()).min(pairs.len());
    let name_width = pairs[..shown]
        .iter()
        .flat_map(|pair| [pair.female, pair.male])
        .map(|id| roster.display_name(id).len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "{:>4}  {:<name_width$}  {:<name_width$}  {:>8}  {:>8}  cap",
        "rank", "female", "male", "score", "mutation"
    );
    for (rank, pair) in pairs[..shown].iter().enumerate() {
        println!(
            "{:>4}  {:<name_width$}  {:<name_width$}  {:>8.4}  {:>7.1}%  {}",
            rank + 1,
            roster.display_name(pair.female),
            roster.display_name(pair.male),
            pair.score,
            pair.mutation_probability * 100.0,
            if pair.level_cap_exceeded { "over" } else { "" }
        );
    }
}

fn export(roster_path: &std::path::Path, id: CreatureId) -> Result<()> {
    let roster = Roster::load(roster_path)?;
    let creature = roster
        .creature(id)
        .with_context(|| format!("creature {} not found in roster", id.get()))?;
    println!("{}", creature_transfer::encode(creature));
    Ok(())
}

fn import(transfer: &str) -> Result<()> {
    let creature = creature_transfer::decode(transfer).with_context(|| {
        format!(
            "expected a `{}` transfer string",
            creature_transfer::TRANSFER_HEADER
        )
    })?;
    let json = serde_json::to_string_pretty(&creature)
        .context("failed to render the decoded creature")?;
    println!("{json}");
    Ok(())
}
