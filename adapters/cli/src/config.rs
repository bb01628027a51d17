use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use breeding_planner_core::{
    BreedingMode, ScoringSettings, StatIndex, StatWeights, STAT_COUNT,
};
use serde::Deserialize;

/// Planner configuration as stored on disk.
///
/// ```toml
/// mode = "top-stats-conservative"
///
/// [weights]
/// health = 1.0
/// melee = 2.0
/// speed = -0.5
///
/// [settings]
/// mutation_limit = 20
/// offspring_level_limit = 150
/// downgrade_over_level_limit = true
/// only_best_suggestion_for_each_female = true
/// ```
///
/// Statistics absent from `[weights]` carry a weight of zero and are left out
/// of scoring.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlannerConfig {
    #[serde(default)]
    mode: ModeConfig,
    #[serde(default)]
    weights: HashMap<String, f64>,
    #[serde(default)]
    settings: SettingsConfig,
}

impl PlannerConfig {
    /// Loads a planner configuration from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read planner config at {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse planner config at {}", path.display()))?;
        let _ = config.stat_weights()?;
        Ok(config)
    }

    /// Scoring mode selected by the configuration.
    pub(crate) fn mode(&self) -> BreedingMode {
        match self.mode {
            ModeConfig::BestNextGen => BreedingMode::BestNextGen,
            ModeConfig::TopStatsLucky => BreedingMode::TopStatsLucky,
            ModeConfig::TopStatsConservative => BreedingMode::TopStatsConservative,
        }
    }

    /// Per-stat weight vector described by the `[weights]` table.
    pub(crate) fn stat_weights(&self) -> Result<StatWeights> {
        let mut weights = [0.0; STAT_COUNT];
        for (label, weight) in &self.weights {
            let stat = parse_stat_label(label)
                .with_context(|| format!("unknown statistic `{label}` in [weights]"))?;
            weights[stat.index()] = *weight;
        }
        Ok(StatWeights::new(weights))
    }

    /// Engine settings described by the `[settings]` table.
    pub(crate) fn scoring_settings(&self) -> ScoringSettings {
        ScoringSettings {
            consider_chosen_creature: self.settings.consider_chosen_creature,
            mutation_limit: self.settings.mutation_limit,
            offspring_level_limit: self.settings.offspring_level_limit,
            downgrade_over_level_limit: self.settings.downgrade_over_level_limit,
            only_best_suggestion_for_each_female: self.settings.only_best_suggestion_for_each_female,
            ignore_sex: self.settings.ignore_sex,
            consider_only_even_for_high_stats: self.settings.consider_only_even_for_high_stats,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ModeConfig {
    #[default]
    BestNextGen,
    TopStatsLucky,
    TopStatsConservative,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct SettingsConfig {
    consider_chosen_creature: bool,
    mutation_limit: Option<u32>,
    offspring_level_limit: i32,
    downgrade_over_level_limit: bool,
    only_best_suggestion_for_each_female: bool,
    ignore_sex: bool,
    consider_only_even_for_high_stats: bool,
}

fn parse_stat_label(label: &str) -> Option<StatIndex> {
    StatIndex::ALL.into_iter().find(|stat| stat.label() == label)
}
