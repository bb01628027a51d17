use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use breeding_planner_core::{Creature, CreatureId, Sex, Species};
use serde::{Deserialize, Serialize};

/// Creature roster as stored on disk: one species and its tamed individuals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Roster {
    /// Species every creature in the roster belongs to.
    pub species: Species,
    /// Tamed individuals available for pairing.
    pub creatures: Vec<Creature>,
}

impl Roster {
    /// Loads a roster from a JSON file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster file {}", path.display()))?;
        let roster: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse roster file {}", path.display()))?;
        roster.ensure_unique_ids()?;
        Ok(roster)
    }

    /// Returns the creature with the provided identifier, if present.
    pub(crate) fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|creature| creature.id == id)
    }

    /// Display name for the provided identifier, falling back to the raw id.
    pub(crate) fn display_name(&self, id: CreatureId) -> String {
        match self.creature(id) {
            Some(creature) => format!("{} (#{})", creature.name, id.get()),
            None => format!("#{}", id.get()),
        }
    }

    /// Splits the roster into female and male candidate pools.
    ///
    /// While sex is ignored both pools are the full roster in file order,
    /// which is the layout the scoring system's positional skip rules expect.
    /// Otherwise creatures of unknown sex are left out of both pools.
    pub(crate) fn candidate_pools(&self, ignore_sex: bool) -> (Vec<Creature>, Vec<Creature>) {
        if ignore_sex {
            return (self.creatures.clone(), self.creatures.clone());
        }

        let females = self
            .creatures
            .iter()
            .filter(|creature| creature.sex == Sex::Female)
            .cloned()
            .collect();
        let males = self
            .creatures
            .iter()
            .filter(|creature| creature.sex == Sex::Male)
            .cloned()
            .collect();
        (females, males)
    }

    fn ensure_unique_ids(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for creature in &self.creatures {
            if !seen.insert(creature.id) {
                bail!(
                    "roster contains creature id {} more than once",
                    creature.id.get()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Roster;
    use breeding_planner_core::{Creature, CreatureId, Sex, Species, STAT_COUNT};

    fn roster() -> Roster {
        Roster {
            species: Species::new("Testodon", false, [true; STAT_COUNT]),
            creatures: vec![
                creature(1, Sex::Female),
                creature(2, Sex::Male),
                creature(3, Sex::Unknown),
            ],
        }
    }

    fn creature(id: u32, sex: Sex) -> Creature {
        Creature {
            id: CreatureId::new(id),
            name: format!("creature-{id}"),
            sex,
            levels_wild: [0; STAT_COUNT],
            mutations: 0,
        }
    }

    #[test]
    fn sexed_pools_exclude_unknown_creatures() {
        let roster = roster();
        let (females, males) = roster.candidate_pools(false);
        assert_eq!(females.len(), 1);
        assert_eq!(males.len(), 1);
        assert_eq!(females[0].id, CreatureId::new(1));
        assert_eq!(males[0].id, CreatureId::new(2));
    }

    #[test]
    fn ignored_sex_uses_the_full_roster_twice_in_order() {
        let roster = roster();
        let (females, males) = roster.candidate_pools(true);
        assert_eq!(females, roster.creatures);
        assert_eq!(males, roster.creatures);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut duplicated = roster();
        duplicated.creatures.push(creature(2, Sex::Male));
        assert!(duplicated.ensure_unique_ids().is_err());
    }

    #[test]
    fn display_name_includes_the_id() {
        let roster = roster();
        assert_eq!(roster.display_name(CreatureId::new(1)), "creature-1 (#1)");
        assert_eq!(roster.display_name(CreatureId::new(9)), "#9");
    }
}
