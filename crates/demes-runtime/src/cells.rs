//! Built-in cell rules.
//!
//! A Cell plugin defines how the cell occupying a node changes from one
//! epoch to the next. The engine itself attaches no meaning to types; a
//! rule is just asked to update each node once per epoch, through the
//! population's mutation API so that counts and transitions stay honest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use demes_core::config::ConfigSource;
use demes_core::error::{DemesError, Result};
use demes_core::rangelist::parse_range_list;
use demes_core::types::{CellType, NodeRef};

use crate::config::Config;
use crate::population::Population;

/// Per-epoch update rule for the cell occupying one node.
pub trait CellRule {
    fn name(&self) -> &str;

    /// Update the cell at `node`. Called once per node per epoch.
    fn update(&mut self, population: &mut Population, node: NodeRef) -> Result<()>;
}

impl std::fmt::Debug for dyn CellRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellRule").field("name", &self.name()).finish()
    }
}

/// Constructor signature for Cell plugins.
pub type CellFactory = fn(&Config, usize, &mut StdRng) -> Result<Box<dyn CellRule>>;

/// A neutral-drift cell: each epoch, with probability `probability`, the
/// cell re-rolls its type uniformly over the allowed types.
///
/// Section `[drift]`: `probability` (default 0.01) and `types`, an integer
/// range list (e.g. `"0,2-3"`) restricting which types a cell may drift
/// into (default: the whole type range).
pub struct DriftCell {
    probability: f64,
    allowed: Vec<CellType>,
    rng: StdRng,
}

impl DriftCell {
    pub const NAME: &'static str = "drift";

    pub fn from_config(
        config: &Config,
        max_types: usize,
        rng: &mut StdRng,
    ) -> Result<Box<dyn CellRule>> {
        let probability = config.get_float(Self::NAME, "probability", 0.01)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(DemesError::invalid_parameter(Self::NAME, "probability"));
        }

        let allowed: Vec<CellType> = match config.get(Self::NAME, "types") {
            Some(raw) => {
                let values = parse_range_list(&raw)?;
                if values.iter().any(|&t| t < 0 || t as usize >= max_types) {
                    return Err(DemesError::invalid_parameter(Self::NAME, "types"));
                }
                values.into_iter().map(|t| t as CellType).collect()
            }
            None => (0..max_types).collect(),
        };

        Ok(Box::new(Self {
            probability,
            allowed,
            rng: StdRng::seed_from_u64(rng.gen()),
        }))
    }
}

impl CellRule for DriftCell {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, population: &mut Population, node: NodeRef) -> Result<()> {
        if self.rng.gen::<f64>() < self.probability {
            let new_type = self.allowed[self.rng.gen_range(0..self.allowed.len())];
            population.set_cell_type(node, new_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demes_core::topology::PopulationView;
    use demes_core::types::Position;

    fn rule_from(config: &Config, max_types: usize) -> Box<dyn CellRule> {
        let mut seed_rng = StdRng::seed_from_u64(1);
        DriftCell::from_config(config, max_types, &mut seed_rng).unwrap()
    }

    #[test]
    fn zero_probability_never_changes_types() {
        let mut config = Config::new();
        config.set("drift", "probability", 0.0);
        let mut rule = rule_from(&config, 3);

        let mut population = Population::new(3);
        let node = population.add_cell(2, Position::new(0.0, 0.0));
        for _ in 0..100 {
            rule.update(&mut population, node).unwrap();
        }
        assert_eq!(population.cell_type(node), 2);
    }

    #[test]
    fn certain_probability_records_transitions() {
        let mut config = Config::new();
        config.set("drift", "probability", 1.0);
        let mut rule = rule_from(&config, 4);

        let mut population = Population::new(4);
        let node = population.add_cell(0, Position::new(0.0, 0.0));
        for _ in 0..10 {
            rule.update(&mut population, node).unwrap();
        }
        let recorded: usize = population.data().transitions.iter().flatten().sum();
        assert_eq!(recorded, 10);
    }

    #[test]
    fn type_range_list_restricts_drift_targets() {
        let mut config = Config::new();
        config.set("drift", "probability", 1.0);
        config.set("drift", "types", "1-2");
        let mut rule = rule_from(&config, 4);

        let mut population = Population::new(4);
        let node = population.add_cell(0, Position::new(0.0, 0.0));
        for _ in 0..50 {
            rule.update(&mut population, node).unwrap();
            assert!(matches!(population.cell_type(node), 1 | 2));
        }
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut config = Config::new();
        config.set("drift", "probability", 1.5);
        let mut seed_rng = StdRng::seed_from_u64(1);
        assert!(DriftCell::from_config(&config, 3, &mut seed_rng).is_err());
    }

    #[test]
    fn types_outside_the_type_range_are_rejected() {
        let mut config = Config::new();
        config.set("drift", "types", "0,5");
        let mut seed_rng = StdRng::seed_from_u64(1);
        let err = DriftCell::from_config(&config, 3, &mut seed_rng).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for parameter 'drift.types'");
    }
}
