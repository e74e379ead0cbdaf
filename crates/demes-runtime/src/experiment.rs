//! Experiment — the epoch driver.
//!
//! An experiment owns the configuration, the population, the cell rule,
//! and the registered Actions. Each epoch:
//!
//! 1. The population's per-epoch data (transition matrix) is reset
//! 2. The cell rule updates every node
//! 3. Actions whose schedule window fires are dispatched in descending
//!    priority, registration order breaking ties
//! 4. The epoch counter advances
//!
//! Everything runs strictly sequentially: an Action failure aborts the
//! epoch and surfaces to the caller, which decides whether to halt the run.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use uuid::Uuid;

use demes_core::action::{Action, Context};
use demes_core::config::ConfigSource;
use demes_core::error::{ConfigError, DemesError, Result};
use demes_core::plugin::PluginKind;
use demes_core::schedule::dispatch_order;
use demes_core::topology::PopulationView;
use demes_core::types::Epoch;

use crate::catalog::{parse_plugin_request, ActionSetup, PluginCatalog};
use crate::cells::CellRule;
use crate::config::Config;
use crate::population::Population;

/// Event emitted by the experiment during simulation.
#[derive(Debug, Clone, Serialize)]
pub enum ExperimentEvent {
    /// An Action's schedule fired and its update ran.
    ActionFired { name: String },
    /// An epoch finished.
    EpochComplete { epoch: Epoch, actions_fired: usize },
}

/// Summary of the experiment's current state.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentStats {
    pub epoch: Epoch,
    pub cells: usize,
    pub edges: usize,
    pub type_counts: Vec<usize>,
    pub actions: usize,
}

struct RegisteredAction {
    action: Box<dyn Action>,
    priority: i64,
}

/// The experiment driver.
pub struct Experiment {
    id: Uuid,
    config: Config,
    population: Population,
    cell_rule: Box<dyn CellRule>,
    actions: Vec<RegisteredAction>,
    epoch: Epoch,
    epochs: Epoch,
    data_dir: PathBuf,
    event_history: Vec<(Epoch, ExperimentEvent)>,
}

impl std::fmt::Debug for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experiment")
            .field("id", &self.id)
            .field("actions", &self.actions.len())
            .field("epoch", &self.epoch)
            .field("epochs", &self.epochs)
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

impl Experiment {
    /// Build an experiment from configuration and a plugin catalog.
    ///
    /// The `[experiment]` section drives construction: `epochs` (default
    /// -1, unbounded), `max_types` (default 2), `seed` (default: from
    /// entropy), `topology` (default `lattice`), `cell` (default `drift`),
    /// and `actions`, a comma-separated list of Action plugin requests.
    /// Every requested plugin is resolved against the catalog — optionally
    /// version-constrained, e.g. `type_clusters>=1.0` — and its
    /// requirements are checked fail-fast before anything is instantiated.
    pub fn new(config: Config, catalog: &PluginCatalog, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        let epochs = config.get_int("experiment", "epochs", -1)?;
        let max_types = config.get_int("experiment", "max_types", 2)?;
        if max_types < 1 {
            return Err(DemesError::invalid_parameter("experiment", "max_types"));
        }
        let max_types = max_types as usize;

        let mut rng = match config.get("experiment", "seed") {
            Some(_) => {
                let seed = config.get_int("experiment", "seed", 0)?;
                StdRng::seed_from_u64(seed as u64)
            }
            None => StdRng::from_entropy(),
        };

        // Topology plugin builds the population graph.
        let (name, constraint) =
            parse_plugin_request(&config.get_str("experiment", "topology", "lattice"))?;
        let descriptor = catalog
            .registry()
            .resolve(PluginKind::Topology, &name, constraint.as_ref())?;
        catalog.registry().check_requirements(descriptor)?;
        let population = catalog.topology_factory(&name)?(&config, max_types, &mut rng)?;

        // Cell plugin defines per-node dynamics.
        let (name, constraint) =
            parse_plugin_request(&config.get_str("experiment", "cell", "drift"))?;
        let descriptor = catalog
            .registry()
            .resolve(PluginKind::Cell, &name, constraint.as_ref())?;
        catalog.registry().check_requirements(descriptor)?;
        let cell_rule = catalog.cell_factory(&name)?(&config, max_types, &mut rng)?;

        let mut experiment = Self {
            id: Uuid::new_v4(),
            config,
            population,
            cell_rule,
            actions: Vec::new(),
            epoch: 0,
            epochs,
            data_dir,
            event_history: Vec::new(),
        };

        // Action plugins, in configuration order (that order is the
        // priority tie-breaker).
        let requested = experiment.config.get_str("experiment", "actions", "");
        for token in requested.split(',').filter(|t| !t.trim().is_empty()) {
            let (name, constraint) = parse_plugin_request(token)?;
            let descriptor = catalog
                .registry()
                .resolve(PluginKind::Action, &name, constraint.as_ref())?;
            catalog.registry().check_requirements(descriptor)?;
            let factory = catalog.action_factory(&name)?;
            let setup = ActionSetup {
                config: &experiment.config,
                epochs: experiment.epochs,
                max_types,
                data_dir: &experiment.data_dir,
            };
            let action = factory(&setup)?;
            experiment.register_action(action);
        }

        Ok(experiment)
    }

    /// Register an already-constructed Action. Registration order is the
    /// dispatch tie-breaker among equal priorities.
    pub fn register_action(&mut self, action: Box<dyn Action>) {
        let priority = action.schedule().priority;
        self.actions.push(RegisteredAction { action, priority });
    }

    /// Run a single epoch.
    pub fn epoch(&mut self) -> Result<Vec<ExperimentEvent>> {
        let mut events = Vec::new();

        self.population.begin_epoch();

        for node in self.population.nodes() {
            self.cell_rule.update(&mut self.population, node)?;
        }

        let priorities: Vec<i64> = self.actions.iter().map(|a| a.priority).collect();
        let mut fired = 0;
        for index in dispatch_order(&priorities) {
            let entry = &mut self.actions[index];
            if !entry.action.schedule().should_run(self.epoch) {
                continue;
            }
            let ctx = Context {
                epoch: self.epoch,
                population: &self.population,
                data: self.population.data(),
            };
            entry.action.update(&ctx)?;
            fired += 1;
            events.push(ExperimentEvent::ActionFired {
                name: entry.action.name().to_string(),
            });
        }

        events.push(ExperimentEvent::EpochComplete {
            epoch: self.epoch,
            actions_fired: fired,
        });
        for event in &events {
            self.event_history.push((self.epoch, event.clone()));
        }

        self.epoch += 1;
        Ok(events)
    }

    /// Run `n` epochs.
    pub fn run(&mut self, n: Epoch) -> Result<()> {
        for _ in 0..n {
            self.epoch()?;
        }
        Ok(())
    }

    /// Run up to the configured epoch count.
    pub fn run_to_completion(&mut self) -> Result<()> {
        if self.epochs < 0 {
            return Err(DemesError::Config(ConfigError::Conflict(
                "experiment.epochs is unbounded; use run(n) instead".to_string(),
            )));
        }
        while self.epoch < self.epochs {
            self.epoch()?;
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn configured_epochs(&self) -> Epoch {
        self.epochs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn event_history(&self) -> &[(Epoch, ExperimentEvent)] {
        &self.event_history
    }

    pub fn stats(&self) -> ExperimentStats {
        ExperimentStats {
            epoch: self.epoch,
            cells: self.population.len(),
            edges: self.population.edge_count(),
            type_counts: self.population.data().type_counts.clone(),
            actions: self.actions.len(),
        }
    }

    /// The current stats as pretty-printed JSON.
    pub fn stats_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stats())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register_builtins;
    use demes_core::schedule::ScheduleWindow;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records which epochs it fired on and under which label.
    struct ProbeAction {
        name: String,
        window: ScheduleWindow,
        log: Rc<RefCell<Vec<(String, Epoch)>>>,
    }

    impl Action for ProbeAction {
        fn name(&self) -> &str {
            &self.name
        }

        fn schedule(&self) -> &ScheduleWindow {
            &self.window
        }

        fn update(&mut self, ctx: &Context<'_>) -> Result<()> {
            self.log.borrow_mut().push((self.name.clone(), ctx.epoch));
            Ok(())
        }
    }

    fn experiment_with(config: Config) -> Experiment {
        let mut catalog = PluginCatalog::new();
        register_builtins(&mut catalog).unwrap();
        let dir = tempfile::tempdir().unwrap();
        Experiment::new(config, &catalog, dir.path()).unwrap()
    }

    fn base_config() -> Config {
        let mut config = Config::new();
        config.set("experiment", "seed", 17);
        config.set("experiment", "max_types", 3);
        config.set("lattice", "width", 4);
        config.set("lattice", "height", 4);
        config
    }

    #[test]
    fn scheduled_actions_fire_on_their_window() {
        let mut experiment = experiment_with(base_config());
        let log = Rc::new(RefCell::new(Vec::new()));
        experiment.register_action(Box::new(ProbeAction {
            name: "probe".to_string(),
            window: ScheduleWindow {
                epoch_start: 3,
                epoch_end: 9,
                frequency: 2,
                priority: 0,
            },
            log: Rc::clone(&log),
        }));

        experiment.run(12).unwrap();
        let epochs: Vec<Epoch> = log.borrow().iter().map(|(_, e)| *e).collect();
        assert_eq!(epochs, vec![3, 5, 7, 9]);
    }

    #[test]
    fn dispatch_respects_priority_then_registration() {
        let mut experiment = experiment_with(base_config());
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, priority) in [("a", 5), ("b", 0), ("c", 5), ("d", -1)] {
            experiment.register_action(Box::new(ProbeAction {
                name: name.to_string(),
                window: ScheduleWindow {
                    priority,
                    ..ScheduleWindow::default()
                },
                log: Rc::clone(&log),
            }));
        }

        experiment.run(1).unwrap();
        let order: Vec<String> = log.borrow().iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(order, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn default_window_fires_at_epoch_zero() {
        let mut experiment = experiment_with(base_config());
        let log = Rc::new(RefCell::new(Vec::new()));
        experiment.register_action(Box::new(ProbeAction {
            name: "probe".to_string(),
            window: ScheduleWindow::default(),
            log: Rc::clone(&log),
        }));

        experiment.run(1).unwrap();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].1, 0);
    }

    #[test]
    fn run_to_completion_needs_a_bounded_epoch_count() {
        let mut config = base_config();
        let mut experiment = experiment_with(config.clone());
        assert!(experiment.run_to_completion().is_err());

        config.set("experiment", "epochs", 5);
        let mut experiment = experiment_with(config);
        experiment.run_to_completion().unwrap();
        assert_eq!(experiment.current_epoch(), 5);
    }

    #[test]
    fn unknown_topology_is_a_topology_not_found_error() {
        let mut config = base_config();
        config.set("experiment", "topology", "moebius");
        let mut catalog = PluginCatalog::new();
        register_builtins(&mut catalog).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = Experiment::new(config, &catalog, dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "Topology type 'moebius' not found");
    }

    #[test]
    fn overconstrained_cell_version_fails_resolution() {
        let mut config = base_config();
        config.set("experiment", "cell", "drift >=9.0");
        let mut catalog = PluginCatalog::new();
        register_builtins(&mut catalog).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = Experiment::new(config, &catalog, dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "Plugin 'drift' version >=9.0.0 not found");
    }

    #[test]
    fn drift_population_stays_partitioned() {
        let mut config = base_config();
        config.set("drift", "probability", 0.5);
        let mut experiment = experiment_with(config);
        experiment.run(10).unwrap();

        let stats = experiment.stats();
        assert_eq!(stats.cells, 16);
        assert_eq!(stats.type_counts.iter().sum::<usize>(), 16);

        let json = experiment.stats_json().unwrap();
        assert!(json.contains("\"cells\": 16"));
    }
}
