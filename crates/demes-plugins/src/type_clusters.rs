//! Report statistics about the same-type clusters in the population.

use demes_core::action::{Action, Context};
use demes_core::cluster::{ClusterAnalyzer, ClusterReport, SeedPolicy};
use demes_core::config::ConfigSource;
use demes_core::error::Result;
use demes_core::plugin::{PluginDescriptor, PluginKind, Requirement, ENGINE_NAME};
use demes_core::schedule::ScheduleWindow;
use demes_core::version::{Constraint, Version, VersionOp};
use demes_runtime::catalog::ActionSetup;
use demes_runtime::datafile::{data_path, CsvFile};

/// Writes one row per firing: the number of clusters of each cell type and
/// the mean and standard deviation of their sizes, plus the same three
/// statistics over all clusters regardless of type.
///
/// Section `[type_clusters]`: the schedule keys plus `filename` (default
/// `type_clusters.csv`), `header` (default true), and `seed` (optional;
/// fixes the analyzer's seed-selection RNG for reproducible runs — the
/// statistics do not depend on it, only internal traversal order does).
pub struct TypeClustersAction {
    window: ScheduleWindow,
    writer: CsvFile,
    analyzer: ClusterAnalyzer,
}

impl TypeClustersAction {
    pub const NAME: &'static str = "type_clusters";

    pub fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new(Self::NAME, PluginKind::Action, Version::new(1, 0, 0))
            .with_description(
                "Report the number and size of same-type clusters in the population",
            )
            .with_requirement(Requirement::new(
                ENGINE_NAME,
                Constraint::new(VersionOp::GreaterEqual, Version::new(1, 0, 0)),
            ))
    }

    pub fn from_config(setup: &ActionSetup<'_>) -> Result<Box<dyn Action>> {
        let window = ScheduleWindow::from_config(setup.config, Self::NAME, setup.epochs)?;
        let filename = setup
            .config
            .get_str(Self::NAME, "filename", "type_clusters.csv");
        let header = setup.config.get_bool(Self::NAME, "header", true)?;

        let policy = match setup.config.get(Self::NAME, "seed") {
            Some(_) => {
                let seed = setup.config.get_int(Self::NAME, "seed", 0)?;
                SeedPolicy::random_seeded(seed as u64)
            }
            None => SeedPolicy::random(),
        };

        let mut fieldnames = vec!["epoch".to_string()];
        fieldnames.extend(ClusterReport::columns(setup.max_types));

        let path = data_path(setup.data_dir, &filename)?;
        let writer = CsvFile::create(&path, &fieldnames, header)?;
        Ok(Box::new(Self {
            window,
            writer,
            analyzer: ClusterAnalyzer::new(policy),
        }))
    }
}

impl Action for TypeClustersAction {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self) -> &ScheduleWindow {
        &self.window
    }

    fn update(&mut self, ctx: &Context<'_>) -> Result<()> {
        let report = self.analyzer.analyze(ctx.population);
        let mut row = vec![ctx.epoch.to_string()];
        row.extend(report.row());
        self.writer.write_row(&row)
    }
}
