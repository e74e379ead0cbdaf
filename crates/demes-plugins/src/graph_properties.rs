//! Report structural measures of the population graph.
//!
//! Computing the diameter walks the graph once per node, so this Action
//! can take considerable time on large topologies.

use demes_core::action::{Action, Context};
use demes_core::config::ConfigSource;
use demes_core::error::Result;
use demes_core::plugin::{PluginDescriptor, PluginKind, Requirement, ENGINE_NAME};
use demes_core::schedule::ScheduleWindow;
use demes_core::stats::{mean, std_dev};
use demes_core::topology::PopulationView;
use demes_core::version::{Constraint, Version, VersionOp};
use demes_runtime::catalog::ActionSetup;
use demes_runtime::datafile::{data_path, CsvFile};

use crate::graph_stats;

/// Writes one row per firing: node and edge counts, degree statistics,
/// average clustering coefficient, diameter, and the number of connected
/// components.
///
/// Section `[graph_properties]`: the schedule keys plus `filename`
/// (default `graph_properties.csv`) and `header` (default true).
pub struct GraphPropertiesAction {
    window: ScheduleWindow,
    writer: CsvFile,
}

impl GraphPropertiesAction {
    pub const NAME: &'static str = "graph_properties";

    pub fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new(Self::NAME, PluginKind::Action, Version::new(1, 0, 0))
            .with_description("Report structural measures of the population graph")
            .with_requirement(Requirement::new(
                ENGINE_NAME,
                Constraint::new(VersionOp::GreaterEqual, Version::new(1, 0, 0)),
            ))
    }

    pub fn from_config(setup: &ActionSetup<'_>) -> Result<Box<dyn Action>> {
        let window = ScheduleWindow::from_config(setup.config, Self::NAME, setup.epochs)?;
        let filename = setup
            .config
            .get_str(Self::NAME, "filename", "graph_properties.csv");
        let header = setup.config.get_bool(Self::NAME, "header", true)?;

        let fieldnames: Vec<String> = [
            "epoch",
            "nodes",
            "edges",
            "avg_degree",
            "std_degree",
            "avg_clustering_coefficient",
            "diameter",
            "num_connected_components",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let path = data_path(setup.data_dir, &filename)?;
        let writer = CsvFile::create(&path, &fieldnames, header)?;
        Ok(Box::new(Self { window, writer }))
    }
}

impl Action for GraphPropertiesAction {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self) -> &ScheduleWindow {
        &self.window
    }

    fn update(&mut self, ctx: &Context<'_>) -> Result<()> {
        let view = ctx.population;
        let degrees = graph_stats::degrees(view);
        let edges: usize = (degrees.iter().sum::<f64>() / 2.0) as usize;

        let row = vec![
            ctx.epoch.to_string(),
            view.len().to_string(),
            edges.to_string(),
            mean(&degrees).to_string(),
            std_dev(&degrees).to_string(),
            graph_stats::average_clustering(view).to_string(),
            graph_stats::diameter(view).to_string(),
            graph_stats::connected_components(view).to_string(),
        ];
        self.writer.write_row(&row)
    }
}
