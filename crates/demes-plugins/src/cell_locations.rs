//! Report the coordinates and type of every cell.

use std::path::PathBuf;

use demes_core::action::{Action, Context};
use demes_core::config::ConfigSource;
use demes_core::error::Result;
use demes_core::plugin::{PluginDescriptor, PluginKind, Requirement, ENGINE_NAME};
use demes_core::schedule::ScheduleWindow;
use demes_core::topology::PopulationView;
use demes_core::version::{Constraint, Version, VersionOp};
use demes_runtime::catalog::ActionSetup;
use demes_runtime::datafile::{data_path, CsvFile};

/// Writes a full population snapshot per firing: one row per cell with its
/// coordinates and type, to an epoch-stamped file.
///
/// Section `[cell_locations]`: the schedule keys plus `filename` (the base
/// name, default `cell_locations`; firing at epoch 1200 produces
/// `cell_locations-001200.csv`) and `header` (default true).
pub struct CellLocationsAction {
    window: ScheduleWindow,
    data_dir: PathBuf,
    filename: String,
    header: bool,
}

impl CellLocationsAction {
    pub const NAME: &'static str = "cell_locations";

    pub fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new(Self::NAME, PluginKind::Action, Version::new(1, 0, 0))
            .with_description("Report the coordinates of each cell and its type")
            .with_requirement(Requirement::new(
                ENGINE_NAME,
                Constraint::new(VersionOp::GreaterEqual, Version::new(1, 0, 0)),
            ))
    }

    pub fn from_config(setup: &ActionSetup<'_>) -> Result<Box<dyn Action>> {
        let window = ScheduleWindow::from_config(setup.config, Self::NAME, setup.epochs)?;
        let filename = setup.config.get_str(Self::NAME, "filename", "cell_locations");
        let header = setup.config.get_bool(Self::NAME, "header", true)?;
        Ok(Box::new(Self {
            window,
            data_dir: setup.data_dir.to_path_buf(),
            filename,
            header,
        }))
    }
}

impl Action for CellLocationsAction {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self) -> &ScheduleWindow {
        &self.window
    }

    fn update(&mut self, ctx: &Context<'_>) -> Result<()> {
        let fieldnames: Vec<String> = ["epoch", "cell_id", "node_id", "x", "y", "type"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let path = data_path(
            &self.data_dir,
            &format!("{}-{:06}.csv", self.filename, ctx.epoch),
        )?;
        let mut writer = CsvFile::create(&path, &fieldnames, self.header)?;

        for node in ctx.population.nodes() {
            let position = ctx.population.position(node);
            let row = vec![
                ctx.epoch.to_string(),
                ctx.population.cell_id(node).0.to_string(),
                node.0.to_string(),
                position.x.to_string(),
                position.y.to_string(),
                ctx.population.cell_type(node).to_string(),
            ];
            writer.write_row(&row)?;
        }
        Ok(())
    }
}
