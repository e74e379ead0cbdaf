//! Report the number of cells of each type.

use demes_core::action::{Action, Context};
use demes_core::config::ConfigSource;
use demes_core::error::Result;
use demes_core::plugin::{PluginDescriptor, PluginKind, Requirement, ENGINE_NAME};
use demes_core::schedule::ScheduleWindow;
use demes_core::version::{Constraint, Version, VersionOp};
use demes_runtime::catalog::ActionSetup;
use demes_runtime::datafile::{data_path, CsvFile};

/// Writes one row per firing: the epoch and the cell count of every type.
///
/// Section `[type_count]`: the schedule keys (`epoch_start`, `epoch_end`,
/// `frequency`, `priority`) plus `filename` (default `type_count.csv`) and
/// `header` (default true).
pub struct TypeCountAction {
    window: ScheduleWindow,
    writer: CsvFile,
}

impl TypeCountAction {
    pub const NAME: &'static str = "type_count";

    pub fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new(Self::NAME, PluginKind::Action, Version::new(1, 0, 0))
            .with_description("Report the number of cells of each cell type")
            .with_requirement(Requirement::new(
                ENGINE_NAME,
                Constraint::new(VersionOp::GreaterEqual, Version::new(1, 0, 0)),
            ))
    }

    pub fn from_config(setup: &ActionSetup<'_>) -> Result<Box<dyn Action>> {
        let window = ScheduleWindow::from_config(setup.config, Self::NAME, setup.epochs)?;
        let filename = setup.config.get_str(Self::NAME, "filename", "type_count.csv");
        let header = setup.config.get_bool(Self::NAME, "header", true)?;

        let mut fieldnames = vec!["epoch".to_string()];
        fieldnames.extend((0..setup.max_types).map(|t| t.to_string()));

        let path = data_path(setup.data_dir, &filename)?;
        let writer = CsvFile::create(&path, &fieldnames, header)?;
        Ok(Box::new(Self { window, writer }))
    }
}

impl Action for TypeCountAction {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self) -> &ScheduleWindow {
        &self.window
    }

    fn update(&mut self, ctx: &Context<'_>) -> Result<()> {
        let mut row = vec![ctx.epoch.to_string()];
        row.extend(ctx.data.type_counts.iter().map(|c| c.to_string()));
        self.writer.write_row(&row)
    }
}
