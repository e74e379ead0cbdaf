//! Report the number of transitions between cell types.

use demes_core::action::{Action, Context};
use demes_core::config::ConfigSource;
use demes_core::error::Result;
use demes_core::plugin::{PluginDescriptor, PluginKind, Requirement, ENGINE_NAME};
use demes_core::schedule::ScheduleWindow;
use demes_core::version::{Constraint, Version, VersionOp};
use demes_runtime::catalog::ActionSetup;
use demes_runtime::datafile::{data_path, CsvFile};

/// Writes one row per firing: the epoch and the `from->to` transition
/// counts recorded during that epoch. Epoch 0 reports all zeros — no
/// transitions can have happened before the first epoch ran.
///
/// Section `[type_transitions]`: the schedule keys plus `filename`
/// (default `type_transitions.csv`) and `header` (default true).
pub struct TypeTransitionsAction {
    window: ScheduleWindow,
    writer: CsvFile,
    max_types: usize,
}

impl TypeTransitionsAction {
    pub const NAME: &'static str = "type_transitions";

    pub fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new(Self::NAME, PluginKind::Action, Version::new(1, 0, 0))
            .with_description("Report the number of transitions between each pair of cell types")
            .with_requirement(Requirement::new(
                ENGINE_NAME,
                Constraint::new(VersionOp::GreaterEqual, Version::new(1, 0, 0)),
            ))
    }

    pub fn from_config(setup: &ActionSetup<'_>) -> Result<Box<dyn Action>> {
        let window = ScheduleWindow::from_config(setup.config, Self::NAME, setup.epochs)?;
        let filename = setup
            .config
            .get_str(Self::NAME, "filename", "type_transitions.csv");
        let header = setup.config.get_bool(Self::NAME, "header", true)?;

        let mut fieldnames = vec!["epoch".to_string()];
        for from in 0..setup.max_types {
            for to in 0..setup.max_types {
                fieldnames.push(format!("{}->{}", from, to));
            }
        }

        let path = data_path(setup.data_dir, &filename)?;
        let writer = CsvFile::create(&path, &fieldnames, header)?;
        Ok(Box::new(Self {
            window,
            writer,
            max_types: setup.max_types,
        }))
    }
}

impl Action for TypeTransitionsAction {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn schedule(&self) -> &ScheduleWindow {
        &self.window
    }

    fn update(&mut self, ctx: &Context<'_>) -> Result<()> {
        let mut row = vec![ctx.epoch.to_string()];
        if ctx.epoch == 0 {
            row.extend(std::iter::repeat("0".to_string()).take(self.max_types * self.max_types));
        } else {
            for from in 0..self.max_types {
                for to in 0..self.max_types {
                    row.push(ctx.data.transitions[from][to].to_string());
                }
            }
        }
        self.writer.write_row(&row)
    }
}
