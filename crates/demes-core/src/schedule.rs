//! Epoch-window scheduling for Actions.
//!
//! Every Action carries a [`ScheduleWindow`] fixed at construction time.
//! Each epoch, the experiment driver asks the window whether the Action
//! fires; Actions sharing an epoch are dispatched in descending priority,
//! with registration order breaking ties.

use serde::{Deserialize, Serialize};

use crate::config::ConfigSource;
use crate::error::{DemesError, Result};
use crate::types::Epoch;

/// When and how often an Action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    /// First epoch the Action may fire (>= 0).
    pub epoch_start: Epoch,
    /// Last epoch the Action may fire; -1 means unbounded.
    pub epoch_end: Epoch,
    /// Fire every `frequency` epochs, counted from `epoch_start` (>= 1).
    pub frequency: Epoch,
    /// Higher-priority Actions run first within an epoch.
    pub priority: i64,
}

impl Default for ScheduleWindow {
    fn default() -> Self {
        Self {
            epoch_start: 0,
            epoch_end: -1,
            frequency: 1,
            priority: 0,
        }
    }
}

impl ScheduleWindow {
    /// Whether the Action fires on `epoch`.
    ///
    /// A window whose start lies past its (non-negative) end never fires;
    /// that is a valid no-op configuration, not an error. Epoch 0 is not
    /// special-cased: a default window fires there because `epoch_start`
    /// defaults to 0.
    pub fn should_run(&self, epoch: Epoch) -> bool {
        let below_start = epoch < self.epoch_start;
        let past_end = self.epoch_end >= 0 && epoch > self.epoch_end;
        let off_frequency = (epoch - self.epoch_start) % self.frequency != 0;
        !(below_start || past_end || off_frequency)
    }

    /// Build a window from an Action's config section.
    ///
    /// Recognized keys and defaults: `epoch_start` (0), `epoch_end`
    /// (`default_end`, usually the experiment's epoch count or -1),
    /// `frequency` (1), `priority` (0).
    pub fn from_config(
        config: &dyn ConfigSource,
        section: &str,
        default_end: Epoch,
    ) -> Result<Self> {
        let window = Self {
            epoch_start: config.get_int(section, "epoch_start", 0)?,
            epoch_end: config.get_int(section, "epoch_end", default_end)?,
            frequency: config.get_int(section, "frequency", 1)?,
            priority: config.get_int(section, "priority", 0)?,
        };
        if window.epoch_start < 0 {
            return Err(DemesError::invalid_parameter(section, "epoch_start"));
        }
        if window.frequency < 1 {
            return Err(DemesError::invalid_parameter(section, "frequency"));
        }
        Ok(window)
    }
}

/// Dispatch order for a set of Actions sharing an epoch.
///
/// Returns indices into `priorities` sorted by descending priority; the
/// sort is stable, so equal priorities keep their registration order.
pub fn dispatch_order(priorities: &[i64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..priorities.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(priorities[i]));
    order
}
