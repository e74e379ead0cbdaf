//! The Action contract and the experiment context handed to it.
//!
//! An Action is a pluggable unit of work executed on a schedule during
//! epochs — observation, mutation, or reporting. The experiment driver
//! consults each Action's [`ScheduleWindow`] once per epoch and, for those
//! that fire, calls [`Action::update`] with an explicit [`Context`] instead
//! of any global experiment state.

use crate::error::Result;
use crate::schedule::ScheduleWindow;
use crate::topology::PopulationView;
use crate::types::{CellType, Epoch};

/// Per-epoch data the population derives for its observers: how many cells
/// of each type exist, and how many type transitions happened this epoch.
#[derive(Debug, Clone)]
pub struct ExperimentData {
    /// Cells per type, indexed by type.
    pub type_counts: Vec<usize>,
    /// `transitions[from][to]` type changes recorded this epoch.
    pub transitions: Vec<Vec<usize>>,
}

impl ExperimentData {
    pub fn new(max_types: usize) -> Self {
        Self {
            type_counts: vec![0; max_types],
            transitions: vec![vec![0; max_types]; max_types],
        }
    }

    pub fn record_transition(&mut self, from: CellType, to: CellType) {
        self.transitions[from][to] += 1;
    }

    /// Zero the transition matrix at the start of an epoch.
    pub fn clear_transitions(&mut self) {
        for row in &mut self.transitions {
            row.fill(0);
        }
    }
}

/// Everything an Action may read during one update: the current epoch, a
/// frozen view of the population graph, and the epoch's derived data.
pub struct Context<'a> {
    pub epoch: Epoch,
    pub population: &'a dyn PopulationView,
    pub data: &'a ExperimentData,
}

/// A pluggable unit of scheduled work.
pub trait Action {
    /// The Action's plugin name (also its config section).
    fn name(&self) -> &str;

    /// The Action's epoch window, fixed at construction.
    fn schedule(&self) -> &ScheduleWindow;

    /// Execute one update. Called only on epochs where
    /// `self.schedule().should_run(ctx.epoch)` holds.
    fn update(&mut self, ctx: &Context<'_>) -> Result<()>;
}
