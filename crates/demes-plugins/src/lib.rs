//! # demes Plugins
//!
//! Stock Action plugins for the demes simulation engine.
//!
//! Each Action observes the population once per scheduled epoch and writes
//! one row (or, for snapshots, one file) to the experiment's data
//! directory:
//!
//! - **type_count** — cells per type
//! - **type_transitions** — the per-epoch type-transition matrix
//! - **type_clusters** — same-type cluster counts and size statistics
//! - **graph_properties** — degree, clustering, diameter, components
//! - **cell_locations** — full coordinate snapshots, one file per firing
//!
//! All five read their schedule and output options from the config section
//! named after them; [`register_stock_plugins`] puts them in a catalog.

pub mod cell_locations;
pub mod graph_properties;
pub mod graph_stats;
pub mod type_clusters;
pub mod type_count;
pub mod type_transitions;

use demes_core::error::Result;
use demes_runtime::catalog::PluginCatalog;

pub use cell_locations::CellLocationsAction;
pub use graph_properties::GraphPropertiesAction;
pub use type_clusters::TypeClustersAction;
pub use type_count::TypeCountAction;
pub use type_transitions::TypeTransitionsAction;

/// Register every stock Action plugin.
pub fn register_stock_plugins(catalog: &mut PluginCatalog) -> Result<()> {
    catalog.register_action(TypeCountAction::descriptor(), TypeCountAction::from_config)?;
    catalog.register_action(
        TypeTransitionsAction::descriptor(),
        TypeTransitionsAction::from_config,
    )?;
    catalog.register_action(
        TypeClustersAction::descriptor(),
        TypeClustersAction::from_config,
    )?;
    catalog.register_action(
        GraphPropertiesAction::descriptor(),
        GraphPropertiesAction::from_config,
    )?;
    catalog.register_action(
        CellLocationsAction::descriptor(),
        CellLocationsAction::from_config,
    )?;
    Ok(())
}
