//! # demes Core
//!
//! Core contracts and types for the demes simulation engine.
//!
//! demes simulates a population of typed cells arranged on a graph
//! topology, advanced one discrete epoch at a time, and observed or
//! mutated by independently loadable plugins. This crate holds the
//! machinery that keeps that plugin model safe:
//!
//! - **version** — `major.minor.patch` triples and the
//!   `<op><version>` constraint grammar plugins use to declare
//!   requirements
//! - **plugin** — descriptors, the registry, version resolution, and
//!   fail-fast requirement checking
//! - **schedule** — per-Action epoch windows and priority-ordered dispatch
//! - **cluster** — flood-fill partitioning of the population graph into
//!   same-type clusters, with summary statistics
//! - **rangelist** — the auxiliary `1,3-5,9` integer range-list grammar
//!
//! The surrounding experiment runtime supplies the capabilities the core
//! consumes: a [`topology::PopulationView`] of the population graph and a
//! [`config::ConfigSource`] for parameter lookup.
//!
//! ## Quick Start
//!
//! ```rust
//! use demes_core::prelude::*;
//!
//! // Parse a version constraint and test a candidate against it
//! let constraint: Constraint = ">=1.1".parse().unwrap();
//! assert!(constraint.satisfied_by(Version::new(2, 0, 0)));
//!
//! // Decide whether an Action fires on epoch 6
//! let window = ScheduleWindow { epoch_start: 0, epoch_end: -1, frequency: 3, priority: 0 };
//! assert!(window.should_run(6));
//! ```

pub mod action;
pub mod cluster;
pub mod config;
pub mod error;
pub mod plugin;
pub mod rangelist;
pub mod schedule;
pub mod stats;
pub mod topology;
pub mod types;
pub mod version;
pub mod prelude;
