//! Built-in topology builders.
//!
//! A Topology plugin constructs the population graph: it decides how many
//! nodes exist, how they are connected, and where they sit in coordinate
//! space. Initial cell types are drawn uniformly from the experiment's type
//! range using the experiment RNG, so a seeded run reproduces its starting
//! population.

use rand::rngs::StdRng;
use rand::Rng;

use demes_core::config::ConfigSource;
use demes_core::error::{DemesError, Result};
use demes_core::types::Position;

use crate::config::Config;
use crate::population::Population;

/// Constructor signature for Topology plugins.
pub type TopologyFactory = fn(&Config, usize, &mut StdRng) -> Result<Population>;

/// Build a 2-D lattice with 4-neighbor adjacency.
///
/// Section `[lattice]`: `width` (default 10), `height` (default 10),
/// `periodic` (default true; wraps the lattice into a torus). Node
/// coordinates are the integer grid positions.
pub fn build_lattice(config: &Config, max_types: usize, rng: &mut StdRng) -> Result<Population> {
    let width = config.get_int("lattice", "width", 10)?;
    let height = config.get_int("lattice", "height", 10)?;
    let periodic = config.get_bool("lattice", "periodic", true)?;
    if width < 1 {
        return Err(DemesError::invalid_parameter("lattice", "width"));
    }
    if height < 1 {
        return Err(DemesError::invalid_parameter("lattice", "height"));
    }
    let (width, height) = (width as usize, height as usize);

    let mut population = Population::new(max_types);
    let mut nodes = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let cell_type = rng.gen_range(0..max_types);
            nodes.push(population.add_cell(cell_type, Position::new(col as f64, row as f64)));
        }
    }

    for row in 0..height {
        for col in 0..width {
            let here = nodes[row * width + col];
            // Right neighbor
            if col + 1 < width {
                population.connect(here, nodes[row * width + col + 1])?;
            } else if periodic && width > 1 {
                population.connect(here, nodes[row * width])?;
            }
            // Down neighbor
            if row + 1 < height {
                population.connect(here, nodes[(row + 1) * width + col])?;
            } else if periodic && height > 1 {
                population.connect(here, nodes[col])?;
            }
        }
    }

    Ok(population)
}

/// Build a well-mixed population: every node adjacent to every other.
///
/// Section `[well_mixed]`: `size` (default 100). Node coordinates are
/// uniform random in the unit square; adjacency carries no spatial meaning
/// here, but location reports still need somewhere to put each cell.
pub fn build_well_mixed(config: &Config, max_types: usize, rng: &mut StdRng) -> Result<Population> {
    let size = config.get_int("well_mixed", "size", 100)?;
    if size < 1 {
        return Err(DemesError::invalid_parameter("well_mixed", "size"));
    }
    let size = size as usize;

    let mut population = Population::new(max_types);
    let nodes: Vec<_> = (0..size)
        .map(|_| {
            let cell_type = rng.gen_range(0..max_types);
            let position = Position::new(rng.gen::<f64>(), rng.gen::<f64>());
            population.add_cell(cell_type, position)
        })
        .collect();

    for i in 0..size {
        for j in (i + 1)..size {
            population.connect(nodes[i], nodes[j])?;
        }
    }

    Ok(population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use demes_core::topology::PopulationView;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn periodic_lattice_is_4_regular() {
        let mut config = Config::new();
        config.set("lattice", "width", 5);
        config.set("lattice", "height", 4);
        let population = build_lattice(&config, 2, &mut rng()).unwrap();
        assert_eq!(population.len(), 20);
        assert_eq!(population.edge_count(), 40);
        for node in population.nodes() {
            assert_eq!(population.neighbors(node).len(), 4);
        }
    }

    #[test]
    fn bounded_lattice_has_fewer_edges_at_the_rim() {
        let mut config = Config::new();
        config.set("lattice", "width", 3);
        config.set("lattice", "height", 3);
        config.set("lattice", "periodic", false);
        let population = build_lattice(&config, 2, &mut rng()).unwrap();
        assert_eq!(population.len(), 9);
        // 2 * 3 horizontal rows of 2 + vertical likewise
        assert_eq!(population.edge_count(), 12);
        let corner = population.nodes()[0];
        assert_eq!(population.neighbors(corner).len(), 2);
    }

    #[test]
    fn well_mixed_is_complete() {
        let mut config = Config::new();
        config.set("well_mixed", "size", 7);
        let population = build_well_mixed(&config, 3, &mut rng()).unwrap();
        assert_eq!(population.len(), 7);
        assert_eq!(population.edge_count(), 21);
        for node in population.nodes() {
            assert_eq!(population.neighbors(node).len(), 6);
        }
    }

    #[test]
    fn invalid_dimensions_name_the_parameter() {
        let mut config = Config::new();
        config.set("lattice", "width", 0);
        let err = build_lattice(&config, 2, &mut rng()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter 'lattice.width'"
        );
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let config = Config::new();
        let a = build_lattice(&config, 4, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = build_lattice(&config, 4, &mut StdRng::seed_from_u64(3)).unwrap();
        for node in a.nodes() {
            assert_eq!(a.cell_type(node), b.cell_type(node));
        }
    }
}
