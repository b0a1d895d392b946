use std::collections::HashMap;

use crate::network::{MetroGraph, StationId};

pub mod bfs;
pub mod delay;
pub mod dijkstra;

pub use bfs::HopCountFinder;
pub use delay::{DelayReport, apply_random_delay};
pub use dijkstra::{Metric, WeightedFinder};

/// A path-search strategy over the metro graph.
pub trait PathFinder {
    /// Returns the stations from `source` to `destination` inclusive, optimal
    /// under this finder's criterion, or an empty vec when no path exists.
    /// `source == destination` yields the singleton path when the station is
    /// part of the graph.
    fn find_path(
        &self,
        graph: &MetroGraph,
        source: StationId,
        destination: StationId,
    ) -> Vec<StationId>;
}

/// Walks parent links back from the destination, then reverses. The source
/// is the one station without a parent entry.
fn reconstruct_path(
    parents: &HashMap<StationId, StationId>,
    destination: StationId,
) -> Vec<StationId> {
    let mut path = vec![destination];
    let mut current = destination;

    while let Some(&parent) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}
