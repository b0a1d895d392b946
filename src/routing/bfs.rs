use std::collections::{HashMap, HashSet, VecDeque};

use crate::network::{MetroGraph, StationId};
use crate::routing::{PathFinder, reconstruct_path};

/// Minimizes the number of stops travelled, ignoring every edge weight.
///
/// Equal-hop ties resolve to whichever station was reached first, which
/// follows adjacency insertion order.
pub struct HopCountFinder;

impl PathFinder for HopCountFinder {
    fn find_path(
        &self,
        graph: &MetroGraph,
        source: StationId,
        destination: StationId,
    ) -> Vec<StationId> {
        if !graph.contains(source) || !graph.contains(destination) {
            return Vec::new();
        }

        let mut parents = HashMap::new();
        let mut visited = HashSet::from([source]);
        let mut frontier = VecDeque::from([source]);

        while let Some(current) = frontier.pop_front() {
            if current == destination {
                return reconstruct_path(&parents, destination);
            }

            for edge in graph.adjacent(current) {
                let neighbor = edge.destination();
                if visited.insert(neighbor) {
                    parents.insert(neighbor, current);
                    frontier.push_back(neighbor);
                }
            }
        }

        Vec::new()
    }
}
