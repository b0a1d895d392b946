use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use crate::network::{MetroGraph, StationId};
use crate::routing::{PathFinder, reconstruct_path};

/// Criterion a weighted search minimizes. `Time` weighs edges by effective
/// time, i.e. scheduled time plus the delay in force when the query runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Distance,
    Time,
}

impl Metric {
    fn select(self, totals: Totals) -> u64 {
        match self {
            Metric::Distance => totals.distance,
            Metric::Time => totals.time,
        }
    }
}

/// Cumulative cost of the best path found to a station so far. Both fields
/// are kept up to date no matter which metric drives the search, so the
/// winning path can report its distance and its time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub distance: u64,
    pub time: u64,
}

/// Dijkstra over a single metric.
///
/// Heap entries carry the cost known at push time; when a station's best
/// cost later improves it is pushed again, and entries that no longer match
/// the best-known cost are skipped on pop. Absence from the cost map stands
/// in for infinity, so there is no sentinel arithmetic to overflow.
pub struct WeightedFinder {
    metric: Metric,
}

impl WeightedFinder {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    /// Like [`PathFinder::find_path`], but also reports the cumulative
    /// distance and time along the returned path.
    pub fn find_path_with_totals(
        &self,
        graph: &MetroGraph,
        source: StationId,
        destination: StationId,
    ) -> Option<(Vec<StationId>, Totals)> {
        if !graph.contains(source) || !graph.contains(destination) {
            return None;
        }

        let mut best: HashMap<StationId, Totals> = HashMap::from([(source, Totals::default())]);
        let mut parents = HashMap::new();
        let mut heap = BinaryHeap::from([Reverse((0u64, source))]);

        while let Some(Reverse((cost, current))) = heap.pop() {
            // Every queued station has a best entry; a mismatched cost means
            // this entry went stale after a later improvement.
            let totals = best[&current];
            if cost > self.metric.select(totals) {
                continue;
            }

            if current == destination {
                return Some((reconstruct_path(&parents, destination), totals));
            }

            for edge in graph.adjacent(current) {
                let neighbor = edge.destination();
                let candidate = Totals {
                    distance: totals.distance + u64::from(edge.distance()),
                    time: totals.time + u64::from(edge.effective_time()),
                };
                let candidate_cost = self.metric.select(candidate);

                let improved = best
                    .get(&neighbor)
                    .is_none_or(|&known| candidate_cost < self.metric.select(known));

                if improved {
                    best.insert(neighbor, candidate);
                    parents.insert(neighbor, current);
                    heap.push(Reverse((candidate_cost, neighbor)));
                }
            }
        }

        None
    }
}

impl PathFinder for WeightedFinder {
    fn find_path(
        &self,
        graph: &MetroGraph,
        source: StationId,
        destination: StationId,
    ) -> Vec<StationId> {
        self.find_path_with_totals(graph, source, destination)
            .map(|(path, _)| path)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<StationId> {
        (0..n).map(StationId::new).collect()
    }

    /// A-B (2 km, 3 min), B-C (5 km, 4 min), direct A-C (10 km, 3 min).
    fn triangle() -> (MetroGraph, Vec<StationId>) {
        let mut graph = MetroGraph::new();
        let s = ids(3);
        graph.add_edge(s[0], s[1], 2, 3, false, 10);
        graph.add_edge(s[1], s[2], 5, 4, false, 10);
        graph.add_edge(s[0], s[2], 10, 3, false, 10);
        (graph, s)
    }

    #[test]
    fn distance_metric_prefers_two_hop_route() {
        let (graph, s) = triangle();
        let finder = WeightedFinder::new(Metric::Distance);

        let (path, totals) = finder.find_path_with_totals(&graph, s[0], s[2]).unwrap();
        assert_eq!(path, vec![s[0], s[1], s[2]]);
        assert_eq!(totals.distance, 7);
        assert_eq!(totals.time, 7);
    }

    #[test]
    fn time_metric_prefers_direct_route() {
        let (graph, s) = triangle();
        let finder = WeightedFinder::new(Metric::Time);

        let (path, totals) = finder.find_path_with_totals(&graph, s[0], s[2]).unwrap();
        assert_eq!(path, vec![s[0], s[2]]);
        assert_eq!(totals.time, 3);
        assert_eq!(totals.distance, 10);
    }

    #[test]
    fn delay_reroutes_time_but_not_distance() {
        let (graph, s) = triangle();
        graph.edge_between(s[0], s[2]).unwrap().set_delay(6);

        let (path, totals) = WeightedFinder::new(Metric::Time)
            .find_path_with_totals(&graph, s[0], s[2])
            .unwrap();
        assert_eq!(path, vec![s[0], s[1], s[2]]);
        assert_eq!(totals.time, 7);

        let (path, totals) = WeightedFinder::new(Metric::Distance)
            .find_path_with_totals(&graph, s[0], s[2])
            .unwrap();
        assert_eq!(path, vec![s[0], s[1], s[2]]);
        assert_eq!(totals.distance, 7);
    }

    #[test]
    fn delayed_edge_still_taken_when_cheapest_adds_exact_delay() {
        let mut graph = MetroGraph::new();
        let s = ids(2);
        graph.add_edge(s[0], s[1], 1, 10, false, 0);

        let before = WeightedFinder::new(Metric::Time)
            .find_path_with_totals(&graph, s[0], s[1])
            .unwrap()
            .1;
        graph.edge_between(s[0], s[1]).unwrap().set_delay(6);
        let after = WeightedFinder::new(Metric::Time)
            .find_path_with_totals(&graph, s[0], s[1])
            .unwrap()
            .1;

        assert_eq!(after.time, before.time + 6);
    }

    #[test]
    fn requeues_station_when_its_cost_improves() {
        // s[1] is first queued at cost 10 via the direct edge, then improved
        // to 2 via s[2] while already in the heap. The stale entry must not
        // win, nor poison later expansion.
        let mut graph = MetroGraph::new();
        let s = ids(4);
        graph.add_edge(s[0], s[1], 10, 10, false, 0);
        graph.add_edge(s[0], s[2], 1, 1, false, 0);
        graph.add_edge(s[2], s[1], 1, 1, false, 0);
        graph.add_edge(s[1], s[3], 1, 1, false, 0);

        let (path, totals) = WeightedFinder::new(Metric::Distance)
            .find_path_with_totals(&graph, s[0], s[3])
            .unwrap();
        assert_eq!(path, vec![s[0], s[2], s[1], s[3]]);
        assert_eq!(totals.distance, 3);
    }

    #[test]
    fn same_station_is_singleton_with_zero_totals() {
        let mut graph = MetroGraph::new();
        let s = ids(1);
        graph.add_station(s[0]);

        let (path, totals) = WeightedFinder::new(Metric::Time)
            .find_path_with_totals(&graph, s[0], s[0])
            .unwrap();
        assert_eq!(path, vec![s[0]]);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn unreachable_destination_is_empty() {
        let mut graph = MetroGraph::new();
        let s = ids(4);
        graph.add_edge(s[0], s[1], 1, 1, false, 0);
        graph.add_edge(s[2], s[3], 1, 1, false, 0);

        let finder = WeightedFinder::new(Metric::Distance);
        assert!(finder.find_path(&graph, s[0], s[3]).is_empty());
        assert!(finder.find_path_with_totals(&graph, s[0], s[3]).is_none());
    }

    #[test]
    fn absent_station_is_empty() {
        let graph = MetroGraph::new();
        let ghost = StationId::new(7);

        let finder = WeightedFinder::new(Metric::Time);
        assert!(finder.find_path(&graph, ghost, ghost).is_empty());
    }
}
