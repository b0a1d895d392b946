use rand::{Rng, seq::IteratorRandom};
use tracing::debug;

use crate::network::{MetroGraph, StationId};

pub const MIN_DELAY_MINUTES: u32 = 5;
pub const MAX_DELAY_MINUTES: u32 = 15;

/// Outcome of a simulated disruption: which directed edge was hit and by how
/// many minutes. The reverse direction carries the same delay because the
/// two edges share one delay cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayReport {
    pub from: StationId,
    pub to: StationId,
    pub minutes: u32,
}

/// Picks one directed edge uniformly at random and puts a 5-15 minute delay
/// on it. Returns `None` when the graph has no edges to delay.
///
/// Only subsequent time-metric queries through the affected connection see
/// the change; distance queries, fares and hop counts are untouched.
pub fn apply_random_delay<R: Rng + ?Sized>(
    graph: &MetroGraph,
    rng: &mut R,
) -> Option<DelayReport> {
    let edge = graph.edges().choose(rng)?;
    let minutes = rng.gen_range(MIN_DELAY_MINUTES..=MAX_DELAY_MINUTES);
    edge.set_delay(minutes);

    debug!(
        from = edge.source().index(),
        to = edge.destination().index(),
        minutes,
        "injected delay"
    );

    Some(DelayReport {
        from: edge.source(),
        to: edge.destination(),
        minutes,
    })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::routing::{Metric, WeightedFinder};

    #[test]
    fn empty_graph_has_nothing_to_delay() {
        let graph = MetroGraph::new();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(apply_random_delay(&graph, &mut rng), None);
    }

    #[test]
    fn delay_lands_on_both_directions_within_range() {
        let mut graph = MetroGraph::new();
        let (a, b) = (StationId::new(0), StationId::new(1));
        graph.add_edge(a, b, 2, 3, false, 10);
        let mut rng = StdRng::seed_from_u64(7);

        let report = apply_random_delay(&graph, &mut rng).unwrap();

        assert!((MIN_DELAY_MINUTES..=MAX_DELAY_MINUTES).contains(&report.minutes));
        assert_eq!(graph.edge_between(a, b).unwrap().delay(), report.minutes);
        assert_eq!(graph.edge_between(b, a).unwrap().delay(), report.minutes);
    }

    #[test]
    fn report_names_an_existing_directed_edge() {
        let mut graph = MetroGraph::new();
        let s: Vec<_> = (0..3).map(StationId::new).collect();
        graph.add_edge(s[0], s[1], 2, 3, false, 10);
        graph.add_edge(s[1], s[2], 5, 4, false, 10);
        let mut rng = StdRng::seed_from_u64(42);

        let report = apply_random_delay(&graph, &mut rng).unwrap();

        let edge = graph.edge_between(report.from, report.to).unwrap();
        assert_eq!(edge.delay(), report.minutes);
    }

    #[test]
    fn time_total_grows_by_exactly_the_injected_delay() {
        // Single chain, so every query traverses the delayed connection.
        let mut graph = MetroGraph::new();
        let s: Vec<_> = (0..3).map(StationId::new).collect();
        graph.add_edge(s[0], s[1], 2, 3, false, 10);
        graph.add_edge(s[1], s[2], 5, 4, false, 10);
        let finder = WeightedFinder::new(Metric::Time);

        let before = finder.find_path_with_totals(&graph, s[0], s[2]).unwrap().1;
        let report = apply_random_delay(&graph, &mut StdRng::seed_from_u64(3)).unwrap();
        let after = finder.find_path_with_totals(&graph, s[0], s[2]).unwrap().1;

        assert_eq!(after.time, before.time + u64::from(report.minutes));
        assert_eq!(after.distance, before.distance);
    }
}
