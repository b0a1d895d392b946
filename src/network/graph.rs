use std::{cell::Cell, collections::HashMap, rc::Rc};

use crate::network::StationId;

/// Directed service link between two stations.
///
/// The forward and backward edge of one connection share a single delay
/// cell, so a reported delay always applies to both directions.
#[derive(Clone, Debug)]
pub struct Edge {
    source: StationId,
    destination: StationId,
    distance: u32,
    time: u32,
    is_transfer: bool,
    fare: u32,
    delay: Rc<Cell<u32>>,
}

impl Edge {
    pub fn source(&self) -> StationId {
        self.source
    }

    pub fn destination(&self) -> StationId {
        self.destination
    }

    /// Distance in kilometres.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Scheduled travel time in minutes, excluding any delay.
    pub fn base_time(&self) -> u32 {
        self.time
    }

    /// Travel time in minutes including the current delay.
    pub fn effective_time(&self) -> u32 {
        self.time + self.delay.get()
    }

    pub fn is_transfer(&self) -> bool {
        self.is_transfer
    }

    pub fn fare(&self) -> u32 {
        self.fare
    }

    pub fn delay(&self) -> u32 {
        self.delay.get()
    }

    /// Sole mutation path for edge state; invoked only by delay injection.
    pub(crate) fn set_delay(&self, minutes: u32) {
        self.delay.set(minutes);
    }
}

/// Adjacency-list graph over interned stations. Built once by the loader;
/// after that only edge delays change.
#[derive(Debug, Default)]
pub struct MetroGraph {
    adjacency: HashMap<StationId, Vec<Edge>>,
}

impl MetroGraph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Idempotent: a station already present keeps its outgoing edges.
    pub fn add_station(&mut self, station: StationId) {
        self.adjacency.entry(station).or_default();
    }

    /// Appends the forward and backward edge of one connection, both with a
    /// zero delay. Missing endpoints are inserted.
    pub fn add_edge(
        &mut self,
        source: StationId,
        destination: StationId,
        distance: u32,
        time: u32,
        is_transfer: bool,
        fare: u32,
    ) {
        let delay = Rc::new(Cell::new(0));

        let forward = Edge {
            source,
            destination,
            distance,
            time,
            is_transfer,
            fare,
            delay: Rc::clone(&delay),
        };
        let backward = Edge {
            source: destination,
            destination: source,
            distance,
            time,
            is_transfer,
            fare,
            delay,
        };

        self.adjacency.entry(source).or_default().push(forward);
        self.adjacency.entry(destination).or_default().push(backward);
    }

    /// Outgoing edges in insertion order; empty for an unknown station.
    pub fn adjacent(&self, station: StationId) -> impl Iterator<Item = &Edge> {
        match self.adjacency.get(&station) {
            Some(edges) => edges.iter(),
            None => [].iter(),
        }
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.adjacency.contains_key(&station)
    }

    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Every directed edge; each connection appears twice, once per
    /// direction.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.values().flatten()
    }

    /// First edge from `from` to `to`, if any. Used to annotate path legs.
    pub fn edge_between(&self, from: StationId, to: StationId) -> Option<&Edge> {
        self.adjacent(from).find(|edge| edge.destination() == to)
    }
}
