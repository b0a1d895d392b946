pub mod graph;
pub mod stations;

pub use graph::{Edge, MetroGraph};
pub use stations::{Station, StationDirectory};

/// Dense index assigned to a station when it is interned by the loader.
/// Ordering follows insertion order, which makes it a stable tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(usize);

impl StationId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }

    pub fn index(self) -> usize {
        self.0
    }
}
