use std::{collections::HashMap, hash::Hash, ops::Index};

use crate::network::StationId;

#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationId,
    pub code: String,
    pub name: String,
    pub lines: Vec<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    pub fn new(
        id: StationId,
        code: String,
        name: String,
        lines: Vec<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            id,
            code,
            name,
            lines,
            lat,
            lon,
        }
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Interns station codes to dense [`StationId`]s and keeps the stations in
/// insertion order. Code lookup is case-insensitive.
#[derive(Debug, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_code: HashMap<String, StationId>,
}

impl StationDirectory {
    pub fn new() -> Self {
        Default::default()
    }

    /// Interns a station. A repeated code keeps its id and replaces the
    /// attributes (last record wins).
    pub fn insert(
        &mut self,
        code: &str,
        name: String,
        lines: Vec<String>,
        lat: f64,
        lon: f64,
    ) -> StationId {
        let key = code.to_ascii_uppercase();
        match self.by_code.get(&key) {
            Some(&id) => {
                self.stations[id.index()] =
                    Station::new(id, code.to_string(), name, lines, lat, lon);
                id
            }
            None => {
                let id = StationId::new(self.stations.len());
                self.stations
                    .push(Station::new(id, code.to_string(), name, lines, lat, lon));
                self.by_code.insert(key, id);
                id
            }
        }
    }

    pub fn resolve(&self, code: &str) -> Option<StationId> {
        self.by_code.get(&code.to_ascii_uppercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Index<StationId> for StationDirectory {
    type Output = Station;

    fn index(&self, index: StationId) -> &Self::Output {
        &self.stations[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_in_insertion_order() {
        let mut directory = StationDirectory::new();
        let a = directory.insert("KGT", "Kashmere Gate".into(), vec!["Red".into()], 28.7, 77.2);
        let b = directory.insert("RKG", "Rajiv Chowk".into(), vec!["Yellow".into()], 28.6, 77.2);

        assert!(a < b);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory[a].name, "Kashmere Gate");
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let mut directory = StationDirectory::new();
        let id = directory.insert("kgt", "Kashmere Gate".into(), vec!["Red".into()], 28.7, 77.2);

        assert_eq!(directory.resolve("KGT"), Some(id));
        assert_eq!(directory.resolve("Kgt"), Some(id));
        assert_eq!(directory.resolve("XYZ"), None);
    }

    #[test]
    fn duplicate_code_keeps_id_and_replaces_attributes() {
        let mut directory = StationDirectory::new();
        let first = directory.insert("KGT", "Kashmir Gate".into(), vec!["Red".into()], 0.0, 0.0);
        let second =
            directory.insert("KGT", "Kashmere Gate".into(), vec!["Red".into()], 28.7, 77.2);

        assert_eq!(first, second);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory[first].name, "Kashmere Gate");
    }
}
