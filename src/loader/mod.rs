use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::network::{MetroGraph, StationDirectory};

/// One line of the stations file: `code,name,line|line|...,lat,lon`.
#[derive(Clone, Debug, PartialEq)]
pub struct StationRecord {
    pub code: String,
    pub name: String,
    pub lines: Vec<String>,
    pub lat: f64,
    pub lon: f64,
}

impl FromStr for StationRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            bail!("expected 5 fields (code,name,lines,lat,lon), got {} in {s:?}", fields.len());
        }

        let code = fields[0].to_string();
        if code.is_empty() {
            bail!("empty station code in {s:?}");
        }

        let lines: Vec<String> = fields[2]
            .split('|')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if lines.is_empty() {
            bail!("station {code} has no line memberships");
        }

        let lat: f64 = fields[3]
            .parse()
            .with_context(|| format!("invalid latitude in {s:?}"))?;
        let lon: f64 = fields[4]
            .parse()
            .with_context(|| format!("invalid longitude in {s:?}"))?;

        Ok(Self {
            code,
            name: fields[1].to_string(),
            lines,
            lat,
            lon,
        })
    }
}

/// One line of the connections file: `from,to,distance,time[,transfer[,fare]]`.
/// The transfer flag defaults to false and the fare to 0 when omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionRecord {
    pub from: String,
    pub to: String,
    pub distance: u32,
    pub time: u32,
    pub is_transfer: bool,
    pub fare: u32,
}

impl FromStr for ConnectionRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if !(4..=6).contains(&fields.len()) {
            bail!(
                "expected 4-6 fields (from,to,distance,time[,transfer[,fare]]), got {} in {s:?}",
                fields.len()
            );
        }

        let distance: u32 = fields[2]
            .parse()
            .with_context(|| format!("invalid distance in {s:?}"))?;
        let time: u32 = fields[3]
            .parse()
            .with_context(|| format!("invalid time in {s:?}"))?;

        let is_transfer = fields
            .get(4)
            .is_some_and(|f| f.eq_ignore_ascii_case("true") || *f == "1");
        let fare: u32 = match fields.get(5) {
            Some(f) => f
                .parse()
                .with_context(|| format!("invalid fare in {s:?}"))?,
            None => 0,
        };

        Ok(Self {
            from: fields[0].to_string(),
            to: fields[1].to_string(),
            distance,
            time,
            is_transfer,
            fare,
        })
    }
}

/// Parses one record per line, skipping blank lines and `#` comments.
fn parse_records<T, R>(reader: R) -> Result<Vec<T>>
where
    T: FromStr<Err = anyhow::Error>,
    R: BufRead,
{
    let mut records = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        records.push(line.parse().with_context(|| format!("line {}", n + 1))?);
    }

    Ok(records)
}

pub fn read_stations<R: Read>(r: R) -> Result<Vec<StationRecord>> {
    parse_records(BufReader::new(r))
}

pub fn read_connections<R: Read>(r: R) -> Result<Vec<ConnectionRecord>> {
    parse_records(BufReader::new(r))
}

/// Interns the station records and wires up the graph. Connections naming an
/// unknown station are skipped with a warning; the loader has already been
/// told every code it will ever resolve.
pub fn build_network(
    stations: Vec<StationRecord>,
    connections: Vec<ConnectionRecord>,
) -> (StationDirectory, MetroGraph) {
    let mut directory = StationDirectory::new();
    let mut graph = MetroGraph::new();

    for record in stations {
        let id = directory.insert(
            &record.code,
            record.name,
            record.lines,
            record.lat,
            record.lon,
        );
        graph.add_station(id);
    }

    let mut wired = 0usize;
    for record in &connections {
        match (directory.resolve(&record.from), directory.resolve(&record.to)) {
            (Some(from), Some(to)) => {
                graph.add_edge(
                    from,
                    to,
                    record.distance,
                    record.time,
                    record.is_transfer,
                    record.fare,
                );
                wired += 1;
            }
            _ => warn!(
                from = %record.from,
                to = %record.to,
                "skipping connection between unknown stations"
            ),
        }
    }

    info!(
        stations = directory.len(),
        connections = wired,
        "metro network built"
    );

    (directory, graph)
}

pub fn load_network<P, Q>(stations_path: P, connections_path: Q) -> Result<(StationDirectory, MetroGraph)>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let stations_file = File::open(&stations_path)
        .with_context(|| format!("opening {:?}", stations_path.as_ref()))?;
    let stations = read_stations(stations_file)
        .with_context(|| format!("reading {:?}", stations_path.as_ref()))?;

    let connections_file = File::open(&connections_path)
        .with_context(|| format!("opening {:?}", connections_path.as_ref()))?;
    let connections = read_connections(connections_file)
        .with_context(|| format!("reading {:?}", connections_path.as_ref()))?;

    Ok(build_network(stations, connections))
}
