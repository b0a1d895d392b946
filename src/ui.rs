use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use itertools::Itertools;
use rand::Rng;

use crate::network::{MetroGraph, StationDirectory, StationId};
use crate::routing::{
    HopCountFinder, Metric, PathFinder, WeightedFinder, apply_random_delay,
};

pub fn print_stations(directory: &StationDirectory) {
    println!("\nList of all stations:");
    println!("{:-<52}", "");
    println!("{:<6} {:<25} {:<15}", "Code", "Station", "Lines");
    println!("{:-<52}", "");

    for station in directory.iter() {
        println!(
            "{:<6} {:<25} {:<15}",
            station.code,
            station.name,
            station.lines.join(",")
        );
    }
}

/// One-shot query used by the `route` subcommand. Unknown codes are an
/// error here, unlike in the menu where they just re-prompt.
pub fn run_route(
    directory: &StationDirectory,
    graph: &MetroGraph,
    source: &str,
    destination: &str,
    finder: &dyn PathFinder,
    description: &str,
) -> Result<()> {
    let Some(source) = directory.resolve(source) else {
        bail!("unknown station code: {source}");
    };
    let Some(destination) = directory.resolve(destination) else {
        bail!("unknown station code: {destination}");
    };

    let path = finder.find_path(graph, source, destination);
    if path.is_empty() {
        println!(
            "No path found between {} and {}",
            directory[source].name, directory[destination].name
        );
    } else {
        print_path(directory, graph, &path, description);
    }

    Ok(())
}

/// Interactive menu loop mirroring the operator console: list stations, the
/// three query flavours, disruption simulation, exit.
pub fn run_menu(directory: &StationDirectory, graph: &MetroGraph) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut rng = rand::thread_rng();

    println!("====================================");
    println!("        METRO PATH FINDER");
    println!("====================================");

    loop {
        print_menu();
        let Some(choice) = read_line(&mut input)? else {
            break;
        };

        match choice.as_str() {
            "1" => print_stations(directory),
            "2" => query(directory, graph, &mut input, &HopCountFinder, "minimum stops")?,
            "3" => query(
                directory,
                graph,
                &mut input,
                &WeightedFinder::new(Metric::Distance),
                "shortest distance",
            )?,
            "4" => query(
                directory,
                graph,
                &mut input,
                &WeightedFinder::new(Metric::Time),
                "minimum time",
            )?,
            "5" => simulate_delay(directory, graph, &mut rng),
            "6" => break,
            other => println!("Invalid choice: {other}. Please try again."),
        }
    }

    println!("\nThank you for using the metro path finder!");
    Ok(())
}

fn print_menu() {
    println!("\nMain menu:");
    println!("1. List all stations");
    println!("2. Find path with minimum stops");
    println!("3. Find path with shortest distance");
    println!("4. Find path with minimum time");
    println!("5. Simulate a random delay");
    println!("6. Exit");
    print!("Enter your choice (1-6): ");
    let _ = io::stdout().flush();
}

fn query(
    directory: &StationDirectory,
    graph: &MetroGraph,
    input: &mut impl BufRead,
    finder: &dyn PathFinder,
    description: &str,
) -> Result<()> {
    print_stations(directory);

    let Some(source) = prompt(input, "\nEnter source station code: ")? else {
        return Ok(());
    };
    let Some(destination) = prompt(input, "Enter destination station code: ")? else {
        return Ok(());
    };

    let (Some(source), Some(destination)) =
        (directory.resolve(&source), directory.resolve(&destination))
    else {
        println!("Invalid station codes entered. Please try again.");
        return Ok(());
    };

    println!("\nFinding path with {description}...");
    let path = finder.find_path(graph, source, destination);

    if path.is_empty() {
        println!(
            "No path found between {} and {}",
            directory[source].name, directory[destination].name
        );
    } else {
        print_path(directory, graph, &path, description);
    }

    Ok(())
}

fn simulate_delay(directory: &StationDirectory, graph: &MetroGraph, rng: &mut impl Rng) {
    match apply_random_delay(graph, rng) {
        Some(report) => println!(
            "\n*** A {}-minute delay has been reported between {} and {}. ***",
            report.minutes, directory[report.from].name, directory[report.to].name
        ),
        None => println!("No connections available to simulate a delay."),
    }
}

fn print_path(
    directory: &StationDirectory,
    graph: &MetroGraph,
    path: &[StationId],
    description: &str,
) {
    println!("\nPath with {description}:");
    println!("{:-<52}", "");

    let legs: Vec<_> = path
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| graph.edge_between(from, to))
        .collect();

    let mut total_distance = 0u64;
    let mut total_time = 0u64;
    let mut total_fare = 0u64;

    for (i, &id) in path.iter().enumerate() {
        let station = &directory[id];
        println!("{}. {} ({})", i + 1, station.name, station.lines.join(","));

        if let Some(Some(edge)) = legs.get(i) {
            total_distance += u64::from(edge.distance());
            total_time += u64::from(edge.effective_time());
            total_fare += u64::from(edge.fare());

            let delay = match edge.delay() {
                0 => String::new(),
                minutes => format!(" ({minutes} min delay)"),
            };
            let transfer = if edge.is_transfer() { " (transfer)" } else { "" };
            println!(
                "   -> {} km, {} min{delay}, fare {}{transfer}",
                edge.distance(),
                edge.effective_time(),
                edge.fare()
            );
        }
    }

    println!("{:-<52}", "");
    println!(
        "Total: {} stops, {} km, {} min, fare {}",
        path.len() - 1,
        total_distance,
        total_time,
        total_fare
    );
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{message}");
    let _ = io::stdout().flush();
    read_line(input)
}

/// Returns `None` on end of input so a piped session terminates cleanly.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
