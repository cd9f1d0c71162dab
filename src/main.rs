use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use waypoint::{Graph, PathReport, PointId};

#[derive(Debug, thiserror::Error)]
#[error("{0}, {1}: {2}")]
struct GraphLoadError(PathBuf, PathBuf, #[source] waypoint::reader::LoadError);

#[derive(Parser)]
struct Cli {
    /// The path to the points file
    points_file: PathBuf,

    /// The path to the routes file
    routes_file: PathBuf,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all points of the map
    Points,

    /// List all routes of the map
    Routes,

    /// Find the shortest path between two points
    Path {
        /// Id of the start point, e.g. `#NAT`
        origin: PointId,

        /// Id of the end point, e.g. `#MCZ`
        destination: PointId,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let g = load_graph(&cli.points_file, &cli.routes_file)?;

    match cli.command {
        Command::Points => print_points(&g),
        Command::Routes => print_routes(&g),
        Command::Path {
            origin,
            destination,
        } => print_path(&g, &origin, &destination),
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    colog::default_builder().filter_level(level).init();
}

fn load_graph<P: AsRef<Path>, R: AsRef<Path>>(
    points_path: P,
    routes_path: R,
) -> Result<Graph, GraphLoadError> {
    let mut g = Graph::default();
    match waypoint::reader::load_from_file(&mut g, points_path.as_ref(), routes_path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(
            PathBuf::from(points_path.as_ref()),
            PathBuf::from(routes_path.as_ref()),
            e,
        )),
    }
}

fn print_points(g: &Graph) {
    for p in g.points() {
        println!("{}\t{} ({},{})", p.id, p.name, p.lat, p.lon);
    }
}

fn print_routes(g: &Graph) {
    for r in g.routes() {
        println!(
            "{}\t{}\t{}km [{},{}]",
            r.id, r.name, r.length, r.ends[0], r.ends[1]
        );
    }
}

fn print_path(g: &Graph, origin: &PointId, destination: &PointId) {
    let report = PathReport::from(waypoint::find_path(g, origin, destination));

    if report.is_invalid() {
        println!("Invalid parameters: unknown origin or destination");
    } else if !report.is_found() {
        println!("No path from {} to {}", origin, destination);
    } else {
        println!("Length: {}km", report.length);
        for step in &report.path {
            let point_name = g
                .get_point(&step.point)
                .map(|p| p.name.as_str())
                .unwrap_or_default();

            match &step.route {
                None => println!("{}\t{}", step.point, point_name),
                Some(route_id) => {
                    let route_name = g
                        .get_route(route_id)
                        .map(|r| r.name.as_str())
                        .unwrap_or_default();
                    println!(
                        "{}\t{}\t-> {}\t{}",
                        route_id, route_name, step.point, point_name
                    );
                }
            }
        }
    }

    println!("Open: {}, Closed: {}", report.open_count, report.closed_count);
}
