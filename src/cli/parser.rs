use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan driving routes and ask a traffic assistant", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ~/.tmap/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Geocoder to use instead of the configured one (nominatim, openrouteservice)
    #[arg(short, long, global = true)]
    pub geocoder: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Geocode two places and print the driving route between them
    Route {
        /// Start location
        start: String,
        /// Destination
        destination: String,
    },

    /// Interactive map session: search, place and remove points, inspect the route
    Map,

    /// Interactive traffic assistant
    Chat,

    /// Ask the traffic assistant a single question (reads stdin when piped)
    Ask {
        /// The question
        message: Option<String>,
    },
}
