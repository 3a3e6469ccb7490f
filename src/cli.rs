use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use toriarea::Mode;

pub const DEFAULT_DATA_PATH: &str = "data.json";

fn positive_meters(s: &str) -> Result<f64, String> {
    let meters: f64 = s.parse().map_err(|_| format!("{:?} is not a number", s))?;
    if meters > 0.0 {
        Ok(meters)
    } else {
        Err(format!("radius must be positive, got {}", s))
    }
}

#[derive(Parser, Debug)]
#[command(name = "toriarea", version, about = "Find postal-code areas in a map circle and search tori.fi")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH, help = "Prepared area dataset")]
    pub data: PathBuf,
    #[arg(long, global = true, help = "JSON config file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select areas for a circle and print the search url.
    Select(SelectArgs),
    /// Derive the search radius for a visible map area.
    Viewport(BoundsArgs),
    /// Read or rewrite the view stored in a page url.
    UrlState {
        #[command(subcommand)]
        command: UrlStateCommands,
    },
    /// Convert the public MULTIPOLYGON dataset into the area list.
    Prepare {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = false, help = "Overwrite an existing output file")]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
    #[arg(long, allow_negative_numbers = true, value_parser = positive_meters, help = "Radius in meters")]
    pub radius: Option<f64>,
    #[arg(long, default_value = "inside", help = "inside or overlap")]
    pub mode: Mode,
    #[arg(long, default_value = "", help = "Free-text search terms")]
    pub terms: String,
    #[arg(long, help = "Seed center and zoom from a page url with lat/lon/zoom parameters")]
    pub from_url: Option<String>,
    #[arg(long,
          num_args = 4,
          value_names = ["NORTH", "SOUTH", "EAST", "WEST"],
          allow_negative_numbers = true,
          conflicts_with = "radius",
          help = "Derive the radius from these viewport bounds")]
    pub bounds: Option<Vec<f64>>,
    #[arg(long, default_value_t = false, help = "Accept an empty selection")]
    pub allow_empty: bool,
    #[arg(long, help = "Write the selection and circle as GeoJSON")]
    pub geojson: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BoundsArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub north: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub south: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub east: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub west: f64,
}

#[derive(Subcommand, Debug)]
pub enum UrlStateCommands {
    Read {
        url: String,
    },
    Write {
        url: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        zoom: f64,
    },
}
