use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde_json::json;
use url::Url;

use toriarea::export::selection_geojson;
use toriarea::url_state::UrlState;
use toriarea::{min_radius, prepare, AreaDataset, Bounds, Config, Coordinate, Session,
               ViewportEvent, ViewportTracker};

mod cli;

use cli::{BoundsArgs, Cli, Commands, SelectArgs, UrlStateCommands};

fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => Config::from_path(path)
            .with_context(|| format!("failed to read config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn to_bounds(args: &BoundsArgs) -> Bounds {
    Bounds { north: args.north, south: args.south, east: args.east, west: args.west }
}

fn run_select(cli: &Cli, args: &SelectArgs) -> Result<ExitCode> {
    let mut config = load_config(cli)?;
    if args.allow_empty {
        config.strict = false;
    }
    let dataset = AreaDataset::from_path(&cli.data)
        .with_context(|| format!("failed to load areas from {}", cli.data.display()))?;

    let mut session = Session::new(&dataset, config);
    if let Some(ref url) = args.from_url {
        let view = UrlState::parse(url).with_context(|| format!("invalid page url {}", url))?;
        session = session.with_initial_view(view.center, view.zoom);
    }
    let mut events = Vec::new();
    {
        let mut tracker = ViewportTracker::new();
        tracker.subscribe(|e: &ViewportEvent| events.push(*e));
        if let Some(ref b) = args.bounds {
            tracker.ready(&Bounds { north: b[0], south: b[1], east: b[2], west: b[3] });
        }
        if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
            tracker.moved(Coordinate::new(lat, lon));
        }
    }
    for e in &events {
        session.apply_viewport_event(e);
    }
    if let Some(radius) = args.radius {
        session.set_radius(radius);
    }
    session.set_mode(args.mode);
    session.set_search_terms(args.terms.as_str());

    let selected = session.selected();
    let destination = session.destination();
    let status = session.status();
    let state = session.state();

    if let Some(ref path) = args.geojson {
        let geojson = selection_geojson(&selected, state.center, state.radius);
        fs::write(path, geojson.to_string())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote selection to {}", path.display());
    }

    if cli.json {
        let areas: Vec<_> = selected.iter()
            .map(|a| json!({ "code": a.code, "name": a.name }))
            .collect();
        let out = json!({
            "center": state.center,
            "radius": state.radius,
            "mode": state.mode,
            "areas": areas,
            "url": destination.as_str(),
            "error": status.as_ref().err().map(|e| e.user_message()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for a in &selected {
            println!("{} {}", a.code, a.name);
        }
        match status {
            Ok(ref url) => println!("{}", url),
            Err(ref e) => eprintln!("{}", e.user_message()),
        }
    }
    Ok(match status {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            warn!("search not submittable: {}", e);
            ExitCode::from(2)
        }
    })
}

fn run_viewport(cli: &Cli, args: &BoundsArgs) -> Result<ExitCode> {
    let bounds = to_bounds(args);
    let radius = min_radius(&bounds);
    let center = bounds.center();
    if cli.json {
        println!("{}", json!({ "center": center, "radius": radius }));
    } else {
        println!("center {}", center);
        println!("radius {:.1} m", radius);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_url_state(cli: &Cli, command: &UrlStateCommands) -> Result<ExitCode> {
    match *command {
        UrlStateCommands::Read { ref url } => {
            let view = UrlState::parse(url).with_context(|| format!("invalid page url {}", url))?;
            if cli.json {
                println!("{}", json!({ "center": view.center, "zoom": view.zoom }));
            } else {
                match view.center {
                    Some(c) => println!("center {}", c),
                    None => println!("center -"),
                }
                match view.zoom {
                    Some(z) => println!("zoom {}", z),
                    None => println!("zoom -"),
                }
            }
        }
        UrlStateCommands::Write { ref url, lat, lon, zoom } => {
            let page = Url::parse(url).with_context(|| format!("invalid page url {}", url))?;
            println!("{}", UrlState::write_back(&page, Coordinate::new(lat, lon), zoom));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_prepare(input: &Path, output: &Path, force: bool) -> Result<ExitCode> {
    if output.exists() && !force {
        println!("Data already exists");
        return Ok(ExitCode::SUCCESS);
    }
    let reader = BufReader::new(File::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?);
    let mut converted = Vec::new();
    let count = prepare::prepare(reader, &mut converted)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    fs::write(output, converted).with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {} areas to {}", count, output.display());
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Select(ref args) => run_select(&cli, args),
        Commands::Viewport(ref args) => run_viewport(&cli, args),
        Commands::UrlState { ref command } => run_url_state(&cli, command),
        Commands::Prepare { ref input, ref output, force } => run_prepare(input, output, force),
    }
}
