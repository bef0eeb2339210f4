use std::path::{Path, PathBuf};

use clap::Parser;
use plotters::prelude::*;

use rust_solar::config::{Config, SceneArgs};
use rust_solar::file::read_planets;
use rust_solar::model::{build_scene, BodyID, Scene};

/// Runs the scene headless and plots the top-down (XZ) track of every body.
#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    scene: SceneArgs,

    /// Simulated seconds to run for.
    #[arg(long, default_value_t = 10.0)]
    duration: f32,

    /// Fixed step between samples, in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    step: f32,

    #[arg(long, default_value = "plots/orbits.png")]
    output: PathBuf,
}

struct Track {
    name: String,
    points: Vec<(f32, f32)>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.step <= 0.0 {
        return Err("--step must be positive".into());
    }

    let mut config = Config::load_or_default(args.scene.config.as_deref())?;
    config.apply_scene_args(&args.scene);
    rust_solar::logging::init(&config.logging.level);

    let planets = read_planets(&config.scene.planets_file, config.parse_mode())?;
    let mut scene = build_scene(&config, &planets).scene;

    let tracks = simulate(&mut scene, args.duration, args.step);
    draw_tracks(&args.output, &tracks)?;

    println!("{:<10} {:>12} {:>12} {:>10}", "body", "orbit angle", "distance", "laps");
    for id in scene.lit_bodies() {
        let body = scene.get_body(id);
        let laps = body.orbit_speed() * args.duration / 360.0;
        println!(
            "{:<10} {:>12.2} {:>12.2} {:>10.2}",
            body.name,
            body.orbit_angle(),
            body.position().coords.norm(),
            laps
        );
    }
    println!("Wrote {}", args.output.display());

    Ok(())
}

fn simulate(scene: &mut Scene, duration: f32, step: f32) -> Vec<Track> {
    let ids: Vec<BodyID> = scene.lit_bodies();
    let mut tracks: Vec<Track> = ids
        .iter()
        .map(|id| Track {
            name: scene.get_body(*id).name.clone(),
            points: vec![],
        })
        .collect();

    let num_steps = (duration / step).ceil() as usize;
    for _ in 0..num_steps {
        scene.advance(step);
        for (track, id) in tracks.iter_mut().zip(ids.iter()) {
            let position = scene.get_body(*id).position();
            track.points.push((position.x, position.z));
        }
    }

    tracks
}

fn draw_tracks(path: &Path, tracks: &[Track]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let extent = tracks
        .iter()
        .flat_map(|t| t.points.iter())
        .map(|(x, z)| x.abs().max(z.abs()))
        .fold(1.0f32, f32::max)
        * 1.1;

    let root = BitMapBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Orbits (top view)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart.configure_mesh().x_desc("x").y_desc("z").draw()?;

    for (i, track) in tracks.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(track.points.iter().copied(), &color))?
            .label(track.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
