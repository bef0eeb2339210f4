use clap::Parser;
use kiss3d::window::Window;

use rust_solar::config::{CliArgs, Config};
use rust_solar::file::read_planets;
use rust_solar::gui::Simulation;
use rust_solar::model::build_scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut config = Config::load_or_default(args.scene.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if args.dump_config {
        print!("{}", config.to_ron_string()?);
        return Ok(());
    }

    rust_solar::logging::init(&config.logging.level);

    let planets = read_planets(&config.scene.planets_file, config.parse_mode())?;
    let blueprint = build_scene(&config, &planets);

    let window_config = &config.window;
    let mut window = Window::new_with_size(
        &window_config.title,
        window_config.width,
        window_config.height,
    );
    if window_config.framerate_limit > 0 {
        window.set_framerate_limit(Some(window_config.framerate_limit));
    }

    let simulation = Simulation::new(&config, blueprint, &mut window)?;
    log::info!("Starting render loop");
    window.render_loop(simulation);

    Ok(())
}
