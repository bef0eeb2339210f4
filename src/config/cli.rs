use std::path::PathBuf;

use clap::{Args, Parser};

use super::Config;

/// Options shared by every binary that builds a scene.
#[derive(Debug, Clone, Default, Args)]
pub struct SceneArgs {
    /// RON config file; built-in defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Planet table (CSV), overriding the one named in the config.
    #[arg(long)]
    pub planets: Option<PathBuf>,

    /// Refuse to start if any planet row is malformed.
    #[arg(long)]
    pub strict: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Interactive solar system viewer.
#[derive(Debug, Parser)]
#[command(name = "rust-solar", about = "Interactive solar system viewer")]
pub struct CliArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Start with orbit overlays visible (toggle with Shift+H).
    #[arg(long)]
    pub show_orbits: bool,

    /// Simulated seconds per real second.
    #[arg(long)]
    pub time_scale: Option<f32>,

    /// Print the effective config as RON and exit.
    #[arg(long)]
    pub dump_config: bool,
}

impl Config {
    pub fn apply_scene_args(&mut self, args: &SceneArgs) {
        if let Some(ref planets) = args.planets {
            self.scene.planets_file = planets.clone();
        }
        if args.strict {
            self.simulation.strict_data = true;
        }
        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        self.apply_scene_args(&args.scene);
        if args.show_orbits {
            self.simulation.show_orbits = true;
        }
        if let Some(scale) = args.time_scale {
            self.simulation.time_scale = scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let args = CliArgs::parse_from([
            "rust-solar",
            "--planets",
            "other.csv",
            "--show-orbits",
            "--time-scale",
            "4",
        ]);

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.scene.planets_file, PathBuf::from("other.csv"));
        assert!(config.simulation.show_orbits);
        assert_eq!(config.simulation.time_scale, 4.0);

        // Untouched values keep their defaults
        assert!(!config.simulation.strict_data);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_no_args_changes_nothing() {
        let args = CliArgs::parse_from(["rust-solar"]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config, Config::default());
        assert!(!args.dump_config);
    }
}
