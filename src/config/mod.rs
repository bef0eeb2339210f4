//! Static configuration for the viewer: window, camera, lighting, materials and
//! the bodies that aren't described by the planet table (sun, background,
//! moons and rings). Every section has defaults, so a config file only needs
//! to mention what it changes.

use std::path::{Path, PathBuf};

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::file::ParseMode;
use crate::model::Material;

mod cli;
mod error;

pub use cli::{CliArgs, SceneArgs};
pub use error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub simulation: SimulationConfig,
    pub scene: SceneConfig,
    pub lighting: LightingConfig,
    pub materials: MaterialsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second cap; 0 leaves it to vsync.
    pub framerate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    /// Initial vertical field of view. Scrolling zooms between 1 and this value.
    pub fov_degrees: f32,
    pub mouse_sensitivity: f32,
    pub slow_speed: f32,
    pub normal_speed: f32,
    pub fast_speed: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds per wall-clock second.
    pub time_scale: f32,
    /// Longest frame delta fed to the simulation, in seconds. 0 disables the clamp.
    pub max_frame_time: f32,
    pub show_orbits: bool,
    /// Reject the whole planet table if any row is malformed.
    pub strict_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub planets_file: PathBuf,
    pub size_scale: f32,
    pub orbit_radius_scale: f32,
    pub orbit_speed_scale: f32,
    pub sphere_stacks: usize,
    pub sphere_sectors: usize,
    pub clear_color: [f32; 3],
    pub orbit_color: [f32; 3],
    pub orbit_segments: usize,
    pub sun: SunConfig,
    pub background: BackgroundConfig,
    pub moons: Vec<MoonConfig>,
    pub rings: Vec<RingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    pub name: String,
    pub size: f32,
    pub rotation_speed: f32,
    pub texture: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    pub size: f32,
    pub texture: PathBuf,
}

/// A satellite of one of the planets. Orbit radius and speed are in table
/// units, so they go through the same scaling as the planets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoonConfig {
    pub name: String,
    pub parent: String,
    pub size: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub rotation_speed: f32,
    pub texture: PathBuf,
}

/// Ring radii are in scene units before `size_scale`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    pub planet: String,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub tilt_degrees: f32,
    pub segments: usize,
    pub texture: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialConfig {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialsConfig {
    pub rocky: MaterialConfig,
    pub gas: MaterialConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG isn't set (error, warn, info, debug, trace).
    pub level: String,
}

// --- Defaults ---

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Solar System".to_string(),
            width: 700,
            height: 700,
            framerate_limit: 60,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            start_position: [0.0, 10.0, 60.0],
            yaw_degrees: -90.0,
            pitch_degrees: -10.0,
            fov_degrees: 45.0,
            mouse_sensitivity: 0.1,
            slow_speed: 0.5,
            normal_speed: 2.5,
            fast_speed: 50.0,
            near_plane: 1.0,
            far_plane: 20000.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            time_scale: 1.0,
            max_frame_time: 0.25,
            show_orbits: false,
            strict_data: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            planets_file: PathBuf::from("assets/data/planets.csv"),
            size_scale: 1.0,
            orbit_radius_scale: 100.0,
            orbit_speed_scale: 50.0,
            sphere_stacks: 30,
            sphere_sectors: 30,
            clear_color: [0.05, 0.05, 0.05],
            orbit_color: [1.0, 1.0, 1.0],
            orbit_segments: 360,
            sun: SunConfig::default(),
            background: BackgroundConfig::default(),
            moons: vec![MoonConfig::default()],
            rings: vec![RingConfig::default()],
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        SunConfig {
            name: "Sun".to_string(),
            size: 2.0,
            rotation_speed: 10.0,
            texture: PathBuf::from("assets/textures/2k_sun.jpg"),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            size: 8000.0,
            texture: PathBuf::from("assets/textures/8k_stars_milky_way.jpg"),
        }
    }
}

impl Default for MoonConfig {
    fn default() -> Self {
        MoonConfig {
            name: "Moon".to_string(),
            parent: "Earth".to_string(),
            size: 0.273,
            orbit_radius: 0.087,
            orbit_speed: 13.4,
            rotation_speed: 50.0,
            texture: PathBuf::from("assets/textures/2k_moon.jpg"),
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        RingConfig {
            planet: "Saturn".to_string(),
            inner_radius: 2.3,
            outer_radius: 4.2,
            tilt_degrees: 26.7,
            segments: 100,
            texture: PathBuf::from("assets/textures/2k_saturn_ring_alpha.png"),
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        LightingConfig {
            ambient: [0.15, 0.15, 0.15],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        MaterialsConfig {
            rocky: MaterialConfig {
                ambient: [0.25, 0.25, 0.25],
                diffuse: [0.8, 0.8, 0.8],
                specular: [0.3, 0.3, 0.3],
                shininess: 32.0,
            },
            gas: MaterialConfig {
                ambient: [0.3, 0.3, 0.3],
                diffuse: [0.9, 0.9, 0.9],
                specular: [0.5, 0.5, 0.5],
                shininess: 64.0,
            },
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

// --- Conversions into simulation types ---

impl MaterialConfig {
    pub fn to_material(&self) -> Material {
        Material {
            ambient: Vector3::from(self.ambient),
            diffuse: Vector3::from(self.diffuse),
            specular: Vector3::from(self.specular),
            shininess: self.shininess,
        }
    }
}

impl CameraConfig {
    pub fn start_position(&self) -> Point3<f32> {
        Point3::from(self.start_position)
    }
}

// --- Load / save ---

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks the values that would otherwise only fail once meshes are
    /// generated: sizes must be positive and tessellation counts nonzero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;

        positive("scene.size_scale", scene.size_scale)?;
        nonzero("scene.sphere_stacks", scene.sphere_stacks)?;
        nonzero("scene.sphere_sectors", scene.sphere_sectors)?;
        nonzero("scene.orbit_segments", scene.orbit_segments)?;
        positive("scene.sun.size", scene.sun.size)?;
        positive("scene.background.size", scene.background.size)?;

        for (i, moon) in scene.moons.iter().enumerate() {
            positive(&format!("scene.moons[{}].size", i), moon.size)?;
        }
        for (i, ring) in scene.rings.iter().enumerate() {
            nonzero(&format!("scene.rings[{}].segments", i), ring.segments)?;
        }

        Ok(())
    }

    /// Loads `path` if one was given, otherwise uses the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    /// How the planet table should treat malformed rows.
    pub fn parse_mode(&self) -> ParseMode {
        if self.simulation.strict_data {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_owned(),
            reason: format!("must be positive, was {}", value),
        })
    }
}

fn nonzero(field: &str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_owned(),
            reason: "must be at least 1".to_owned(),
        })
    }
}
