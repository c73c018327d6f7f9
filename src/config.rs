//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`GD_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use glassdrift_geometry::{CubeFrame, SpiralTubeParams, Torus, TriangleRingParams};
use glassdrift_physics::{DriftConfig, ImpulseMapper, SpringTuning, TuningError, DEFAULT_JITTER};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Spring-damper and pointer impulse coefficients
    #[serde(default)]
    pub spring: SpringConfig,
    /// Shape generator parameters
    #[serde(default)]
    pub geometry: GeometryConfig,
    /// Cosmetic data handed to the renderer
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`GD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        Self::figment(config_dir).extract().map_err(ConfigError::from)
    }

    /// The layered provider stack, before extraction
    pub fn figment<P: AsRef<Path>>(config_dir: P) -> Figment {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // GD_SPRING__DAMPING=0.9 -> spring.damping = 0.9
        figment.merge(Env::prefixed("GD_").split("__"))
    }

    /// Frame-time limit for the drift world
    pub fn drift_config(&self) -> DriftConfig {
        DriftConfig::new(self.simulation.max_delta)
    }

    /// Impulse mapper seeded from `simulation.seed`, or from entropy when unset
    pub fn impulse_mapper(&self) -> ImpulseMapper {
        let mapper = match self.simulation.seed {
            Some(seed) => ImpulseMapper::seeded(seed),
            None => ImpulseMapper::new(),
        };
        mapper.with_jitter(self.spring.jitter)
    }
}

/// Frame loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Longest frame the integrator will take in one step, in seconds
    pub max_delta: f32,
    /// Frame time of the headless driver, in seconds
    pub fixed_delta: f32,
    /// Number of frames the headless driver runs
    pub frames: u32,
    /// Seed for the spin jitter (random when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_delta: 0.1,
            fixed_delta: 1.0 / 60.0,
            frames: 600,
            seed: None,
        }
    }
}

/// Spring-damper and pointer impulse configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Pull toward the rest pose, per second
    pub spring: f32,
    /// Velocity kept per step (0..1)
    pub damping: f32,
    /// Scale from contact lever to velocity
    pub push_force: f32,
    /// Longest contact lever in local units
    pub max_impulse_radius: f32,
    /// Half-width of the random z-spin added to every push
    pub jitter: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        let tuning = SpringTuning::default();
        Self {
            spring: tuning.spring(),
            damping: tuning.damping(),
            push_force: tuning.push_force(),
            max_impulse_radius: tuning.max_impulse_radius(),
            jitter: DEFAULT_JITTER,
        }
    }
}

impl SpringConfig {
    /// Validate into a [`SpringTuning`]
    pub fn to_tuning(&self) -> Result<SpringTuning, TuningError> {
        SpringTuning::new(self.spring, self.damping, self.push_force, self.max_impulse_radius)
    }
}

/// Shape generator parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub torus: Torus,
    pub triangle_ring: TriangleRingParams,
    pub spiral: SpiralTubeParams,
    pub cube_frame: CubeFrame,
}

/// A light handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub intensity: f32,
}

/// Rendering configuration
///
/// None of this affects motion. It is passed through untouched to whatever
/// draws the scene; the headless binary only logs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Camera position [x, y, z]
    pub camera_position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub ambient_intensity: f32,
    pub directional_light: LightConfig,
    pub point_light: LightConfig,
    pub bloom_intensity: f32,
    /// Luminance above which bloom kicks in
    pub bloom_threshold: f32,
    pub bloom_smoothing: f32,
    /// Chromatic aberration offset in screen units
    pub chromatic_aberration: [f32; 2],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            camera_position: [0.0, 0.0, 8.0],
            fov: 50.0,
            ambient_intensity: 1.0,
            directional_light: LightConfig {
                position: [5.0, 5.0, 5.0],
                intensity: 2.5,
            },
            point_light: LightConfig {
                position: [-5.0, -5.0, -5.0],
                intensity: 0.75,
            },
            bloom_intensity: 1.5,
            bloom_threshold: 0.1,
            bloom_smoothing: 0.9,
            chromatic_aberration: [0.0025, 0.0025],
        }
    }
}

impl std::fmt::Display for RenderingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [cx, cy, cz] = self.camera_position;
        let d = self.directional_light;
        let p = self.point_light;
        write!(
            f,
            "camera ({}, {}, {}) fov {}, ambient {}, directional {:?} x{}, point {:?} x{}, bloom {} (threshold {})",
            cx, cy, cz, self.fov, self.ambient_intensity,
            d.position, d.intensity, p.position, p.intensity,
            self.bloom_intensity, self.bloom_threshold
        )
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log every entity's pose once per this many frames (0 disables)
    pub log_every: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_every: 60,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema
    Load(Box<figment::Error>),
    /// The spring section is out of range
    Tuning(TuningError),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

impl From<TuningError> for ConfigError {
    fn from(e: TuningError) -> Self {
        ConfigError::Tuning(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Configuration error: {}", e),
            ConfigError::Tuning(e) => write!(f, "Configuration error: spring: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e.as_ref()),
            ConfigError::Tuning(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.max_delta, 0.1);
        assert_eq!(config.spring.damping, 0.85);
        assert_eq!(config.rendering.fov, 50.0);
        assert_eq!(config.debug.log_level, "info");
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_default_spring_is_valid() {
        let tuning = AppConfig::default().spring.to_tuning().unwrap();
        assert_eq!(tuning, SpringTuning::default());
    }

    #[test]
    fn test_invalid_spring_rejected() {
        let spring = SpringConfig {
            damping: 1.5,
            ..SpringConfig::default()
        };
        let err = ConfigError::from(spring.to_tuning().unwrap_err());
        assert!(matches!(err, ConfigError::Tuning(TuningError::Damping(_))));
        assert!(err.to_string().contains("spring"));
    }

    #[test]
    fn test_rendering_summary() {
        let summary = RenderingConfig::default().to_string();
        assert!(summary.starts_with("camera (0, 0, 8) fov 50"));
        assert!(summary.contains("directional [5.0, 5.0, 5.0] x2.5"));
        assert!(summary.contains("point [-5.0, -5.0, -5.0] x0.75"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("max_delta"));
        assert!(toml.contains("push_force"));
        assert!(toml.contains("major_radius"));
        assert!(!toml.contains("seed"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("[spring]\nspring = 5.0\n").unwrap();
        assert_eq!(config.spring.spring, 5.0);
        assert_eq!(config.spring.damping, 0.85);
        assert_eq!(config.geometry.torus, Torus::default());
    }

    #[test]
    fn test_seeded_mapper_uses_jitter() {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(7);
        config.spring.jitter = 0.0;
        assert_eq!(config.impulse_mapper().jitter(), 0.0);
        assert_eq!(config.drift_config().max_delta, 0.1);
    }
}
