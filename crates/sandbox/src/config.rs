//! Sandbox configuration
//!
//! Loaded from `sandbox.toml` next to the binary; every section falls back
//! to defaults so a missing or partial file still launches.

use orbit_engine::config::{Config, Deserialize, Serialize};

/// Top-level sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Planet settings
    pub planet: PlanetSettings,

    /// Camera settings
    pub camera: CameraSettings,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// Window title
    pub title: String,
}

/// Planet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetSettings {
    /// Planet radius; the surface passes through the world origin
    pub radius: f32,

    /// Base gravitational acceleration
    pub gravity: f32,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clipping plane distance
    pub near: f32,

    /// Far clipping plane distance
    pub far: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            planet: PlanetSettings::default(),
            camera: CameraSettings::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 720,
            title: "Planet Sandbox".to_string(),
        }
    }
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            radius: 200.0,
            gravity: 9.8,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

impl Config for SandboxConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = SandboxConfig::default();
        assert!(config.planet.radius > 0.0);
        assert!(config.planet.gravity > 0.0);
        assert!(config.camera.far > config.camera.near);
        assert!(config.window.width > 0 && config.window.height > 0);
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let path = std::env::temp_dir().join("sandbox_config_roundtrip.toml");
        let path = path.to_str().unwrap().to_string();

        let mut config = SandboxConfig::default();
        config.planet.radius = 123.0;
        config.save_to_file(&path).unwrap();

        let loaded = SandboxConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.planet.radius, 123.0);
        assert_eq!(loaded.window.title, config.window.title);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(SandboxConfig::load_from_file("definitely_missing.toml").is_err());
    }
}
