use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Tunables for select-driven movement.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub enabled: bool,
    /// Units per second.
    pub speed: f32,
    /// A wall hit closer than this along the movement direction refuses the step.
    pub wall_limit: f32,
    /// Height above the dolly origin the wall probe is cast from.
    pub body_height: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        LocomotionConfig {
            enabled: true,
            speed: 2.0,
            wall_limit: 1.3,
            body_height: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    pub max_range: f32,
    /// Floor probes start this far above the point being tested.
    pub floor_probe_height: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        RaycastConfig {
            max_range: 50.0,
            floor_probe_height: 1.5,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    pub locomotion: LocomotionConfig,
    pub raycast: RaycastConfig,
}

impl WalkthroughConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}
