use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::input::{default_bindings, KeyBind, SteerAction};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub key_bindings: HashMap<SteerAction, KeyBind>,
    pub scene: SceneConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Static obstacle placements in intrinsic ribbon coordinates.
    pub obstacles: Vec<ObstaclePlacement>,
}

/// Where an obstacle sits on the ribbon: angle around the loop in radians,
/// lateral position in [-1, 1], face selector in {-1, +1}.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    pub angle: f32,
    pub lateral: f32,
    pub vertical: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            key_bindings: default_bindings(),
            scene: SceneConfig {
                obstacles: vec![
                    ObstaclePlacement {
                        angle: 0.0,
                        lateral: 0.0,
                        vertical: 1.0,
                    },
                    ObstaclePlacement {
                        angle: 1.6,
                        lateral: 0.5,
                        vertical: 1.0,
                    },
                    ObstaclePlacement {
                        angle: 2.9,
                        lateral: -0.5,
                        vertical: -1.0,
                    },
                    ObstaclePlacement {
                        angle: 4.4,
                        lateral: 1.0,
                        vertical: -1.0,
                    },
                    ObstaclePlacement {
                        angle: 5.5,
                        lateral: -1.0,
                        vertical: 1.0,
                    },
                ],
            },
        }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "ribbonride")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
}

impl GameConfig {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse config: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                let config = Self::default();
                config.save_to(path);
                config
            }
        }
    }

    pub fn save(&self) {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory");
            return;
        };
        self.save_to(&path);
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {e}");
                return;
            }
        }

        match toml::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(path, contents) {
                    log::warn!("Failed to write config: {e}");
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize config: {e}");
            }
        }
    }
}
