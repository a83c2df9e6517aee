use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// User tunables for probe generation, persisted as `settings.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    /// Constant probe color, `(R, G, B)`.
    #[serde(with = "vec3_xyz")]
    pub color: Vec3,
    pub dir_light_indirect: f32,
    pub point_light_indirect: f32,
    pub spot_light_indirect: f32,
    pub emission_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            dir_light_indirect: 0.525,
            point_light_indirect: 1.0,
            spot_light_indirect: 1.0,
            emission_scale: 8.0,
        }
    }
}

impl Settings {
    /// Loads `settings.json` from `settings_directory`, writing the defaults
    /// first when the file does not exist yet.
    pub fn load(settings_directory: &Path) -> Result<Self> {
        let path = settings_directory.join(SETTINGS_FILE_NAME);

        if !path.exists() {
            log::info!("Writing default settings to {}", path.display());
            Self::default().save(&path)?;
        }

        let text = std::fs::read_to_string(&path)?;

        serde_json::from_str(&text).map_err(|source| Error::SettingsParse { path, source })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Vectors are stored as `{ "X": .., "Y": .., "Z": .. }` objects.
mod vec3_xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: value.x,
            y: value.y,
            z: value.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(x, y, z))
    }
}
