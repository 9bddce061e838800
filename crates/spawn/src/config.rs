//! Static configuration, loaded once from YAML or JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shapes_common::Attribute;
use shapes_kernel::{Category, PopulationError, Vocabularies, Vocabulary};
use std::path::Path;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] PopulationError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Inclusive range the per-kind population target is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: usize,
    pub max: usize,
}

impl Default for TargetRange {
    fn default() -> Self {
        Self { min: 4, max: 7 }
    }
}

/// Box that items are placed in, plus the range of their uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub min: Vec3,
    pub max: Vec3,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self {
            min: Vec3::new(-500.0, -500.0, 0.0),
            max: Vec3::new(500.0, 500.0, 300.0),
            scale_min: 0.5,
            scale_max: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub kinds: Vec<Category>,
    pub colors: Vec<Category>,
    /// Largest count gap over the vacated category that is still tolerated.
    pub tolerance: u32,
    pub count_per_kind: usize,
    pub target_range: TargetRange,
    pub region: SpawnRegion,
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            kinds: ["Cube", "Sphere", "Cone", "Cylinder"]
                .iter()
                .map(|l| Category::new(l.to_lowercase(), *l))
                .collect(),
            colors: ["Red", "Green", "Blue"]
                .iter()
                .map(|l| Category::new(l.to_lowercase(), *l))
                .collect(),
            tolerance: 1,
            count_per_kind: 4,
            target_range: TargetRange::default(),
            region: SpawnRegion::default(),
            seed: 42,
        }
    }
}

impl SpawnConfig {
    /// Load from a file. `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vocabularies()?;
        if self.target_range.min > self.target_range.max {
            return Err(ConfigError::Invalid(format!(
                "target_range min {} exceeds max {}",
                self.target_range.min, self.target_range.max
            )));
        }
        if self.region.min.cmpgt(self.region.max).any() {
            return Err(ConfigError::Invalid(
                "region min corner lies beyond its max corner".into(),
            ));
        }
        if self.region.scale_min <= 0.0 || self.region.scale_min > self.region.scale_max {
            return Err(ConfigError::Invalid(format!(
                "scale range {}..{} must be positive and ordered",
                self.region.scale_min, self.region.scale_max
            )));
        }
        Ok(())
    }

    /// Build the kind and color vocabularies this config describes.
    pub fn vocabularies(&self) -> Result<Vocabularies, PopulationError> {
        Ok(Vocabularies::new(
            Vocabulary::new(Attribute::Kind, self.kinds.clone())?,
            Vocabulary::new(Attribute::Color, self.colors.clone())?,
        ))
    }
}
