//! Serializable gleaner configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::translate::Translate;
use crate::value::{Cast, Value};

/// A category entry: either a bare pattern or a pattern with a cast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryDef {
    Pattern(String),
    Detailed {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cast: Option<Cast>,
    },
}

impl CategoryDef {
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Pattern(p) | Self::Detailed { pattern: p, .. } => p,
        }
    }

    #[must_use]
    pub fn cast(&self) -> Option<Cast> {
        match self {
            Self::Pattern(_) => None,
            Self::Detailed { cast, .. } => cast.clone(),
        }
    }
}

impl From<&str> for CategoryDef {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

/// Everything needed to rebuild a [`crate::Gleaner`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GleanerConfig {
    #[serde(default)]
    pub categories: IndexMap<String, CategoryDef>,

    /// Translation requests per category, applied in order.
    #[serde(default)]
    pub translations: IndexMap<String, Vec<Translate>>,

    /// Value reported for categories that find nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Value>,
}

impl GleanerConfig {
    /// The categories used in the lab-notebook example: coil current,
    /// field, sweep range and polarization.
    #[must_use]
    pub fn example() -> Self {
        let mut categories = IndexMap::new();
        categories.insert(
            "current".to_string(),
            CategoryDef::Detailed {
                pattern: r"(\d+)uA".to_string(),
                cast: Some(Cast::Float),
            },
        );
        categories.insert("bfield".to_string(), r"(\d+)G".into());
        categories.insert("start_angle".to_string(), r"(-?\d+)to".into());
        categories.insert("end_angle".to_string(), r"(-?\d+)deg".into());
        categories.insert("pol".to_string(), "pol(up|down|dn)".into());

        let mut translations = IndexMap::new();
        translations.insert("pol".to_string(), vec![Translate::literal("dn", "down")]);

        Self {
            categories,
            translations,
            fill: None,
        }
    }
}
