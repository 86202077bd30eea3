//! Category module - the fixed product category vocabulary

use std::fmt;

/// Product category of a catalog entry
///
/// The set is closed; localized tokens that map onto each category are
/// owned by the field extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Industrial high-bay and workshop fixtures
    Industrial,

    /// Street and outdoor area lighting
    Street,

    /// Office and commercial interior panels
    Office,

    /// Sports arena lighting
    Sport,

    /// Explosion-proof fixtures for hazardous areas
    ExplosionProof,

    /// Floodlights
    Floodlight,
}

impl Category {
    /// All categories in vocabulary order
    pub const ALL: [Category; 6] = [
        Category::Industrial,
        Category::Street,
        Category::Office,
        Category::Sport,
        Category::ExplosionProof,
        Category::Floodlight,
    ];

    /// Get the canonical category name as written to the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Industrial => "industrial",
            Category::Street => "street",
            Category::Office => "office",
            Category::Sport => "sport",
            Category::ExplosionProof => "explosion-proof",
            Category::Floodlight => "floodlight",
        }
    }

    /// Parse a canonical category name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == lowered)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
