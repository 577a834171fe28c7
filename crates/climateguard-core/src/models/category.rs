use std::fmt;

use serde::{Deserialize, Serialize};

/// Goods category used to pick an emission factor.
///
/// `General` is the universal fallback; classification never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    Electronics,
    Clothing,
    Furniture,
    Food,
    Media,
    Entertainment,
    Toys,
    PersonalCare,
    #[default]
    General,
}

impl EmissionCategory {
    pub const ALL: [EmissionCategory; 9] = [
        Self::Electronics,
        Self::Clothing,
        Self::Furniture,
        Self::Food,
        Self::Media,
        Self::Entertainment,
        Self::Toys,
        Self::PersonalCare,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Furniture => "furniture",
            Self::Food => "food",
            Self::Media => "media",
            Self::Entertainment => "entertainment",
            Self::Toys => "toys",
            Self::PersonalCare => "personal_care",
            Self::General => "general",
        }
    }

    /// Resolve a category by name. Unknown names map to `General`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Self::General)
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
