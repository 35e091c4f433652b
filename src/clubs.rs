//! Club selection and strength multipliers

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Club the player swings with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Club {
    #[default]
    Driver,
    Iron,
    Hybrid,
    Putter,
}

impl Club {
    /// All clubs in selector order
    pub const ALL: [Club; 4] = [Club::Driver, Club::Iron, Club::Hybrid, Club::Putter];

    /// Name for display and config
    pub fn name(&self) -> &'static str {
        match self {
            Club::Driver => "driver",
            Club::Iron => "iron",
            Club::Hybrid => "hybrid",
            Club::Putter => "putter",
        }
    }

    /// Parse a club name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|club| club.name() == name)
    }

    /// Next club in selector order (wraps)
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Club {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn default_driver() -> f64 {
    DRIVER_MULTIPLIER
}
fn default_iron() -> f64 {
    IRON_MULTIPLIER
}
fn default_hybrid() -> f64 {
    HYBRID_MULTIPLIER
}
fn default_putter() -> f64 {
    PUTTER_MULTIPLIER
}

/// Strength multiplier for every club
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClubMultipliers {
    #[serde(default = "default_driver")]
    pub driver: f64,
    #[serde(default = "default_iron")]
    pub iron: f64,
    #[serde(default = "default_hybrid")]
    pub hybrid: f64,
    #[serde(default = "default_putter")]
    pub putter: f64,
}

impl Default for ClubMultipliers {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            iron: default_iron(),
            hybrid: default_hybrid(),
            putter: default_putter(),
        }
    }
}

impl ClubMultipliers {
    /// Multiplier applied to swing strength for this club
    pub fn get(&self, club: Club) -> f64 {
        match club {
            Club::Driver => self.driver,
            Club::Iron => self.iron,
            Club::Hybrid => self.hybrid,
            Club::Putter => self.putter,
        }
    }

    /// Replace non-positive or non-finite multipliers with their defaults
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let fix = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            driver: fix(self.driver, defaults.driver),
            iron: fix(self.iron, defaults.iron),
            hybrid: fix(self.hybrid, defaults.hybrid),
            putter: fix(self.putter, defaults.putter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_multipliers() {
        let table = ClubMultipliers::default();
        assert_eq!(table.get(Club::Driver), 1.2);
        assert_eq!(table.get(Club::Iron), 0.9);
        assert_eq!(table.get(Club::Hybrid), 1.0);
        assert_eq!(table.get(Club::Putter), 0.5);
    }

    #[test]
    fn test_club_cycle_wraps() {
        assert_eq!(Club::Driver.next(), Club::Iron);
        assert_eq!(Club::Putter.next(), Club::Driver);
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Club::from_name("Putter"), Some(Club::Putter));
        assert_eq!(Club::from_name(" HYBRID "), Some(Club::Hybrid));
        assert_eq!(Club::from_name("wedge"), None);
    }

    #[test]
    fn test_invalid_multiplier_falls_back() {
        let table = ClubMultipliers {
            driver: -1.0,
            iron: f64::NAN,
            hybrid: 2.0,
            putter: 0.0,
        }
        .validated();
        assert_eq!(table.driver, DRIVER_MULTIPLIER);
        assert_eq!(table.iron, IRON_MULTIPLIER);
        assert_eq!(table.hybrid, 2.0);
        assert_eq!(table.putter, PUTTER_MULTIPLIER);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let table: ClubMultipliers = serde_json::from_str(r#"{ "driver": 1.5 }"#).unwrap();
        assert_eq!(table.driver, 1.5);
        assert_eq!(table.putter, PUTTER_MULTIPLIER);
    }
}
