//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::StemError;

/// Unique identifier for organisms, never reused within one simulation lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generation counter (simulation time unit)
pub type Generation = u32;

/// 2D position on the logical canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which rule-set an organism follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Prey,
    Predator,
}

/// Habitat the population lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Forest,
    Desert,
    Arctic,
}

/// Base mortality pressure on prey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predation {
    Low,
    #[default]
    Medium,
    High,
}

/// Food supply, penalising survival and breeding when scarce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodAvailability {
    Low,
    #[default]
    Medium,
    High,
}

macro_rules! keyword_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $kw:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $kw),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = StemError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($kw => Ok($ty::$variant),)+
                    _ => Err(StemError::invalid($label, s)),
                }
            }
        }
    };
}

keyword_enum!(Role, "role", { Prey => "prey", Predator => "predator" });
keyword_enum!(Environment, "environment", {
    Forest => "forest",
    Desert => "desert",
    Arctic => "arctic",
});
keyword_enum!(Predation, "predation", { Low => "low", Medium => "medium", High => "high" });
keyword_enum!(FoodAvailability, "foodAvailability", {
    Low => "low",
    Medium => "medium",
    High => "high",
});
