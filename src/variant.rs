//! Routing problem variants.

use crate::error::InvalidInputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which cumulative constraint the engine registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Distance dimension with a global span penalty: balances route lengths.
    PlainVrp,
    /// Capacity dimension bounded by each vehicle's capacity.
    Cvrp,
}

/// An entry of the variant catalogue shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantEntry {
    pub name: &'static str,
    pub key: &'static str,
    pub active: bool,
}

const CATALOGUE: [VariantEntry; 5] = [
    VariantEntry {
        name: "Vehicle Routing Problem",
        key: "vrp",
        active: true,
    },
    VariantEntry {
        name: "Capacitated VRP",
        key: "cvrp",
        active: true,
    },
    VariantEntry {
        name: "VRP with Time Windows",
        key: "vrptw",
        active: false,
    },
    VariantEntry {
        name: "VRP with Pickup and Delivery",
        key: "vrppd",
        active: false,
    },
    VariantEntry {
        name: "VRP with Backhauls",
        key: "vrpb",
        active: false,
    },
];

impl Variant {
    /// All known variants, including the inactive ones.
    pub fn catalogue() -> &'static [VariantEntry] {
        &CATALOGUE
    }

    /// Short key used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Variant::PlainVrp => "vrp",
            Variant::Cvrp => "cvrp",
        }
    }

    /// Name of the dimension this variant registers.
    pub fn dimension_name(&self) -> &'static str {
        match self {
            Variant::PlainVrp => "Distance",
            Variant::Cvrp => "Capacity",
        }
    }
}

impl FromStr for Variant {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vrp" | "plain_vrp" => Ok(Variant::PlainVrp),
            "cvrp" => Ok(Variant::Cvrp),
            other => Err(InvalidInputError::UnsupportedVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = CATALOGUE
            .iter()
            .find(|entry| entry.key == self.key())
            .map(|entry| entry.name)
            .unwrap_or_default();
        write!(f, "{}", name)
    }
}
