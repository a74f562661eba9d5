//! # Regulation Category
//!
//! The key a rent-control lookup is made under. Each axis is a closed enum parsed
//! from the UI-facing codes, so a [`RegulationCategory`] cannot be partially set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CategoryError;

/// Number of main rooms. The datasets cap the category at four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCount {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4+")]
    FourOrMore,
}

impl RoomCount {
    pub const ALL: [RoomCount; 4] = [
        RoomCount::One,
        RoomCount::Two,
        RoomCount::Three,
        RoomCount::FourOrMore,
    ];

    /// UI code ("1", "2", "3", "4+").
    pub fn code(self) -> &'static str {
        match self {
            RoomCount::One => "1",
            RoomCount::Two => "2",
            RoomCount::Three => "3",
            RoomCount::FourOrMore => "4+",
        }
    }
}

impl FromStr for RoomCount {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(RoomCount::One),
            "2" => Ok(RoomCount::Two),
            "3" => Ok(RoomCount::Three),
            "4+" | "4" => Ok(RoomCount::FourOrMore),
            other => Err(CategoryError::RoomCount(other.to_string())),
        }
    }
}

/// Construction period band shared by both territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionPeriod {
    #[serde(rename = "avant-1946")]
    Before1946,
    #[serde(rename = "1946-1970")]
    From1946To1970,
    #[serde(rename = "1971-1990")]
    From1971To1990,
    #[serde(rename = "apres-1990")]
    After1990,
}

impl ConstructionPeriod {
    pub const ALL: [ConstructionPeriod; 4] = [
        ConstructionPeriod::Before1946,
        ConstructionPeriod::From1946To1970,
        ConstructionPeriod::From1971To1990,
        ConstructionPeriod::After1990,
    ];

    /// UI code ("avant-1946", "1946-1970", "1971-1990", "apres-1990").
    pub fn code(self) -> &'static str {
        match self {
            ConstructionPeriod::Before1946 => "avant-1946",
            ConstructionPeriod::From1946To1970 => "1946-1970",
            ConstructionPeriod::From1971To1990 => "1971-1990",
            ConstructionPeriod::After1990 => "apres-1990",
        }
    }
}

impl FromStr for ConstructionPeriod {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "avant-1946" => Ok(ConstructionPeriod::Before1946),
            "1946-1970" => Ok(ConstructionPeriod::From1946To1970),
            "1971-1990" => Ok(ConstructionPeriod::From1971To1990),
            "apres-1990" => Ok(ConstructionPeriod::After1990),
            other => Err(CategoryError::ConstructionPeriod(other.to_string())),
        }
    }
}

/// Only Est Ensemble distinguishes houses from apartments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildingType {
    #[default]
    #[serde(rename = "appartement")]
    Apartment,
    #[serde(rename = "maison")]
    House,
}

impl BuildingType {
    pub fn code(self) -> &'static str {
        match self {
            BuildingType::Apartment => "appartement",
            BuildingType::House => "maison",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BuildingType {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "appartement" => Ok(BuildingType::Apartment),
            "maison" => Ok(BuildingType::House),
            other => Err(CategoryError::BuildingType(other.to_string())),
        }
    }
}

/// Parses the UI furnished flag ("meuble" / "non-meuble").
pub fn parse_furnished(code: &str) -> Result<bool, CategoryError> {
    match code.trim() {
        "meuble" => Ok(true),
        "non-meuble" => Ok(false),
        other => Err(CategoryError::Furnished(other.to_string())),
    }
}

/// A complete lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegulationCategory {
    pub room_count: RoomCount,
    pub construction_period: ConstructionPeriod,
    pub is_furnished: bool,
    pub building_type: BuildingType,
}

impl RegulationCategory {
    pub fn new(
        room_count: RoomCount,
        construction_period: ConstructionPeriod,
        is_furnished: bool,
        building_type: BuildingType,
    ) -> Self {
        Self {
            room_count,
            construction_period,
            is_furnished,
            building_type,
        }
    }

    /// Builds a category from the four UI codes, rejecting any unknown value.
    pub fn from_codes(
        room_count: &str,
        construction_period: &str,
        furnished: &str,
        building_type: &str,
    ) -> Result<Self, CategoryError> {
        Ok(Self {
            room_count: room_count.parse()?,
            construction_period: construction_period.parse()?,
            is_furnished: parse_furnished(furnished)?,
            building_type: building_type.parse()?,
        })
    }

    pub fn with_building_type(self, building_type: BuildingType) -> Self {
        Self {
            building_type,
            ..self
        }
    }
}
