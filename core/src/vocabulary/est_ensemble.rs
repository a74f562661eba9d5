//! Field values of the Est Ensemble rent-table snapshot.

use std::fmt;

use encadre_common::category::{ConstructionPeriod, RoomCount};
use serde::Deserialize;

use super::Mapping;

/// `nombre_de_piece` column: a plain number up to three rooms, a label beyond.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PieceCount {
    Count(u8),
    Label(String),
}

pub const FOUR_OR_MORE: &str = "4 et plus";

impl fmt::Display for PieceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceCount::Count(n) => write!(f, "{n}"),
            PieceCount::Label(label) => f.write_str(label),
        }
    }
}

pub fn piece(room_count: RoomCount) -> PieceCount {
    match room_count {
        RoomCount::One => PieceCount::Count(1),
        RoomCount::Two => PieceCount::Count(2),
        RoomCount::Three => PieceCount::Count(3),
        RoomCount::FourOrMore => PieceCount::Label(FOUR_OR_MORE.to_string()),
    }
}

/// `annee_de_construction` value, lowercase in this dataset.
pub fn annee_de_construction(period: ConstructionPeriod) -> &'static str {
    match period {
        ConstructionPeriod::Before1946 => "avant 1946",
        ConstructionPeriod::From1946To1970 => "1946-1970",
        ConstructionPeriod::From1971To1990 => "1971-1990",
        ConstructionPeriod::After1990 => "apres 1990",
    }
}

pub fn room_count(input: &str) -> Mapping<'_, PieceCount> {
    match input.parse::<RoomCount>() {
        Ok(room_count) => Mapping::Mapped(piece(room_count)),
        Err(_) => Mapping::Unmapped(input),
    }
}

pub fn construction_period(input: &str) -> Mapping<'_, &'static str> {
    match input.parse::<ConstructionPeriod>() {
        Ok(period) => Mapping::Mapped(annee_de_construction(period)),
        Err(_) => Mapping::Unmapped(input),
    }
}
