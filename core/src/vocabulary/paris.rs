//! Field values of the Paris `logement-encadrement-des-loyers` dataset.

use encadre_common::category::{ConstructionPeriod, RoomCount};

use super::Mapping;

pub const FURNISHED: &str = "meublé";
pub const UNFURNISHED: &str = "non meublé";

/// `piece` value. The dataset caps rooms at "4".
pub fn piece(room_count: RoomCount) -> &'static str {
    match room_count {
        RoomCount::One => "1",
        RoomCount::Two => "2",
        RoomCount::Three => "3",
        RoomCount::FourOrMore => "4",
    }
}

/// `epoque` value. "Apres 1990" carries no accent upstream, unlike "Avant 1946".
pub fn epoque(period: ConstructionPeriod) -> &'static str {
    match period {
        ConstructionPeriod::Before1946 => "Avant 1946",
        ConstructionPeriod::From1946To1970 => "1946-1970",
        ConstructionPeriod::From1971To1990 => "1971-1990",
        ConstructionPeriod::After1990 => "Apres 1990",
    }
}

/// `meuble_txt` value.
pub fn meuble_txt(is_furnished: bool) -> &'static str {
    if is_furnished { FURNISHED } else { UNFURNISHED }
}

/// Maps a UI room-count code ("1".."3", "4+").
pub fn room_count(input: &str) -> Mapping<'_, &'static str> {
    match input.parse::<RoomCount>() {
        Ok(room_count) => Mapping::Mapped(piece(room_count)),
        Err(_) => Mapping::Unmapped(input),
    }
}

/// Maps a UI construction-period code ("avant-1946", ...).
pub fn construction_period(input: &str) -> Mapping<'_, &'static str> {
    match input.parse::<ConstructionPeriod>() {
        Ok(period) => Mapping::Mapped(epoque(period)),
        Err(_) => Mapping::Unmapped(input),
    }
}

/// Maps a UI furnished code ("meuble" / "non-meuble").
pub fn furnished(input: &str) -> Mapping<'_, &'static str> {
    match super::furnished(input) {
        Mapping::Mapped(flag) => Mapping::Mapped(meuble_txt(flag)),
        Mapping::Unmapped(raw) => Mapping::Unmapped(raw),
    }
}
