//! # Vocabulary Mapper
//!
//! Translates the UI-facing category codes into the field values each dataset
//! expects. Every table is spelled out; nothing is inferred.
//!
//! Unknown input is reported as [`Mapping::Unmapped`] instead of silently passing
//! through, so a caller can choose between tolerating it
//! ([`Mapping::or_passthrough`]) and failing loudly ([`Mapping::into_result`]).
//!
//! The typed functions (`paris::epoque`, `est_ensemble::piece`, ...) serve the
//! resolvers. The string-level mappers take raw UI codes and are the entry point
//! for hosts that receive form values as text; the `encadre` binary parses its
//! furnished flag through [`furnished`].

use thiserror::Error;

pub mod est_ensemble;
pub mod paris;

/// Outcome of translating one UI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping<'a, T> {
    Mapped(T),
    Unmapped(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no dataset value for {axis} {input:?}")]
pub struct VocabularyError {
    pub axis: &'static str,
    pub input: String,
}

impl<'a, T> Mapping<'a, T> {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Mapping::Mapped(_))
    }

    pub fn mapped(self) -> Option<T> {
        match self {
            Mapping::Mapped(value) => Some(value),
            Mapping::Unmapped(_) => None,
        }
    }

    pub fn into_result(self, axis: &'static str) -> Result<T, VocabularyError> {
        match self {
            Mapping::Mapped(value) => Ok(value),
            Mapping::Unmapped(input) => Err(VocabularyError {
                axis,
                input: input.to_string(),
            }),
        }
    }
}

impl<'a> Mapping<'a, &'static str> {
    /// The mapped value, or the raw input unchanged.
    pub fn or_passthrough(self) -> &'a str {
        match self {
            Mapping::Mapped(value) => value,
            Mapping::Unmapped(input) => input,
        }
    }
}

/// Furnished flag from its UI code ("meuble" / "non-meuble").
pub fn furnished(input: &str) -> Mapping<'_, bool> {
    match encadre_common::category::parse_furnished(input) {
        Ok(flag) => Mapping::Mapped(flag),
        Err(_) => Mapping::Unmapped(input),
    }
}
