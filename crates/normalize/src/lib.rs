//! Address normalization layer.
//!
//! This crate turns a free-form US street address into structured components
//! and a deterministic comparison string. Downstream stages (registry index,
//! exact/fuzzy/phonetic matchers) rely on this for stable identity.
//!
//! ## What we do
//!
//! - Tokenization (punctuation stripped, whitespace collapsed, upper-cased)
//! - Positional tagging of house number, directionals, street name/type,
//!   unit designator and number, city/state/ZIP
//! - USPS-style abbreviation of street types and directionals
//! - A single normalized string built from the recognized components in a
//!   fixed canonical order
//! - Metaphone and Soundex key derivation for phonetic blocking
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Give us the same text and
//! config, you get the same components and normalized string on any machine.
//!
//! ## Never fails on bad input
//!
//! Malformed or unrecognizable addresses degrade to a cleaned-up copy of the
//! raw string (still upper-cased, punctuation-free, single-spaced) with the
//! unrecognized components left unset. Only an invalid config is an error.
//! Empty input yields an empty normalized string and all components unset.

mod components;
mod config;
mod error;
mod lexicon;
mod phonetic;
mod tagger;

pub use crate::components::{AddressComponents, NormalizedAddress};
pub use crate::config::NormalizeConfig;
pub use crate::error::NormalizeError;
pub use crate::phonetic::{phonetic_keys, PhoneticKeys};
pub use crate::tagger::normalize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_street_address_is_tagged_and_abbreviated() {
        let cfg = NormalizeConfig::default();
        let out = normalize("123 Main Street", &cfg).expect("normalization succeeds");

        assert_eq!(out.normalized, "123 MAIN ST");
        assert_eq!(out.components.house_number.as_deref(), Some("123"));
        assert_eq!(out.components.street_name.as_deref(), Some("MAIN"));
        assert_eq!(out.components.street_type.as_deref(), Some("ST"));
        assert!(out.components.pre_directional.is_none());
    }

    #[test]
    fn directionals_are_abbreviated_in_place() {
        let cfg = NormalizeConfig::default();
        let out = normalize("500 North Oak Avenue West", &cfg).expect("normalization succeeds");

        assert_eq!(out.normalized, "500 N OAK AVE W");
        assert_eq!(out.components.pre_directional.as_deref(), Some("N"));
        assert_eq!(out.components.post_directional.as_deref(), Some("W"));
    }

    #[test]
    fn unit_designator_and_number_survive() {
        let cfg = NormalizeConfig::default();
        let out = normalize("77 Elm St Apt 4B", &cfg).expect("normalization succeeds");

        assert_eq!(out.normalized, "77 ELM ST APT 4B");
        assert_eq!(out.components.unit_type.as_deref(), Some("APT"));
        assert_eq!(out.components.unit_number.as_deref(), Some("4B"));
    }

    #[test]
    fn alphabetic_only_unit_is_discarded() {
        // "Apt Rear" carries no apartment identity worth comparing on.
        let cfg = NormalizeConfig::default();
        let out = normalize("77 Elm St Apt Rear", &cfg).expect("normalization succeeds");

        assert_eq!(out.normalized, "77 ELM ST");
        assert!(out.components.unit_number.is_none());
    }

    #[test]
    fn city_state_zip_are_captured_but_not_compared() {
        let cfg = NormalizeConfig::default();
        let out =
            normalize("123 Main St, Brooklyn, NY 11211", &cfg).expect("normalization succeeds");

        assert_eq!(out.normalized, "123 MAIN ST");
        assert_eq!(out.components.city.as_deref(), Some("BROOKLYN"));
        assert_eq!(out.components.state.as_deref(), Some("NY"));
        assert_eq!(out.components.postal_code.as_deref(), Some("11211"));
    }

    #[test]
    fn unrecognizable_input_falls_back_to_cleanup() {
        let cfg = NormalizeConfig::default();
        let out = normalize("c/o   The  Smiths!!", &cfg).expect("normalization succeeds");

        // No house number, no street type: fallback keeps the cleaned tokens.
        assert_eq!(out.normalized, "C O THE SMITHS");
        assert!(out.components.street_name.is_none());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let cfg = NormalizeConfig::default();
        let out = normalize("   ", &cfg).expect("normalization succeeds");

        assert!(out.normalized.is_empty());
        assert_eq!(out.components, AddressComponents::default());
    }

    #[test]
    fn normalization_is_deterministic() {
        let cfg = NormalizeConfig::default();
        let a = normalize("456 W Oak Ave Suite 12, Austin TX 78701", &cfg).expect("first");
        let b = normalize("456 W Oak Ave Suite 12, Austin TX 78701", &cfg).expect("second");

        assert_eq!(a, b);
    }

    #[test]
    fn equivalent_spellings_normalize_identically() {
        let cfg = NormalizeConfig::default();
        let a = normalize("123 Main Street", &cfg).expect("long form");
        let b = normalize("123 MAIN ST.", &cfg).expect("short form");

        assert_eq!(a.normalized, b.normalized);
    }

    #[test]
    fn invalid_config_version_rejected() {
        let cfg = NormalizeConfig {
            version: 0,
            ..Default::default()
        };
        let res = normalize("123 Main St", &cfg);
        assert!(matches!(res, Err(NormalizeError::InvalidConfig(_))));
    }

    #[test]
    fn phonetic_keys_stable_across_spelling_noise() {
        let cfg = NormalizeConfig::default();
        let a = normalize("789 Elm Blvd", &cfg).expect("canonical spelling");
        let b = normalize("789 Ellm Boulevard", &cfg).expect("noisy spelling");

        let ka = phonetic_keys(&a.normalized);
        let kb = phonetic_keys(&b.normalized);
        assert_eq!(ka.metaphone, kb.metaphone);
    }
}
