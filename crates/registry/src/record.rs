use normalize::{
    normalize, phonetic_keys, AddressComponents, NormalizeConfig, NormalizeError, PhoneticKeys,
};
use serde::{Deserialize, Serialize};

/// One trusted registry entry. Created at registry load and never mutated by
/// the matching engine; the derived `normalized` string and phonetic keys are
/// materialized here so index construction and matching never re-parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalAddress {
    /// Registry identifier; also the deterministic tie-break key.
    pub id: u64,
    /// Structured fields as recognized by the normalizer.
    pub components: AddressComponents,
    /// Canonical comparison string derived from the structured fields.
    pub normalized: String,
    /// Metaphone/Soundex pair derived from `normalized`.
    pub phonetic: PhoneticKeys,
}

impl CanonicalAddress {
    /// Build a canonical record from a raw single-line address.
    pub fn from_raw(id: u64, raw: &str, cfg: &NormalizeConfig) -> Result<Self, NormalizeError> {
        let parsed = normalize(raw, cfg)?;
        let phonetic = phonetic_keys(&parsed.normalized);
        Ok(Self {
            id,
            components: parsed.components,
            normalized: parsed.normalized,
            phonetic,
        })
    }

    /// Build a canonical record from already-structured fields. The fields
    /// are rendered to a single line and pushed through the same normalizer
    /// as raw input, so canonical and transactional strings always agree on
    /// component order and abbreviations.
    pub fn from_components(
        id: u64,
        fields: &AddressComponents,
        cfg: &NormalizeConfig,
    ) -> Result<Self, NormalizeError> {
        let mut line = String::new();
        for part in [
            &fields.house_number,
            &fields.pre_directional,
            &fields.street_name,
            &fields.street_type,
            &fields.post_directional,
            &fields.unit_type,
            &fields.unit_number,
            &fields.city,
            &fields.state,
            &fields.postal_code,
        ]
        .into_iter()
        .flatten()
        {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(part);
        }
        Self::from_raw(id, &line, cfg)
    }
}
