use serde::{Deserialize, Serialize};

use crate::config::NormalizeConfig;

/// Structured components recognized in a raw address string.
///
/// Every field is optional: the tagger is best-effort and leaves anything it
/// could not place unset. All values are upper-cased and punctuation-free.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressComponents {
    /// Leading house/building number ("123").
    pub house_number: Option<String>,
    /// Directional before the street name ("N", "SW").
    pub pre_directional: Option<String>,
    /// The street name proper, possibly multi-word ("MARTIN LUTHER KING").
    pub street_name: Option<String>,
    /// Street type, abbreviated when recognized ("ST", "AVE", "BLVD").
    pub street_type: Option<String>,
    /// Directional after the street type.
    pub post_directional: Option<String>,
    /// Canonical unit designator ("APT", "STE", "FL").
    pub unit_type: Option<String>,
    /// Unit identifier; numeric or mixed alphanumeric only ("4B", "12").
    pub unit_number: Option<String>,
    /// City name when one could be recognized after the street portion.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    /// 5-digit ZIP code.
    pub postal_code: Option<String>,
}

/// Output of [`normalize`](crate::normalize): the recognized components plus
/// the canonical comparison string built from them.
///
/// The comparison string covers only the street portion (house number,
/// directionals, street name/type, unit); city, state, and ZIP are carried as
/// components but deliberately excluded so that registries keyed on street
/// lines compare cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedAddress {
    /// Canonical comparison string: upper-cased, punctuation-free,
    /// single-spaced, components in fixed order. Empty when the input was
    /// empty.
    pub normalized: String,
    /// Best-effort structured components.
    pub components: AddressComponents,
    /// Version of the [`NormalizeConfig`] that produced this result.
    pub version: u32,
}

impl NormalizedAddress {
    pub(crate) fn empty(cfg: &NormalizeConfig) -> Self {
        Self {
            normalized: String::new(),
            components: AddressComponents::default(),
            version: cfg.version,
        }
    }
}
