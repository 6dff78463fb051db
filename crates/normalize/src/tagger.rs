use crate::components::{AddressComponents, NormalizedAddress};
use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::lexicon;

/// Main entry point. Tags a raw address string into components and builds the
/// canonical comparison string.
///
/// Tagging is best-effort: when the token stream does not look like a street
/// address (no leading house number, no street name), the result falls back
/// to the cleaned-up token stream so callers always get a comparable string.
pub fn normalize(raw: &str, cfg: &NormalizeConfig) -> Result<NormalizedAddress, NormalizeError> {
    // Config validation: version 0 is reserved and invalid.
    if cfg.version == 0 {
        return Err(NormalizeError::InvalidConfig(
            "config version must be >= 1".into(),
        ));
    }

    let tokens = tokenize(raw);
    if tokens.is_empty() {
        return Ok(NormalizedAddress::empty(cfg));
    }

    let components = match tag_tokens(&tokens, cfg) {
        Some(components) => components,
        None => {
            // Fallback: the tokenizer already upper-cased, stripped
            // punctuation, and collapsed whitespace, so the joined stream is
            // the light-cleanup form of the raw string.
            return Ok(NormalizedAddress {
                normalized: tokens.join(" "),
                components: AddressComponents::default(),
                version: cfg.version,
            });
        }
    };

    Ok(NormalizedAddress {
        normalized: comparison_string(&components),
        components,
        version: cfg.version,
    })
}

/// Split raw text into upper-cased alphanumeric tokens. `#` is kept as its
/// own token because it marks a unit; every other non-alphanumeric character
/// is a delimiter.
fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_uppercase());
        } else {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if ch == '#' {
                tokens.push("#".to_string());
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Positional tagger over the token stream. Returns `None` when the stream
/// does not resemble a street address, which routes the caller to the
/// fallback path.
fn tag_tokens(tokens: &[String], cfg: &NormalizeConfig) -> Option<AddressComponents> {
    let mut components = AddressComponents::default();
    let mut idx = 0;

    // A street address leads with a house number.
    let first = tokens.first()?;
    if !first.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    components.house_number = Some(first.clone());
    idx += 1;

    // Optional pre-directional.
    if idx < tokens.len() {
        if let Some(abbrev) = lexicon::directional_abbrev(&tokens[idx]) {
            components.pre_directional = Some(directional_form(&tokens[idx], abbrev, cfg));
            idx += 1;
        }
    }

    // Street name runs until a street type or unit designator.
    let mut name_tokens: Vec<&str> = Vec::new();
    while idx < tokens.len() {
        let token = &tokens[idx];
        if let Some(abbrev) = lexicon::street_type_abbrev(token) {
            components.street_type = Some(street_type_form(token, abbrev, cfg));
            idx += 1;
            break;
        }
        if lexicon::unit_designator(token).is_some() && !name_tokens.is_empty() {
            break;
        }
        name_tokens.push(token);
        idx += 1;
    }

    if name_tokens.is_empty() {
        // "12 West St": the directional was the street name, not a prefix.
        match components.pre_directional.take() {
            Some(demoted) => components.street_name = Some(demoted),
            None => return None,
        }
    } else {
        components.street_name = Some(name_tokens.join(" "));
    }

    // Optional post-directional right after the street type.
    if components.street_type.is_some() && idx < tokens.len() {
        if let Some(abbrev) = lexicon::directional_abbrev(&tokens[idx]) {
            components.post_directional = Some(directional_form(&tokens[idx], abbrev, cfg));
            idx += 1;
        }
    }

    // Unit designator plus identifier. A designator without a usable
    // identifier is dropped entirely.
    if idx < tokens.len() {
        if let Some(designator) = lexicon::unit_designator(&tokens[idx]) {
            idx += 1;
            if idx < tokens.len() && is_valid_unit(&tokens[idx]) {
                components.unit_type = Some(designator.to_string());
                components.unit_number = Some(tokens[idx].clone());
                idx += 1;
            }
        }
    }

    tag_tail(&tokens[idx..], &mut components);
    Some(components)
}

/// Tag the trailing city / state / ZIP portion, consuming from the right.
fn tag_tail(tail: &[String], components: &mut AddressComponents) {
    let mut end = tail.len();

    // ZIP, tolerating a split ZIP+4 ("11211-6789" tokenizes as two tokens).
    if end > 0 && is_zip(&tail[end - 1]) {
        components.postal_code = Some(tail[end - 1].clone());
        end -= 1;
    } else if end > 1 && tail[end - 1].len() == 4 && is_all_digits(&tail[end - 1]) && is_zip(&tail[end - 2]) {
        components.postal_code = Some(tail[end - 2].clone());
        end -= 2;
    }

    if end > 0 && lexicon::is_state_code(&tail[end - 1]) {
        components.state = Some(tail[end - 1].clone());
        end -= 1;
    }

    if end > 0 {
        components.city = Some(tail[..end].join(" "));
    }
}

/// Canonical comparison string: street portion only, fixed component order.
fn comparison_string(components: &AddressComponents) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(7);
    for field in [
        &components.house_number,
        &components.pre_directional,
        &components.street_name,
        &components.street_type,
        &components.post_directional,
        &components.unit_type,
        &components.unit_number,
    ] {
        if let Some(value) = field {
            parts.push(value);
        }
    }
    parts.join(" ")
}

fn street_type_form(token: &str, abbrev: &'static str, cfg: &NormalizeConfig) -> String {
    if cfg.abbreviate_street_types {
        abbrev.to_string()
    } else {
        token.to_string()
    }
}

fn directional_form(token: &str, abbrev: &'static str, cfg: &NormalizeConfig) -> String {
    if cfg.abbreviate_directionals {
        abbrev.to_string()
    } else {
        token.to_string()
    }
}

/// A unit identifier is comparable only when purely numeric or mixed
/// alphanumeric; bare alphabetic fragments ("REAR", "UPPER") carry no
/// identity.
fn is_valid_unit(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let has_alpha = token.chars().any(|c| c.is_alphabetic());
    has_digit && (is_all_digits(token) || has_alpha)
}

fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn is_zip(token: &str) -> bool {
    token.len() == 5 && is_all_digits(token)
}
