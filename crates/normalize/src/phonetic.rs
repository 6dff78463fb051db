//! Phonetic keying for blocked candidate retrieval.
//!
//! Two independent encodings are derived from a normalized address string:
//! Metaphone (primary) and Soundex (secondary). Downstream blocking treats
//! them as parallel keys so either scheme can pull a candidate into the set.

use rphonetic::{Encoder, Metaphone, Soundex};
use serde::{Deserialize, Serialize};

/// Primary/secondary phonetic encodings of a normalized address string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneticKeys {
    /// Metaphone code of the alphabetic portion of the string.
    pub metaphone: String,
    /// Soundex code of the alphabetic portion of the string.
    pub soundex: String,
}

impl PhoneticKeys {
    /// Both encodings came up empty: nothing to block on.
    pub fn is_empty(&self) -> bool {
        self.metaphone.is_empty() && self.soundex.is_empty()
    }
}

/// Derive the phonetic key pair for a normalized address string.
///
/// Digits and spaces carry no phonetic content, so only the alphabetic
/// characters are fed to the encoders ("123 MAIN ST" encodes "MAINST").
/// An input without alphabetic characters yields empty keys. Deterministic:
/// the same string always produces the same pair.
pub fn phonetic_keys(normalized: &str) -> PhoneticKeys {
    let letters: String = normalized.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return PhoneticKeys::default();
    }

    let metaphone = Metaphone::default().encode(&letters);
    let soundex = Soundex::default().encode(&letters);
    PhoneticKeys { metaphone, soundex }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic() {
        let a = phonetic_keys("123 MAIN ST");
        let b = phonetic_keys("123 MAIN ST");
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn digits_only_input_has_no_keys() {
        let keys = phonetic_keys("12345");
        assert!(keys.is_empty());
    }

    #[test]
    fn doubled_letters_collapse_to_the_same_code() {
        let clean = phonetic_keys("789 ELM BLVD");
        let noisy = phonetic_keys("789 ELLM BLVD");
        assert_eq!(clean.metaphone, noisy.metaphone);
        assert_eq!(clean.soundex, noisy.soundex);
    }

    #[test]
    fn different_streets_usually_differ() {
        let a = phonetic_keys("1 OAK AVE");
        let b = phonetic_keys("1 BIRCH CT");
        assert_ne!(a.metaphone, b.metaphone);
    }
}
