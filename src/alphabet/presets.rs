//! Built-in flap sets.

use serde::Deserialize;

/// Named flap set shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum AlphabetPreset {
    /// 45 faces: blank, `A`-`Z`, umlauts, digits and punctuation.
    #[default]
    German45,
    /// 37 faces: `A`-`Z`, digits, blank last.
    Latin37,
}

/// Symbols of the 45-face German flap set, in rotor order.
pub const GERMAN_45: [&str; 45] = [
    " ", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "Ä", "Ö", "Ü", "0", "1", "2", "3", "4", "5", "6", "7",
    "8", "9", ":", ".", "-", "?", "!",
];

/// Lowercase umlauts resolve to their uppercase faces.
pub const GERMAN_45_ALIASES: [(&str, &str); 3] = [("ä", "Ä"), ("ö", "Ö"), ("ü", "Ü")];

/// ASCII spellings of the umlaut faces.
pub const GERMAN_45_DIGRAPHS: [(&str, &str); 3] = [("AE", "Ä"), ("OE", "Ö"), ("UE", "Ü")];

/// Symbols of the 37-face Latin flap set, in rotor order.
pub const LATIN_37: [&str; 37] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", " ",
];

impl AlphabetPreset {
    /// Symbols in rotor order.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            AlphabetPreset::German45 => &GERMAN_45,
            AlphabetPreset::Latin37 => &LATIN_37,
        }
    }

    /// Alias token to symbol pairs.
    pub fn aliases(self) -> &'static [(&'static str, &'static str)] {
        match self {
            AlphabetPreset::German45 => &GERMAN_45_ALIASES,
            AlphabetPreset::Latin37 => &[],
        }
    }

    /// Digraph to symbol pairs.
    pub fn digraphs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            AlphabetPreset::German45 => &GERMAN_45_DIGRAPHS,
            AlphabetPreset::Latin37 => &[],
        }
    }
}
