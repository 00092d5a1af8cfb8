//! Alphabet configuration from TOML.

use heapless::{FnvIndexMap, String, Vec};
use serde::Deserialize;

use crate::alphabet::{Alphabet, AlphabetPreset, MAX_ALIASES, MAX_SYMBOLS, SYMBOL_CAPACITY};
use crate::error::Result;

/// Flap set description.
///
/// With no `symbols` the preset is used as-is; explicit `symbols` replace
/// the preset entirely. `aliases` and `digraphs` are added on top either way.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlphabetConfig {
    /// Built-in flap set used when `symbols` is empty.
    pub preset: AlphabetPreset,

    /// Custom symbols in rotor order.
    pub symbols: Vec<String<SYMBOL_CAPACITY>, MAX_SYMBOLS>,

    /// Exact alternative spellings, alias → symbol.
    pub aliases: FnvIndexMap<String<SYMBOL_CAPACITY>, String<SYMBOL_CAPACITY>, MAX_ALIASES>,

    /// Case-insensitive ASCII fallbacks, digraph → symbol.
    pub digraphs: FnvIndexMap<String<SYMBOL_CAPACITY>, String<SYMBOL_CAPACITY>, MAX_ALIASES>,
}

impl AlphabetConfig {
    /// Configuration selecting a preset with no extras.
    pub fn preset(preset: AlphabetPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Build the lookup table.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found in the symbol list or the
    /// extra spellings.
    pub fn build(&self) -> Result<Alphabet> {
        let mut alphabet = if self.symbols.is_empty() {
            Alphabet::from_preset(self.preset)?
        } else {
            let mut tokens: Vec<&str, MAX_SYMBOLS> = Vec::new();
            for s in self.symbols.iter() {
                let _ = tokens.push(s.as_str());
            }
            Alphabet::new(&tokens)?
        };

        for (alias, target) in self.aliases.iter() {
            alphabet.add_alias(alias, target)?;
        }
        for (digraph, target) in self.digraphs.iter() {
            alphabet.add_digraph(digraph, target)?;
        }

        Ok(alphabet)
    }
}
