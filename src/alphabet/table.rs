//! Symbol ↔ position lookup table.

use heapless::Vec;

use crate::error::{truncated, ConfigError, Error, Result};

use super::presets::AlphabetPreset;
use super::symbol::{PositionIndex, Symbol, SYMBOL_CAPACITY};

/// Maximum number of faces on a rotor.
pub const MAX_SYMBOLS: usize = 64;

/// Maximum number of aliases and, separately, digraphs.
pub const MAX_ALIASES: usize = 16;

/// Words that always mean the blank face (ASCII case-insensitive).
const BLANK_WORDS: [&str; 2] = ["SPACE", "BLANK"];

/// Ordered flap set with forgiving token lookup.
///
/// Every index maps to exactly one symbol. Aliases and digraphs only add
/// extra spellings for existing faces; they never appear in
/// [`Alphabet::symbol_at`].
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<Symbol, MAX_SYMBOLS>,
    aliases: Vec<(Symbol, PositionIndex), MAX_ALIASES>,
    digraphs: Vec<(Symbol, PositionIndex), MAX_ALIASES>,
    blank: Option<PositionIndex>,
}

impl Alphabet {
    /// Build an alphabet from symbols in rotor order.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, more than [`MAX_SYMBOLS`] entries, tokens
    /// longer than the symbol capacity, or duplicates.
    pub fn new(symbols: &[&str]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::Config(ConfigError::EmptyAlphabet));
        }
        if symbols.len() > MAX_SYMBOLS {
            return Err(Error::Config(ConfigError::AlphabetTooLarge(symbols.len())));
        }

        let mut table: Vec<Symbol, MAX_SYMBOLS> = Vec::new();
        let mut blank = None;
        for token in symbols {
            let symbol = Symbol::new(token)
                .ok_or_else(|| Error::Config(ConfigError::TokenTooLong(truncated(token))))?;
            if table.iter().any(|s| s == &symbol) {
                return Err(Error::Config(ConfigError::DuplicateSymbol(truncated(token))));
            }
            if symbol.is_blank() {
                blank = Some(PositionIndex(table.len() as u16));
            }
            // Length was checked above.
            let _ = table.push(symbol);
        }

        Ok(Self {
            symbols: table,
            aliases: Vec::new(),
            digraphs: Vec::new(),
            blank,
        })
    }

    /// Build one of the shipped flap sets, aliases and digraphs included.
    pub fn from_preset(preset: AlphabetPreset) -> Result<Self> {
        let mut alphabet = Self::new(preset.symbols())?;
        for (alias, target) in preset.aliases() {
            alphabet.add_alias(alias, target)?;
        }
        for (digraph, target) in preset.digraphs() {
            alphabet.add_digraph(digraph, target)?;
        }
        Ok(alphabet)
    }

    /// Add an exact-match spelling for an existing symbol.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let entry = self.extra_spelling(alias, target)?;
        self.aliases
            .push(entry)
            .map_err(|_| Error::Config(ConfigError::TooManyAliases))
    }

    /// Add a case-insensitive ASCII fallback spelling for an existing symbol.
    pub fn add_digraph(&mut self, digraph: &str, target: &str) -> Result<()> {
        let entry = self.extra_spelling(digraph, target)?;
        self.digraphs
            .push(entry)
            .map_err(|_| Error::Config(ConfigError::TooManyAliases))
    }

    fn extra_spelling(&self, alias: &str, target: &str) -> Result<(Symbol, PositionIndex)> {
        if self.exact(alias).is_some() {
            return Err(Error::Config(ConfigError::AliasShadowsSymbol(truncated(alias))));
        }
        let index = self.exact(target).ok_or_else(|| {
            Error::Config(ConfigError::UnknownAliasTarget {
                alias: truncated(alias),
                target: truncated(target),
            })
        })?;
        let key = Symbol::new(alias)
            .ok_or_else(|| Error::Config(ConfigError::TokenTooLong(truncated(alias))))?;
        Ok((key, index))
    }

    /// Number of faces `N`.
    #[inline]
    pub fn len(&self) -> u16 {
        self.symbols.len() as u16
    }

    /// Always false for a constructed alphabet; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Index of the blank face, if the alphabet has one.
    #[inline]
    pub fn blank(&self) -> Option<PositionIndex> {
        self.blank
    }

    /// Symbol on the face at `index`, addressed modulo `N`.
    pub fn symbol_at(&self, index: PositionIndex) -> &Symbol {
        &self.symbols[usize::from(index.0 % self.len())]
    }

    /// Iterate symbols in rotor order.
    pub fn iter(&self) -> impl Iterator<Item = (PositionIndex, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (PositionIndex(i as u16), s))
    }

    /// Resolve a token to a face.
    ///
    /// Tries, in order: exact symbol, exact alias, blank spellings, digraphs,
    /// single ASCII letter in the other case, whole-token ASCII case-fold.
    /// Non-ASCII bytes are only ever compared exactly.
    pub fn index_of(&self, token: &str) -> Option<PositionIndex> {
        if let Some(index) = self.exact(token) {
            return Some(index);
        }
        if let Some((_, index)) = self.aliases.iter().find(|(a, _)| a.as_str() == token) {
            return Some(*index);
        }
        if let Some(blank) = self.blank {
            if is_blank_spelling(token) {
                return Some(blank);
            }
        }
        if let Some((_, index)) = self
            .digraphs
            .iter()
            .find(|(d, _)| d.as_str().eq_ignore_ascii_case(token))
        {
            return Some(*index);
        }

        let bytes = token.as_bytes();
        if bytes.len() == 1 && bytes[0].is_ascii_alphabetic() {
            let c = bytes[0];
            let other = if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            };
            let mut buf = [0u8; 4];
            return self.exact(char::from(other).encode_utf8(&mut buf));
        }

        if bytes.len() <= SYMBOL_CAPACITY {
            return self
                .symbols
                .iter()
                .position(|s| s.as_str().eq_ignore_ascii_case(token))
                .map(|i| PositionIndex(i as u16));
        }

        None
    }

    fn exact(&self, token: &str) -> Option<PositionIndex> {
        self.symbols
            .iter()
            .position(|s| s.as_str() == token)
            .map(|i| PositionIndex(i as u16))
    }
}

fn is_blank_spelling(token: &str) -> bool {
    matches!(token, "" | " " | "_") || BLANK_WORDS.iter().any(|w| w.eq_ignore_ascii_case(token))
}
