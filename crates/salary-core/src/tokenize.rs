//! Comma-list tokenization for open-vocabulary fields (skills, job fields).
//!
//! Both the feature encoder and the result composer count tokens from the
//! same raw string, so both go through [`tokenize_list`].

/// Tokens of a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermList {
    /// Trimmed, lowercased, non-empty terms in input order.
    pub terms: Vec<String>,
    /// Number of comma-separated pieces before empties were dropped.
    ///
    /// An empty string is one piece, so this is never zero.
    pub raw_count: usize,
}

impl TermList {
    /// Number of usable terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Split on commas, trim, lowercase and discard empty pieces.
pub fn tokenize_list(raw: &str) -> TermList {
    let mut raw_count = 0;
    let terms = raw
        .split(',')
        .inspect(|_| raw_count += 1)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
        .collect();
    TermList { terms, raw_count }
}

/// Turn a term into a slot-name suffix, replacing each listed character
/// with an underscore.
pub fn slot_suffix(term: &str, separators: &[char]) -> String {
    term.chars()
        .map(|c| if separators.contains(&c) { '_' } else { c })
        .collect()
}
