//! Vocabulary tables for categorical request fields.
//!
//! Two closed, hand-curated tables turn categorical text into numbers:
//! - experience bracket label → estimated years (midpoint of the bracket)
//! - position level label → rank (index in the ordered list)
//!
//! Both are immutable. The built-in tables are constructed once per process
//! and shared through [`Vocabulary::builtin`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Experience bracket labels and the year value each one encodes.
pub const EXPERIENCE_BRACKETS: &[(&str, f64)] = &[
    ("Không yêu cầu", 0.0),
    ("1-2 năm", 1.5),
    ("2-3 năm", 2.5),
    ("Dưới 1 năm", 0.5),
    ("2-5 năm", 3.5),
    ("1-3 năm", 2.0),
    ("1-5 năm", 3.0),
    ("3-5 năm", 4.0),
    ("3-4 năm", 3.5),
    ("5-6 năm", 5.5),
    ("2-4 năm", 3.0),
    ("4-5 năm", 4.5),
    ("5-10 năm", 7.5),
    ("2-10 năm", 6.0),
    ("5-7 năm", 6.0),
    ("3-10 năm", 6.5),
    ("1-10 năm", 5.5),
    ("3-7 năm", 5.0),
    ("1-4 năm", 2.5),
    ("5-8 năm", 6.5),
    ("2-7 năm", 4.5),
    ("2-8 năm", 5.0),
    ("4-6 năm", 5.0),
    ("5-15 năm", 10.0),
    ("6-7 năm", 6.5),
    ("2-15 năm", 8.5),
    ("Trên 10 năm", 10.5),
    ("3-15 năm", 9.0),
    ("2-6 năm", 4.0),
    ("1-8 năm", 4.5),
    ("3-8 năm", 5.5),
    ("1-7 năm", 4.0),
    ("4-10 năm", 7.0),
    ("3-6 năm", 4.5),
    ("5-20 năm", 12.5),
    ("1-15 năm", 8.0),
    ("7-8 năm", 7.5),
    ("3-20 năm", 11.5),
    ("3-9 năm", 5.5),
    ("8-10 năm", 9.0),
    ("4-7 năm", 5.5),
    ("8-15 năm", 11.5),
    ("2-20 năm", 11.0),
    ("7-10 năm", 8.5),
    ("4-8 năm", 6.0),
    ("1-6 năm", 3.5),
    ("2-25 năm", 13.5),
    ("5-25 năm", 15.0),
    ("8-9 năm", 8.5),
    ("1-12 năm", 6.5),
    ("1-9 năm", 5.0),
    ("1-11 năm", 6.0),
    ("2-14 năm", 8.0),
    ("9-10 năm", 9.5),
    ("7-15 năm", 12.5),
    ("6-8 năm", 7.0),
    ("7-12 năm", 9.5),
    ("7-20 năm", 13.5),
    ("3-12 năm", 7.5),
    ("6-10 năm", 8.0),
    ("4-20 năm", 12.0),
    ("1-20 năm", 10.5),
    ("3-17 năm", 10.0),
    ("4-9 năm", 6.5),
    ("7-13 năm", 10.0),
    ("6-11 năm", 8.5),
    ("4-12 năm", 8.0),
    ("3-30 năm", 16.5),
    ("8-20 năm", 14.0),
    ("4-15 năm", 9.5),
    ("1-4", 2.5),
];

/// Position levels ordered from lowest to highest; the index is the rank.
pub const POSITION_ORDER: &[&str] = &[
    "Chưa cập nhật",
    "Cộng tác viên",
    "Thực tập sinh",
    "Nhân viên",
    "Chuyên gia",
    "Trưởng nhóm",
    "Trưởng phòng",
    "Quản lý",
    "Phó giám đốc",
    "Giám đốc",
];

static BUILTIN: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::new(
        EXPERIENCE_BRACKETS
            .iter()
            .map(|(label, years)| (label.to_string(), *years)),
        POSITION_ORDER.iter().map(|label| label.to_string()),
    )
});

/// Experience mapping plus position order.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Labels in insertion order, kept for listing.
    experience_labels: Vec<String>,
    experience: HashMap<String, f64>,
    positions: Vec<String>,
    position_rank: HashMap<String, usize>,
}

/// Serializable listing of the accepted labels, for clients building forms.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyListing {
    pub experience_levels: Vec<String>,
    pub position_levels: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from experience pairs and ordered position labels.
    ///
    /// A repeated experience label keeps its last value; a repeated position
    /// label keeps its first rank.
    pub fn new(
        experience: impl IntoIterator<Item = (String, f64)>,
        positions: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut experience_labels = Vec::new();
        let mut experience_map = HashMap::new();
        for (label, years) in experience {
            if experience_map.insert(label.clone(), years).is_none() {
                experience_labels.push(label);
            }
        }

        let positions: Vec<String> = positions.into_iter().collect();
        let mut position_rank = HashMap::with_capacity(positions.len());
        for (rank, label) in positions.iter().enumerate() {
            position_rank.entry(label.clone()).or_insert(rank);
        }

        Self {
            experience_labels,
            experience: experience_map,
            positions,
            position_rank,
        }
    }

    /// The process-wide built-in tables.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    /// Years encoded by an experience bracket label, if the label is known.
    pub fn experience_years(&self, label: &str) -> Option<f64> {
        self.experience.get(label).copied()
    }

    /// Rank of a position label, if the label is known.
    ///
    /// The lowest level ranks 0, so a known rank of 0 and an unknown label
    /// encode to the same slot value.
    pub fn position_rank(&self, label: &str) -> Option<usize> {
        self.position_rank.get(label).copied()
    }

    pub fn experience_labels(&self) -> &[String] {
        &self.experience_labels
    }

    pub fn positions(&self) -> &[String] {
        &self.positions
    }

    pub fn listing(&self) -> VocabularyListing {
        VocabularyListing {
            experience_levels: self.experience_labels.clone(),
            position_levels: self.positions.clone(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::builtin().clone()
    }
}
