//! Feature encoder: raw job attributes → schema-aligned feature vector.
//!
//! Feature groups are independent and applied in a fixed order:
//!
//! 1. experience → `experience_years`
//! 2. position level → `position_level_encoded` (rank; unknown stays 0)
//! 3. skills → `skills_count` and multi-hot `has_skill_<skill>`
//! 4. job fields → `fields_count` and multi-hot `field_<field>`
//! 5. city → one-hot `city_<city>`
//! 6. interactions → `exp_position_interaction`, `skills_exp_interaction`
//! 7. salary range → `salary_range`, `salary_range_ratio`
//!
//! A slot is written only when the schema defines it; everything else stays
//! 0. Categories without a slot are ignored, so unseen cities, skills and
//! fields never fail a request.

use std::sync::Arc;

use tracing::{debug, trace};

use salary_core::tokenize::slot_suffix;
use salary_core::{
    tokenize_list, Error, ExperienceValue, FeatureSchema, FeatureVector, RawInputRecord, Result,
    Vocabulary,
};

pub const EXPERIENCE_YEARS: &str = "experience_years";
pub const POSITION_LEVEL_ENCODED: &str = "position_level_encoded";
pub const SKILLS_COUNT: &str = "skills_count";
pub const FIELDS_COUNT: &str = "fields_count";
pub const EXP_POSITION_INTERACTION: &str = "exp_position_interaction";
pub const SKILLS_EXP_INTERACTION: &str = "skills_exp_interaction";
pub const SALARY_RANGE: &str = "salary_range";
pub const SALARY_RANGE_RATIO: &str = "salary_range_ratio";

pub const SKILL_PREFIX: &str = "has_skill_";
pub const FIELD_PREFIX: &str = "field_";
pub const CITY_PREFIX: &str = "city_";

/// Vector under construction, addressed by slot name.
struct SlotWriter<'a> {
    schema: &'a FeatureSchema,
    vector: FeatureVector,
    unmatched: usize,
}

impl<'a> SlotWriter<'a> {
    fn new(schema: &'a FeatureSchema) -> Self {
        Self {
            schema,
            vector: FeatureVector::zeros(schema.len()),
            unmatched: 0,
        }
    }

    /// Write a slot if the schema defines it.
    fn set(&mut self, name: &str, value: f64) -> bool {
        match self.schema.slot(name) {
            Some(index) => {
                trace!(slot = name, value, "Slot set");
                self.vector.set(index, value);
                true
            }
            None => false,
        }
    }

    /// Set a one-hot/multi-hot flag, counting names with no slot.
    fn flag(&mut self, name: &str) {
        if !self.set(name, 1.0) {
            self.unmatched += 1;
        }
    }

    /// Current slot value, 0 when the schema lacks the slot.
    fn value(&self, name: &str) -> f64 {
        self.schema
            .slot(name)
            .and_then(|index| self.vector.get(index))
            .unwrap_or(0.0)
    }
}

/// Stateless encoder bound to one schema and vocabulary.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: Arc<FeatureSchema>,
    vocabulary: Arc<Vocabulary>,
}

impl FeatureEncoder {
    pub fn new(schema: Arc<FeatureSchema>, vocabulary: Arc<Vocabulary>) -> Self {
        Self { schema, vocabulary }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Encode one record. The result always has `schema.len()` entries.
    pub fn encode(&self, raw: &RawInputRecord) -> Result<FeatureVector> {
        let mut slots = SlotWriter::new(&self.schema);

        if let Some(experience) = &raw.experience {
            let years = self.experience_years(experience)?;
            slots.set(EXPERIENCE_YEARS, years);
        }

        if let Some(position) = &raw.position_level {
            match self.vocabulary.position_rank(position) {
                Some(rank) => {
                    slots.set(POSITION_LEVEL_ENCODED, rank as f64);
                }
                None => debug!(position = %position, "Unknown position level, slot left at 0"),
            }
        }

        if let Some(skills) = &raw.skills {
            encode_terms(&mut slots, skills, SKILLS_COUNT, SKILL_PREFIX, &[' ']);
        }

        if let Some(fields) = &raw.job_fields {
            encode_terms(&mut slots, fields, FIELDS_COUNT, FIELD_PREFIX, &[' ', '/']);
        }

        if let Some(city) = &raw.city {
            let name = format!("{}{}", CITY_PREFIX, slot_suffix(&city.to_lowercase(), &[' ']));
            slots.flag(&name);
        }

        if self.schema.contains(EXP_POSITION_INTERACTION) {
            let value = slots.value(EXPERIENCE_YEARS) * slots.value(POSITION_LEVEL_ENCODED);
            slots.set(EXP_POSITION_INTERACTION, value);
        }
        if self.schema.contains(SKILLS_EXP_INTERACTION) {
            let value = slots.value(SKILLS_COUNT) * slots.value(EXPERIENCE_YEARS);
            slots.set(SKILLS_EXP_INTERACTION, value);
        }

        if let (Some(min), Some(max)) = (&raw.salary_min, &raw.salary_max) {
            let min = min.to_f64("salary_min")?;
            let max = max.to_f64("salary_max")?;
            slots.set(SALARY_RANGE, max - min);
            if self.schema.contains(SALARY_RANGE_RATIO) {
                let ratio = (max - min) / (min + 1.0);
                if !ratio.is_finite() {
                    return Err(Error::Encoding(format!(
                        "salary_range_ratio is undefined for salary_min {}",
                        min
                    )));
                }
                slots.set(SALARY_RANGE_RATIO, ratio);
            }
        }

        if slots.unmatched > 0 {
            debug!(
                unmatched = slots.unmatched,
                "Categories without a schema slot were ignored"
            );
        }
        Ok(slots.vector)
    }

    /// Years of experience: bracket label, numeric string, or number.
    fn experience_years(&self, experience: &ExperienceValue) -> Result<f64> {
        let years = match experience {
            ExperienceValue::Years(years) => *years,
            ExperienceValue::Label(label) => match self.vocabulary.experience_years(label) {
                Some(years) => years,
                None if label.trim().is_empty() => 0.0,
                None => label.trim().parse::<f64>().map_err(|_| {
                    Error::Encoding(format!(
                        "experience '{}' is neither a known bracket nor a number of years",
                        label
                    ))
                })?,
            },
        };
        if !years.is_finite() {
            return Err(Error::Encoding(format!(
                "experience must be a finite number of years, got {}",
                years
            )));
        }
        Ok(years)
    }
}

/// Count and multi-hot encode a comma list.
fn encode_terms(
    slots: &mut SlotWriter<'_>,
    raw: &str,
    count_slot: &str,
    prefix: &str,
    separators: &[char],
) {
    let list = tokenize_list(raw);
    slots.set(count_slot, list.len() as f64);
    for term in &list.terms {
        let name = format!("{}{}", prefix, slot_suffix(term, separators));
        slots.flag(&name);
    }
}
