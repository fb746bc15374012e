//! Result composer: raw prediction → human-facing [`PredictionResult`].

use salary_core::defaults::{NOT_AVAILABLE, SALARY_UNIT_SUFFIX};
use salary_core::{
    tokenize_list, ConfidenceInterval, ExperienceValue, InputSummary, ModelMetadata,
    PredictionResult, RawInputRecord, ResultModelInfo, SalaryCategory,
};

/// Build the result for one prediction (million VND).
///
/// The interval is `prediction ± mae` with the lower bound clamped at 0; an
/// unknown MAE collapses it to the point estimate. `model_family` names the
/// loaded regressor and stands in when the metadata omits `model_type`.
pub fn compose(
    prediction: f64,
    metadata: &ModelMetadata,
    model_family: &str,
    raw: &RawInputRecord,
) -> PredictionResult {
    let mae = metadata.mae();
    let lower = (prediction - mae).max(0.0);
    let upper = prediction + mae;

    PredictionResult {
        predicted_salary: prediction,
        predicted_salary_formatted: format_salary(prediction),
        confidence_interval: ConfidenceInterval {
            lower,
            upper,
            lower_formatted: format_salary(lower),
            upper_formatted: format_salary(upper),
        },
        salary_category: SalaryCategory::from_prediction(prediction),
        model_info: ResultModelInfo {
            mae,
            r2: metadata.r2(),
            model_type: metadata
                .model_type
                .clone()
                .unwrap_or_else(|| model_family.to_string()),
        },
        input_summary: summarize(raw),
    }
}

fn summarize(raw: &RawInputRecord) -> InputSummary {
    let or_na = |value: &Option<String>| {
        value
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    InputSummary {
        experience_years: raw
            .experience
            .clone()
            .unwrap_or_else(|| ExperienceValue::Label(NOT_AVAILABLE.to_string())),
        position: or_na(&raw.position_level),
        city: or_na(&raw.city),
        // Raw piece count: an absent or empty list still reports 1.
        skills_count: tokenize_list(raw.skills.as_deref().unwrap_or_default()).raw_count,
    }
}

/// Render a salary rounded to whole millions with thousands separators,
/// e.g. `1,250tr VND`.
pub fn format_salary(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}{}", sign, grouped, SALARY_UNIT_SUFFIX)
}
