//! Parsing of the service's free-form text into a `PredictionResult`.
//!
//! The schema is only enforced by prompt instruction, so everything here is
//! strict: anything that does not deserialize cleanly is a malformed response.

use super::{PredictionError, PredictionResult};

/// Parse the text returned by the prediction service.
///
/// Accepts bare JSON or JSON wrapped in a Markdown code fence.
pub fn parse_prediction(text: &str) -> Result<PredictionResult, PredictionError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(PredictionError::MalformedResponse(
            "The prediction service returned an empty response.".to_string(),
        ));
    }

    let result: PredictionResult = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "prediction response did not match schema");
        PredictionError::MalformedResponse(format!(
            "The prediction service returned an unexpected format: {}",
            e
        ))
    })?;

    check_ranges(&result)?;
    Ok(result)
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn check_ranges(result: &PredictionResult) -> Result<(), PredictionError> {
    if !result.total_score.is_finite() || result.total_score < 0.0 {
        return Err(PredictionError::MalformedResponse(format!(
            "The prediction service reported an invalid total score ({}).",
            result.total_score
        )));
    }
    let probability = result.detailed_analysis.predicted_admission_probability;
    if !probability.is_finite() || !(0.0..=100.0).contains(&probability) {
        return Err(PredictionError::MalformedResponse(format!(
            "The prediction service reported an invalid admission probability ({}).",
            probability
        )));
    }
    Ok(())
}
