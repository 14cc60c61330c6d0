//! Plain-text admission report, used by `admitui predict`.

use super::PredictionResult;
use crate::marks::format_score;

/// Render a result as printable lines.
pub fn format_report(result: &PredictionResult) -> Vec<String> {
    let mut lines = Vec::new();

    if !result.course_selected.is_empty() {
        lines.push(format!("Course: {}", result.course_selected));
    }
    lines.push(format!("Total score: {}", format_score(result.total_score)));
    lines.push(String::new());

    lines.push("Campus predictions".to_string());
    if result.campus_predictions.is_empty() {
        lines.push("  (none returned)".to_string());
    }
    let name_width = result
        .campus_predictions
        .iter()
        .map(|c| c.campus_name.chars().count())
        .max()
        .unwrap_or(0);
    for campus in &result.campus_predictions {
        lines.push(format!(
            "  {} {:<width$}  cutoff {:>6}  {:<10}  {:<6}  ({})",
            campus.status,
            campus.campus_name,
            campus.previous_cutoff,
            campus.possible_round,
            campus.admission_chance,
            campus.status.as_text(),
            width = name_width
        ));
    }
    lines.push(String::new());

    let analysis = &result.detailed_analysis;
    lines.push("Detailed analysis".to_string());
    lines.push(format!(
        "  Admission probability: {}%",
        format_score(analysis.predicted_admission_probability)
    ));
    lines.push(format!("  Recommended campus: {}", analysis.recommended_campus));
    push_list(&mut lines, "  Alternative options:", &analysis.alternative_options);
    push_list(&mut lines, "  Improvement areas:", &analysis.improvement_areas);

    if !result.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations".to_string());
        for (i, rec) in result.recommendations.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, rec));
        }
    }

    lines
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(heading.to_string());
    for item in items {
        lines.push(format!("    - {}", item));
    }
}
