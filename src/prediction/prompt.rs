//! Prompt construction for the prediction service.

use super::PredictionRequest;
use crate::marks::format_score;

/// JSON shape the service is instructed to answer with.
const RESPONSE_SCHEMA: &str = r#"{
  "courseSelected": string,
  "totalScore": number,
  "campusPredictions": [
    {
      "campusName": string,
      "previousCutoff": string,
      "possibleRound": string,
      "admissionChance": "High" | "Medium" | "Low",
      "status": "✅" | "⚠️" | "❌"
    }
  ],
  "detailedAnalysis": {
    "predictedAdmissionProbability": number (0-100),
    "recommendedCampus": string,
    "alternativeOptions": [string],
    "improvementAreas": [string]
  },
  "recommendations": [string]
}"#;

/// Build the instruction text for one admission attempt.
pub fn build_prompt(request: &PredictionRequest) -> String {
    let marks_lines: Vec<String> = request
        .marks
        .iter()
        .map(|(subject, score)| format!("- {}: {}", subject, format_score(score)))
        .collect();

    format!(
        "You are an admission counselling analyst for Banaras Hindu University (BHU).\n\
         Estimate the applicant's admission chances using previous years' cutoffs \
         and counselling rounds for the course, quota and gender below.\n\
         \n\
         Course: {course}\n\
         Quota: {quota}\n\
         Gender: {gender}\n\
         Subject marks:\n{marks}\n\
         Total score: {total}\n\
         \n\
         Use status \"✅\" for High, \"⚠️\" for Medium and \"❌\" for Low chances.\n\
         Respond with JSON only, no prose and no Markdown, matching exactly this schema:\n\
         {schema}\n",
        course = request.course,
        quota = request.quota,
        gender = request.gender,
        marks = marks_lines.join("\n"),
        total = format_score(request.marks.total()),
        schema = RESPONSE_SCHEMA,
    )
}
