//! Subject marks collected in the last wizard step.
//!
//! `SubjectMarks` only enforces that subject names are non-empty and unique.
//! Score bounds belong to whoever collects the marks (the marks form checks
//! `0..=MAX_SUBJECT_SCORE`, the prediction client rejects non-finite values).

use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// Problems with a subject/score entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarksError {
    #[error("Subject name cannot be empty")]
    EmptySubject,

    #[error("Subject {0} was entered more than once")]
    DuplicateSubject(String),

    #[error("Marks for {subject} must be a number (got '{value}')")]
    NotANumber { subject: String, value: String },

    #[error("Marks for {subject} must be between 0 and {max} (got {score})")]
    OutOfRange { subject: String, score: f64, max: f64 },

    #[error("Expected SUBJECT=SCORE, got '{0}'")]
    MalformedPair(String),

    #[error("Enter marks for at least one subject")]
    NoSubjects,
}

/// Ordered mapping from subject name to score.
///
/// Entry order is the order subjects were entered, which is also the order
/// they are shown back and sent to the prediction service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectMarks {
    entries: Vec<(String, f64)>,
}

impl SubjectMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject score. Names are trimmed; empty or repeated names are rejected.
    pub fn insert(&mut self, subject: impl Into<String>, score: f64) -> Result<(), MarksError> {
        let subject = subject.into().trim().to_string();
        if subject.is_empty() {
            return Err(MarksError::EmptySubject);
        }
        if self.get(&subject).is_some() {
            return Err(MarksError::DuplicateSubject(subject));
        }
        self.entries.push((subject, score));
        Ok(())
    }

    /// Build from `(subject, score)` pairs, stopping at the first bad entry.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, MarksError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut marks = Self::new();
        for (subject, score) in pairs {
            marks.insert(subject, score)?;
        }
        Ok(marks)
    }

    /// Parse a `Subject=score` argument as accepted by `admitui predict --mark`.
    pub fn parse_pair(raw: &str) -> Result<(String, f64), MarksError> {
        let (subject, value) = raw
            .split_once('=')
            .ok_or_else(|| MarksError::MalformedPair(raw.to_string()))?;
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(MarksError::EmptySubject);
        }
        let score = parse_score(subject, value)?;
        Ok((subject.to_string(), score))
    }

    pub fn get(&self, subject: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all scores.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    /// Check every score lies in `0..=max`.
    pub fn validate_range(&self, max: f64) -> Result<(), MarksError> {
        if self.entries.is_empty() {
            return Err(MarksError::NoSubjects);
        }
        for (subject, score) in &self.entries {
            if !score.is_finite() || *score < 0.0 || *score > max {
                return Err(MarksError::OutOfRange {
                    subject: subject.clone(),
                    score: *score,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Serialize for SubjectMarks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, score)| (name, score)))
    }
}

/// Parse a single score typed by the user.
pub fn parse_score(subject: &str, raw: &str) -> Result<f64, MarksError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(MarksError::NotANumber {
            subject: subject.to_string(),
            value: trimmed.to_string(),
        }),
    }
}

/// Format a score without a trailing `.0` for whole numbers.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{:.2}", score)
    }
}
