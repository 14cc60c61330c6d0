//! Type-safe reference types for admitui
//!
//! Quotas, genders and the rating enums returned by the prediction service.
//! The wizard itself carries selections as strings; these enums give the
//! catalogs and the response schema exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Admission category (reservation quota)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Quota {
    #[default]
    General,
    Obc,
    Sc,
    St,
    Ews,
    Pwd,
    Ward,
}

impl Quota {
    /// Human readable label shown next to the quota code
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General / Unreserved",
            Self::Obc => "Other Backward Classes (non-creamy layer)",
            Self::Sc => "Scheduled Caste",
            Self::St => "Scheduled Tribe",
            Self::Ews => "Economically Weaker Section",
            Self::Pwd => "Persons with Disability",
            Self::Ward => "Ward of BHU employee",
        }
    }

    /// All quota codes in catalog order
    pub fn names() -> Vec<String> {
        Self::iter().map(|q| q.to_string()).collect()
    }
}

/// Applicant gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other / Prefer not to say",
        }
    }

    /// All gender codes in catalog order
    pub fn names() -> Vec<String> {
        Self::iter().map(|g| g.to_string()).collect()
    }
}

/// Three-level admission chance rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum AdmissionChance {
    High,
    Medium,
    Low,
}

/// Per-campus status indicator as emitted by the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum CampusStatus {
    #[serde(rename = "✅")]
    #[strum(serialize = "✅")]
    Likely,
    #[serde(rename = "⚠️", alias = "⚠")]
    #[strum(serialize = "⚠️")]
    Borderline,
    #[serde(rename = "❌")]
    #[strum(serialize = "❌")]
    Unlikely,
}

impl CampusStatus {
    /// Plain-text fallback for terminals without emoji support
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Likely => "likely",
            Self::Borderline => "borderline",
            Self::Unlikely => "unlikely",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_quota_catalog_order() {
        assert_eq!(
            Quota::names(),
            vec!["general", "obc", "sc", "st", "ews", "pwd", "ward"]
        );
    }

    #[test]
    fn test_quota_parse() {
        assert_eq!(Quota::from_str("ews").ok(), Some(Quota::Ews));
        assert!(Quota::from_str("vip").is_err());
    }

    #[test]
    fn test_gender_names() {
        assert_eq!(Gender::names(), vec!["male", "female", "other"]);
    }

    #[test]
    fn test_campus_status_serde_uses_symbols() {
        let json = serde_json::to_string(&CampusStatus::Borderline).expect("serialize");
        assert_eq!(json, "\"⚠️\"");
        let parsed: CampusStatus = serde_json::from_str("\"✅\"").expect("deserialize");
        assert_eq!(parsed, CampusStatus::Likely);
    }

    #[test]
    fn test_campus_status_accepts_warning_sign_without_variation_selector() {
        let parsed: CampusStatus = serde_json::from_str("\"\u{26A0}\"").expect("deserialize");
        assert_eq!(parsed, CampusStatus::Borderline);
    }

    #[test]
    fn test_admission_chance_rejects_unknown() {
        assert!(serde_json::from_str::<AdmissionChance>("\"Certain\"").is_err());
    }
}
