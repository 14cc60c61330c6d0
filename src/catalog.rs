//! Static reference catalogs
//!
//! Read-only lists of the courses, quotas and genders the wizard offers.
//! Nothing here is ever mutated at runtime.

use crate::types::{Gender, Quota};

/// An undergraduate programme offered for prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    /// Display name, also the value sent to the prediction service.
    pub name: &'static str,
    /// Faculty / institute the programme belongs to.
    pub faculty: &'static str,
    /// Subjects whose marks are collected for this programme.
    pub subjects: &'static [&'static str],
}

impl Course {
    /// Format course info for display in the list.
    pub fn display_line(&self) -> String {
        format!("{} ({})", self.name, self.faculty)
    }
}

/// Upper bound accepted by the marks form for a single subject.
pub const MAX_SUBJECT_SCORE: f64 = 100.0;

const COURSES: &[Course] = &[
    Course {
        name: "B.Tech CSE",
        faculty: "IIT (BHU)",
        subjects: &["Physics", "Chemistry", "Math"],
    },
    Course {
        name: "B.Sc. (Hons.) Math Group",
        faculty: "Faculty of Science",
        subjects: &["Physics", "Chemistry", "Math"],
    },
    Course {
        name: "B.Sc. (Hons.) Biology Group",
        faculty: "Faculty of Science",
        subjects: &["Physics", "Chemistry", "Biology"],
    },
    Course {
        name: "B.Sc. (Hons.) Agriculture",
        faculty: "Institute of Agricultural Sciences",
        subjects: &["Physics", "Chemistry", "Biology", "Agriculture"],
    },
    Course {
        name: "B.Com. (Hons.)",
        faculty: "Faculty of Commerce",
        subjects: &["Accountancy", "Business Studies", "Economics", "Math"],
    },
    Course {
        name: "B.A. (Hons.) Arts",
        faculty: "Faculty of Arts",
        subjects: &["English", "History", "Political Science", "General Test"],
    },
    Course {
        name: "B.A. (Hons.) Social Sciences",
        faculty: "Faculty of Social Sciences",
        subjects: &["English", "Economics", "Geography", "General Test"],
    },
    Course {
        name: "B.P.A. (Vocal)",
        faculty: "Faculty of Performing Arts",
        subjects: &["English", "Music", "General Test"],
    },
    Course {
        name: "B.F.A. (Painting)",
        faculty: "Faculty of Visual Arts",
        subjects: &["English", "Fine Arts", "General Test"],
    },
];

/// All courses in catalog order.
pub fn courses() -> &'static [Course] {
    COURSES
}

/// Course names in catalog order.
pub fn course_names() -> Vec<&'static str> {
    COURSES.iter().map(|c| c.name).collect()
}

/// Look up a course by its exact display name.
pub fn find_course(name: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.name == name)
}

/// Quota codes in catalog order (general, obc, sc, st, ews, pwd, ward).
pub fn quotas() -> Vec<String> {
    Quota::names()
}

/// Gender codes in catalog order.
pub fn genders() -> Vec<String> {
    Gender::names()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_course_names_are_unique() {
        let names = course_names();
        let set: HashSet<_> = names.iter().collect();
        assert_eq!(set.len(), names.len());
    }

    #[test]
    fn test_every_course_has_unique_subjects() {
        for course in courses() {
            assert!(!course.subjects.is_empty(), "{} has no subjects", course.name);
            let set: HashSet<_> = course.subjects.iter().collect();
            assert_eq!(set.len(), course.subjects.len(), "{} repeats a subject", course.name);
        }
    }

    #[test]
    fn test_find_course() {
        let course = find_course("B.Tech CSE").expect("catalog course");
        assert_eq!(course.subjects, &["Physics", "Chemistry", "Math"]);
        assert!(find_course("b.tech cse").is_none());
    }

    #[test]
    fn test_quota_catalog_has_seven_entries() {
        assert_eq!(quotas().len(), 7);
        assert!(quotas().contains(&"ward".to_string()));
    }
}
