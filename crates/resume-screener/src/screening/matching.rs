use serde::{Deserialize, Serialize};
use std::fmt;

/// Starter list offered to users who have not written their own requirements yet.
pub const DEFAULT_QUALIFICATIONS: [&str; 4] = [
    "Bachelor's Degree",
    "Python Programming",
    "3+ years experience",
    "Project Management",
];

/// A required phrase. Compared case-insensitively, reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qualification(pub String);

impl Qualification {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Qualification {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Splits free-form input into qualifications, one per line, dropping blank lines.
pub fn parse_qualifications(raw: &str) -> Vec<Qualification> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Qualification::from)
        .collect()
}

/// Qualifications that were not found, in the caller's order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub missing: Vec<Qualification>,
}

impl MatchOutcome {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Substring matcher over a fixed, ordered qualification list.
///
/// Each phrase is lower-cased once at construction; documents are lower-cased
/// once per evaluation. Matching is plain containment with no tokenization, so
/// an empty phrase is always found.
#[derive(Debug, Clone)]
pub struct QualificationMatcher {
    required: Vec<(Qualification, String)>,
}

impl QualificationMatcher {
    pub fn new(qualifications: &[Qualification]) -> Self {
        let required = qualifications
            .iter()
            .map(|qualification| (qualification.clone(), qualification.0.to_lowercase()))
            .collect();
        Self { required }
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    pub fn evaluate(&self, text: &str) -> MatchOutcome {
        let haystack = text.to_lowercase();
        let missing = self
            .required
            .iter()
            .filter(|(_, needle)| !haystack.contains(needle.as_str()))
            .map(|(qualification, _)| qualification.clone())
            .collect();

        MatchOutcome { missing }
    }
}

/// One-shot evaluation of `text` against `qualifications`.
pub fn evaluate(text: &str, qualifications: &[Qualification]) -> MatchOutcome {
    QualificationMatcher::new(qualifications).evaluate(text)
}
