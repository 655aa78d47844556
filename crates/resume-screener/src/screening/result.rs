use super::document::DocumentRef;
use super::matching::{MatchOutcome, Qualification};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Text shown in place of the missing list when nothing is missing.
pub const ALL_REQUIREMENTS_MET: &str = "All requirements met";

/// Binary screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Approved
        } else {
            Self::Rejected
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Approved => "Approved",
            Verdict::Rejected => "Rejected",
        }
    }
}

/// Why a document did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Finding {
    MissingQualification(Qualification),
    ExtractionFailed(String),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingQualification(qualification) => write!(f, "{qualification}"),
            Finding::ExtractionFailed(reason) => write!(f, "Error reading file: {reason}"),
        }
    }
}

/// Outcome for one document of a batch run.
///
/// The verdict is Approved exactly when `findings` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub index: usize,
    pub document: DocumentRef,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub destination: PathBuf,
}

impl EvaluationResult {
    pub fn from_match(
        index: usize,
        document: DocumentRef,
        outcome: MatchOutcome,
        destination: PathBuf,
    ) -> Self {
        let verdict = Verdict::from_passed(outcome.passed());
        let findings = outcome
            .missing
            .into_iter()
            .map(Finding::MissingQualification)
            .collect();

        Self {
            index,
            document,
            verdict,
            findings,
            destination,
        }
    }

    pub fn extraction_failed(
        index: usize,
        document: DocumentRef,
        reason: impl Into<String>,
        destination: PathBuf,
    ) -> Self {
        Self {
            index,
            document,
            verdict: Verdict::Rejected,
            findings: vec![Finding::ExtractionFailed(reason.into())],
            destination,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| matches!(finding, Finding::ExtractionFailed(_)))
    }

    pub fn missing_qualifications(&self) -> Vec<&Qualification> {
        self.findings
            .iter()
            .filter_map(|finding| match finding {
                Finding::MissingQualification(qualification) => Some(qualification),
                Finding::ExtractionFailed(_) => None,
            })
            .collect()
    }

    pub fn missing_summary(&self) -> String {
        if self.findings.is_empty() {
            ALL_REQUIREMENTS_MET.to_string()
        } else {
            self.findings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn row(&self) -> ResultRow {
        ResultRow {
            file_name: self.document.display_name.clone(),
            status: self.verdict.label(),
            missing: self.missing_summary(),
        }
    }
}

/// Display record handed to whatever renders the result feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Status")]
    pub status: &'static str,
    #[serde(rename = "Missing Qualifications")]
    pub missing: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> DocumentRef {
        DocumentRef::new("inbox/resume.txt")
    }

    #[test]
    fn approved_row_reports_all_requirements_met() {
        let result = EvaluationResult::from_match(
            0,
            document(),
            MatchOutcome::default(),
            PathBuf::from("Accepted/resume.txt"),
        );

        assert_eq!(result.verdict, Verdict::Approved);
        let row = result.row();
        assert_eq!(row.file_name, "resume.txt");
        assert_eq!(row.status, "Approved");
        assert_eq!(row.missing, ALL_REQUIREMENTS_MET);
    }

    #[test]
    fn rejected_row_joins_missing_with_commas() {
        let outcome = MatchOutcome {
            missing: vec![Qualification::from("SQL"), Qualification::from("Go")],
        };
        let result =
            EvaluationResult::from_match(3, document(), outcome, PathBuf::from("Rejected/x"));

        assert_eq!(result.verdict, Verdict::Rejected);
        assert_eq!(result.missing_summary(), "SQL, Go");
        assert!(!result.is_unreadable());
        assert_eq!(result.missing_qualifications().len(), 2);
    }

    #[test]
    fn extraction_failure_is_distinct_from_missing_qualification() {
        let result = EvaluationResult::extraction_failed(
            1,
            document(),
            "invalid PDF: bad xref",
            PathBuf::from("Rejected/resume.txt"),
        );

        assert_eq!(result.verdict, Verdict::Rejected);
        assert!(result.is_unreadable());
        assert!(result.missing_qualifications().is_empty());
        assert_eq!(
            result.missing_summary(),
            "Error reading file: invalid PDF: bad xref"
        );
    }

    #[test]
    fn findings_serialize_with_kind_tag() {
        let finding = Finding::ExtractionFailed("boom".to_string());
        let json = serde_json::to_value(&finding).expect("serializes");
        assert_eq!(json["kind"], "extraction_failed");
        assert_eq!(json["detail"], "boom");
    }
}
