//! Resume screening: text extraction, qualification matching, bucket routing,
//! and the batch evaluator tying them together.

pub mod batch;
pub mod document;
pub mod extraction;
pub mod matching;
pub mod result;
pub mod routing;

#[cfg(test)]
mod tests;

pub use batch::{
    BatchError, BatchEvaluator, BatchEvent, BatchRun, InvalidInput, PreviewError, RunFailure,
    RunState, RunSummary,
};
pub use document::{DocumentFormat, DocumentRef};
pub use extraction::{ContentExtractor, ExtractionError, TextExtractor};
pub use matching::{
    evaluate, parse_qualifications, MatchOutcome, Qualification, QualificationMatcher,
    DEFAULT_QUALIFICATIONS,
};
pub use result::{EvaluationResult, Finding, ResultRow, Verdict, ALL_REQUIREMENTS_MET};
pub use routing::{Bucket, ClassificationRouter, RoutingError};
