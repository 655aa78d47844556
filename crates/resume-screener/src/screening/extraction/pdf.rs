use super::{read_bytes, ExtractionError, TextExtractor, UNIT_SEPARATOR};
use std::any::Any;
use std::panic;
use std::path::Path;

/// Extracts the embedded text layer page by page via `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = read_bytes(path)?;
        let pages = text_by_page(&bytes)?;
        Ok(pages.join(UNIT_SEPARATOR))
    }
}

/// A page without a text layer comes back as an empty string.
fn text_by_page(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    // pdf-extract panics on some malformed font tables instead of returning an error.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(err)) => Err(ExtractionError::Pdf {
            detail: err.to_string(),
        }),
        Err(payload) => Err(ExtractionError::Pdf {
            detail: panic_detail(payload.as_ref()),
        }),
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "decoder aborted".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::tests::common::pdf_bytes;
    use std::fs;

    #[test]
    fn extracts_text_from_every_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("resume.pdf");
        fs::write(&path, pdf_bytes(&["Bachelor Degree", "Python Programming"]))
            .expect("write pdf");

        let text = PdfExtractor.extract(&path).expect("pdf extracts");
        assert!(text.contains("Bachelor"), "got: {text}");
        assert!(text.contains("Python"), "got: {text}");
    }

    #[test]
    fn blank_page_contributes_an_empty_unit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gap.pdf");
        fs::write(&path, pdf_bytes(&["Alpha", "", "Beta"])).expect("write pdf");

        let text = PdfExtractor.extract(&path).expect("pdf extracts");
        let alpha_end = text.find("Alpha").expect("first page text") + "Alpha".len();
        let beta_start = text.find("Beta").expect("last page text");
        let between = &text[alpha_end..beta_start];
        assert_eq!(between.matches(UNIT_SEPARATOR).count(), 2, "got: {text:?}");
    }

    #[test]
    fn corrupt_pdf_is_an_extraction_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\nthis is not a real pdf").expect("write pdf");

        let err = PdfExtractor.extract(&path).expect_err("corrupt pdf fails");
        assert!(matches!(err, ExtractionError::Pdf { .. }));
    }

    #[test]
    fn panic_payloads_become_messages() {
        let payload: Box<dyn Any + Send> = Box::new("bad font");
        assert_eq!(panic_detail(payload.as_ref()), "bad font");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bad xref"));
        assert_eq!(panic_detail(payload.as_ref()), "bad xref");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_detail(payload.as_ref()), "decoder aborted");
    }
}
