use super::{read_bytes, ExtractionError, TextExtractor, UNIT_SEPARATOR};
use docx_rs::{
    DocumentChild, InsertChild, MoveToChild, Paragraph, ParagraphChild, Run, RunChild,
};
use std::path::Path;

/// Joins the text of every top-level body paragraph in document order,
/// including text inside hyperlinks and tracked insertions.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = read_bytes(path)?;
        let docx = docx_rs::read_docx(&bytes).map_err(|err| ExtractionError::Docx {
            detail: err.to_string(),
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join(UNIT_SEPARATOR))
    }
}

/// Run text concatenated without separators; empty paragraphs yield "".
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

/// Hyperlinks and tracked insertions carry their own runs; deleted text is skipped.
fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run(run, text);
                    }
                }
            }
            ParagraphChild::MoveTo(moved) => {
                for moved_child in &moved.children {
                    if let MoveToChild::Run(run) = moved_child {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
