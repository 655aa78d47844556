use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use docx_rs::{Docx, Paragraph, Run};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::screening::extraction::{ExtractionError, TextExtractor};
use crate::screening::matching::Qualification;

pub(crate) fn quals(phrases: &[&str]) -> Vec<Qualification> {
    phrases.iter().copied().map(Qualification::from).collect()
}

pub(crate) fn write_text(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write text fixture");
    path
}

/// Writes a DOCX with one paragraph per entry; "" produces an empty paragraph.
pub(crate) fn write_docx(path: &Path, paragraphs: &[&str]) {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        if text.is_empty() {
            docx.add_paragraph(Paragraph::new())
        } else {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
        }
    });
    let file = File::create(path).expect("create docx fixture");
    docx.build().pack(file).expect("pack docx fixture");
}

/// Builds a PDF with one Helvetica text line per page.
pub(crate) fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|text| {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            page_id.into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize pdf fixture");
    buf
}

/// Extractor double that records every path it is asked to read.
#[derive(Default, Clone)]
pub(crate) struct RecordingExtractor {
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingExtractor {
    pub(crate) fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().expect("recording mutex poisoned").clone()
    }
}

impl TextExtractor for RecordingExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        self.seen
            .lock()
            .expect("recording mutex poisoned")
            .push(path.to_path_buf());
        crate::screening::extraction::ContentExtractor::new().extract(path)
    }
}

/// Extractor double that panics on one file name and reads everything else normally.
#[derive(Clone)]
pub(crate) struct PanicsOn(pub(crate) &'static str);

impl TextExtractor for PanicsOn {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if path.file_name().and_then(|name| name.to_str()) == Some(self.0) {
            panic!("extractor blew up on {}", path.display());
        }
        crate::screening::extraction::ContentExtractor::new().extract(path)
    }
}
