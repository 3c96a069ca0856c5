//! Text extraction: turns an uploaded PDF into plain text.
//!
//! Pages are read in document order and concatenated with no separator.
//! A document with no extractable text is a valid outcome (`ExtractedText::Empty`),
//! while a document the parser cannot read is a typed `PdfReadError`.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Placeholder carried through scoring and feedback when a PDF has no text layer.
pub const NO_TEXT_SENTINEL: &str = "No readable text found";

#[derive(Debug, Error)]
#[error("Could not read PDF: {reason}")]
pub struct PdfReadError {
    pub reason: String,
}

/// Result of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    Text(String),
    /// Every page was empty or whitespace-only (e.g. a scanned image).
    Empty,
}

impl ExtractedText {
    /// Joins per-page text in page order. Whitespace-only output collapses to `Empty`.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = pages.into_iter().fold(String::new(), |mut acc, page| {
            acc.push_str(page.as_ref());
            acc
        });

        if text.trim().is_empty() {
            ExtractedText::Empty
        } else {
            ExtractedText::Text(text)
        }
    }

    /// The text handed to the scorer and feedback generator.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractedText::Text(text) => text,
            ExtractedText::Empty => NO_TEXT_SENTINEL,
        }
    }

    /// Characters actually extracted; 0 for `Empty`, never the sentinel's length.
    pub fn char_count(&self) -> usize {
        match self {
            ExtractedText::Text(text) => text.chars().count(),
            ExtractedText::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ExtractedText::Empty)
    }
}

/// Extracts text from PDF bytes on the blocking pool.
///
/// The parser can panic on some malformed inputs; a panic is reported as a
/// `PdfReadError` like any other parse failure.
pub async fn extract_resume_text(pdf: Bytes) -> Result<ExtractedText, PdfReadError> {
    let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&pdf))
        .await
        .map_err(|e| PdfReadError {
            reason: if e.is_panic() {
                "PDF parser aborted on malformed input".to_string()
            } else {
                format!("PDF extraction was cancelled: {e}")
            },
        })?
        .map_err(|e| PdfReadError {
            reason: format!("{e:?}"),
        })?;

    let page_count = pages.len();
    let extracted = ExtractedText::from_pages(pages);

    debug!(
        "Extracted {} chars from {} page(s){}",
        extracted.char_count(),
        page_count,
        if extracted.is_empty() { " (no text layer)" } else { "" }
    );

    Ok(extracted)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a PDF with one page per entry; `None` produces a page with no text operators.
    pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content stream"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

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
        doc.save_to(&mut buf).expect("serialize fixture PDF");
        buf
    }
}
