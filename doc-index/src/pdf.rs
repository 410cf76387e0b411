//! Page-level PDF text extraction.
//!
//! One invocation fully materializes the document: every page is extracted
//! to text, blank pages are dropped, and the result is the chunk sequence
//! the index is built over.

use std::path::Path;

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::IndexError;

/// One page of extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageChunk {
    /// Page number (1-indexed).
    pub page: u32,
    /// Raw extracted text.
    pub text: String,
}

/// Loads a PDF and splits it into page-level chunks.
///
/// Whitespace-only pages are skipped; page numbering is preserved so the
/// retriever can cite the original page.
///
/// # Errors
/// - [`IndexError::PdfLoad`] if the file cannot be opened/parsed
/// - [`IndexError::PdfExtract`] if a page's text extraction fails
/// - [`IndexError::EmptyDocument`] if no page yields any text
pub fn load_pages(path: &Path) -> Result<Vec<PageChunk>, IndexError> {
    let doc = Document::load(path).map_err(|e| IndexError::PdfLoad(e.to_string()))?;

    let mut chunks = Vec::new();
    for (page, _object_id) in doc.get_pages() {
        let text = doc
            .extract_text(&[page])
            .map_err(|e| IndexError::PdfExtract(format!("page {page}: {e}")))?;

        if text.trim().is_empty() {
            warn!(page, "skipping blank page");
            continue;
        }
        chunks.push(PageChunk { page, text });
    }

    if chunks.is_empty() {
        return Err(IndexError::EmptyDocument);
    }

    debug!(path = %path.display(), pages = chunks.len(), "pdf loaded");
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// Writes a minimal multi-page PDF with one text line per page.
    fn write_pdf(path: &Path, lines: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().unwrap(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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
        doc.save(path).unwrap();
    }

    #[test]
    fn extracts_one_chunk_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        write_pdf(&path, &["alpha", "beta", "gamma"]);

        let chunks = load_pages(&path).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].page, 1);
        assert!(chunks[0].text.contains("alpha"));
        assert!(chunks[2].text.contains("gamma"));
    }

    #[test]
    fn corrupt_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        let err = load_pages(&path).unwrap_err();
        assert!(matches!(err, IndexError::PdfLoad(_)));
    }
}
