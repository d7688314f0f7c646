//! Page text extraction.
//!
//! The rest of the pipeline only sees `TextExtractor`: a path goes in, an
//! ordered list of page texts (page 1 first) comes out, or the document fails.

use std::path::Path;

use lopdf::Document;

use crate::error::ExtractionError;

pub trait TextExtractor {
    /// Page texts in page order. A page with no text is an empty string, not a gap.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// `lopdf`-backed extractor used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let doc = Document::load(path).map_err(|e| ExtractionError::Load(e.to_string()))?;

        // get_pages is a BTreeMap keyed by 1-based page number
        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());
        for page in page_numbers {
            let text = doc.extract_text(&[page]).map_err(|e| ExtractionError::Page {
                page,
                reason: e.to_string(),
            })?;
            pages.push(text);
        }
        Ok(pages)
    }
}
