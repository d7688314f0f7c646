pub mod segment;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::extract::TextExtractor;
use crate::input::DocumentRef;
use crate::rank::Scorable;
pub use segment::{Section, Segmenter, SubSection};

/// A document that was dropped because extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: String,
}

/// Both granularities across every document, in document-then-page order.
#[derive(Debug, Default)]
pub struct Corpus {
    pub sections: Vec<Section>,
    pub sub_sections: Vec<SubSection>,
    pub failures: Vec<DocumentFailure>,
}

impl Scorable for Section {
    fn text(&self) -> &str {
        &self.text
    }
}

impl Scorable for SubSection {
    fn text(&self) -> &str {
        &self.text
    }
}

/// Extract and segment every document in order. A document whose extraction
/// fails is logged and skipped; it never aborts the batch.
pub fn assemble<E>(documents: &[DocumentRef], extractor: &E, segmenter: &Segmenter) -> Corpus
where
    E: TextExtractor + ?Sized,
{
    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} Parsing PDFs [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );

    let mut corpus = Corpus::default();

    for doc in documents {
        match extractor.extract_pages(&doc.path) {
            Ok(pages) => {
                let before = corpus.sections.len();
                for (idx, page_text) in pages.iter().enumerate() {
                    let page_number = idx as u32 + 1;
                    if let Some((section, subs)) =
                        segmenter.segment(&doc.name, page_number, page_text)
                    {
                        corpus.sections.push(section);
                        corpus.sub_sections.extend(subs);
                    }
                }
                debug!(
                    "{}: {} pages, {} with text",
                    doc.name,
                    pages.len(),
                    corpus.sections.len() - before
                );
            }
            Err(e) => {
                pb.suspend(|| warn!("Failed to process {}: {}", doc.name, e));
                corpus.failures.push(DocumentFailure {
                    document: doc.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    corpus
}
