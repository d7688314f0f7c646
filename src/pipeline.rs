use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::corpus::{self, DocumentFailure, Segmenter};
use crate::extract::{PdfExtractor, TextExtractor};
use crate::input;
use crate::rank;
use crate::report::Report;
use crate::settings::Settings;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub documents: usize,
    pub failures: Vec<DocumentFailure>,
    pub sections: usize,
    pub sub_sections: usize,
}

impl RunSummary {
    pub fn print(&self) {
        println!(
            "Ranked {} sections and {} sub-sections from {} documents ({} failed).",
            self.sections,
            self.sub_sections,
            self.documents,
            self.failures.len(),
        );
        for failure in &self.failures {
            println!("  skipped {}: {}", failure.document, failure.reason);
        }
    }
}

/// Full run against real PDFs.
pub fn run(input_dir: &Path, output_dir: &Path, settings: &Settings) -> Result<RunSummary> {
    run_with(input_dir, output_dir, settings, &PdfExtractor)
}

/// Load → extract and segment → rank both corpora → write the report.
/// Only startup and output failures are errors; bad documents are skipped.
pub fn run_with<E>(
    input_dir: &Path,
    output_dir: &Path,
    settings: &Settings,
    extractor: &E,
) -> Result<RunSummary>
where
    E: TextExtractor + ?Sized,
{
    let segmenter = Segmenter::new(settings)?;
    let run_input = input::load(input_dir)?;
    let persona = &run_input.persona;

    info!("Parsing documents...");
    let corpus = corpus::assemble(&run_input.documents, extractor, &segmenter);
    let failures = corpus.failures;

    let query = persona.intent_query();
    info!("Combined Intent Query: {}", query);

    info!("Ranking sections...");
    let sections = rank::rank(&query, corpus.sections);
    info!("Ranking sub-sections...");
    let sub_sections = rank::rank(&query, corpus.sub_sections);

    let section_count = sections.len();
    let sub_section_count = sub_sections.len();

    let report = Report::build(
        run_input.documents.iter().map(|d| d.name.clone()).collect(),
        persona.role_description(),
        &persona.job_to_be_done,
        sections,
        sub_sections,
    );
    let output_path = report.write_to(output_dir)?;
    info!("Processing complete. Output saved to {}", output_path.display());

    Ok(RunSummary {
        output_path,
        documents: run_input.documents.len(),
        failures,
        sections: section_count,
        sub_sections: sub_section_count,
    })
}
