use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::corpus::{Section, SubSection};
use crate::rank::Ranked;

pub const OUTPUT_FILE: &str = "challenge1b_output.json";

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractedSection {
    #[serde(rename = "Document")]
    pub document: String,
    #[serde(rename = "Page number")]
    pub page_number: u32,
    #[serde(rename = "Section title")]
    pub section_title: String,
    #[serde(rename = "Importance_rank")]
    pub importance_rank: usize,
}

#[derive(Debug, Serialize)]
pub struct SubSectionAnalysis {
    #[serde(rename = "Document")]
    pub document: String,
    #[serde(rename = "Refined Text")]
    pub refined_text: String,
    #[serde(rename = "Page Number")]
    pub page_number: u32,
    #[serde(rename = "Importance_rank")]
    pub importance_rank: usize,
}

/// The output file. Field order is the serialised key order.
#[derive(Debug, Serialize)]
pub struct Report {
    pub metadata: Metadata,
    #[serde(rename = "Extracted Section")]
    pub extracted_sections: Vec<ExtractedSection>,
    #[serde(rename = "Sub-section Analysis")]
    pub sub_section_analysis: Vec<SubSectionAnalysis>,
}

impl Report {
    /// `input_documents` keeps discovery order; ranks are 1-based positions.
    pub fn build(
        input_documents: Vec<String>,
        persona: &str,
        job_to_be_done: &str,
        sections: Vec<Ranked<Section>>,
        sub_sections: Vec<Ranked<SubSection>>,
    ) -> Self {
        let extracted_sections = sections
            .into_iter()
            .enumerate()
            .map(|(i, r)| ExtractedSection {
                document: r.item.document,
                page_number: r.item.page_number,
                section_title: r.item.title,
                importance_rank: i + 1,
            })
            .collect();

        let sub_section_analysis = sub_sections
            .into_iter()
            .enumerate()
            .map(|(i, r)| SubSectionAnalysis {
                document: r.item.document,
                refined_text: r.item.text,
                page_number: r.item.page_number,
                importance_rank: i + 1,
            })
            .collect();

        Report {
            metadata: Metadata {
                input_documents,
                persona: persona.to_string(),
                job_to_be_done: job_to_be_done.to_string(),
                processing_timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            },
            extracted_sections,
            sub_section_analysis,
        }
    }

    /// Pretty JSON with 4-space indentation, non-ASCII written as-is.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).context("Failed to serialise report")?;
        String::from_utf8(buf).context("Report is not valid UTF-8")
    }

    /// Write into `output_dir` (created if missing) and return the file path.
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Cannot create output directory '{}'", output_dir.display()))?;
        let path = output_dir.join(OUTPUT_FILE);
        fs::write(&path, self.to_json()?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        Ok(path)
    }
}
