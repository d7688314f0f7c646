use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::StartupError;

const PERSONA_FILE: &str = "persona.json";
const DOCUMENTS_DIR: &str = "documents";

#[derive(Debug, Clone, Deserialize)]
struct PersonaRole {
    role_description: String,
}

/// Contents of `persona.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Persona {
    persona: PersonaRole,
    pub job_to_be_done: String,
}

impl Persona {
    pub fn role_description(&self) -> &str {
        &self.persona.role_description
    }

    /// Role and job joined into the single string every unit is scored against.
    pub fn intent_query(&self) -> String {
        format!("{} {}", self.persona.role_description, self.job_to_be_done)
    }
}

/// A PDF discovered under `documents/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub name: String,
    pub path: PathBuf,
}

/// Everything a run needs from the input directory.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub persona: Persona,
    pub documents: Vec<DocumentRef>,
}

/// Load `persona.json` and list `documents/*.pdf`. Any problem here is fatal.
pub fn load(input_dir: &Path) -> Result<RunInput, StartupError> {
    let persona_path = input_dir.join(PERSONA_FILE);
    let docs_path = input_dir.join(DOCUMENTS_DIR);

    if !persona_path.is_file() {
        return Err(StartupError::MissingPersona(input_dir.to_path_buf()));
    }
    if !docs_path.is_dir() {
        return Err(StartupError::MissingDocuments(input_dir.to_path_buf()));
    }

    let persona = read_persona(&persona_path)?;
    let documents = list_documents(&docs_path)?;
    if documents.is_empty() {
        return Err(StartupError::NoDocuments(docs_path));
    }

    info!("Loaded persona: {}", persona.role_description());
    info!("Loaded job: {}", persona.job_to_be_done);
    info!("Found {} documents to process.", documents.len());

    Ok(RunInput { persona, documents })
}

fn read_persona(path: &Path) -> Result<Persona, StartupError> {
    let raw = fs::read_to_string(path).map_err(|source| StartupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StartupError::MalformedPersona {
        path: path.to_path_buf(),
        source,
    })
}

/// Regular files ending in `.pdf` (any case), sorted by file name.
fn list_documents(dir: &Path) -> Result<Vec<DocumentRef>, StartupError> {
    let io_err = |source: std::io::Error| StartupError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.to_lowercase().ends_with(".pdf") {
            documents.push(DocumentRef {
                name: name.to_string(),
                path: path.clone(),
            });
        }
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(documents)
}
