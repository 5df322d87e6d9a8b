//! Document folder loading.
//!
//! Reads every supported file in a corpus folder into [`Document`] values:
//! PDFs are split into pages via lopdf, plain-text and markdown files load
//! as single-page documents. An absent, unreadable, or empty folder is an
//! ingestion error, which the pipeline treats the same as "no attachments".

use crate::types::{Document, Page};
use docreply_core::{AppError, AppResult};
use std::path::Path;
use walkdir::WalkDir;

/// File extensions the loader understands.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

/// Check whether a path has a supported extension.
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Count supported files in a folder without loading them.
///
/// Used as the cheap pre-flight gate before any model call is made.
pub fn count_supported_files(folder: &Path) -> AppResult<usize> {
    if !folder.is_dir() {
        return Err(AppError::Ingestion(format!(
            "Document folder does not exist or is not a directory: {}",
            folder.display()
        )));
    }

    let count = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported(e.path()))
        .count();

    Ok(count)
}

/// Load every supported document in a folder, in file-name order.
///
/// Individual unreadable files are skipped with a warning; the load only
/// fails when the folder itself is unusable or nothing could be read.
pub fn load_corpus(folder: &Path) -> AppResult<Vec<Document>> {
    if !folder.is_dir() {
        return Err(AppError::Ingestion(format!(
            "Document folder does not exist or is not a directory: {}",
            folder.display()
        )));
    }

    let mut paths: Vec<_> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported(e.path()))
        .map(|e| e.into_path())
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_document(path) {
            Ok(doc) => {
                tracing::debug!("Loaded {} ({} pages)", doc.name, doc.pages.len());
                documents.push(doc);
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable file {}: {}", path.display(), e);
            }
        }
    }

    if documents.is_empty() {
        return Err(AppError::Ingestion(format!(
            "No readable documents in folder: {}",
            folder.display()
        )));
    }

    Ok(documents)
}

/// Load a single file into a document.
fn load_document(path: &Path) -> AppResult<Document> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .ok_or_else(|| AppError::Ingestion(format!("Invalid file name: {}", path.display())))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => load_pdf(path, name),
        _ => {
            let text = std::fs::read_to_string(path)?;
            Ok(Document::single_page(name, text))
        }
    }
}

/// Extract per-page text from a PDF.
fn load_pdf(path: &Path, name: String) -> AppResult<Document> {
    let pdf = lopdf::Document::load(path)
        .map_err(|e| AppError::Ingestion(format!("Failed to open {}: {}", name, e)))?;

    let mut pages = Vec::new();
    for (page_number, _) in pdf.get_pages() {
        match pdf.extract_text(&[page_number]) {
            Ok(text) => pages.push(Page {
                label: page_number.to_string(),
                text,
            }),
            Err(e) => {
                // Pages without extractable text (scans, vector-only) are
                // kept out of the index rather than failing the document.
                tracing::warn!("No text on {} page {}: {}", name, page_number, e);
            }
        }
    }

    if pages.is_empty() {
        return Err(AppError::Ingestion(format!(
            "No extractable text in {}",
            name
        )));
    }

    Ok(Document { name, pages })
}
