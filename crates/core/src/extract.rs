use crate::error::IngestError;
use crate::models::FileType;
use lopdf::Document;
use std::fs;
use std::path::Path;

/// Detects the supported file type from the path extension.
pub fn detect_file_type(path: &Path) -> Result<FileType, IngestError> {
    FileType::from_path(path)
        .ok_or_else(|| IngestError::UnsupportedFile(path.display().to_string()))
}

/// Extracts the raw text of a document, ready for the ingestion pipeline.
pub fn extract_text(path: &Path, filetype: FileType) -> Result<String, IngestError> {
    match filetype {
        FileType::Pdf => extract_pdf_text(path),
        FileType::Txt => Ok(fs::read_to_string(path)?),
    }
}

fn extract_pdf_text(path: &Path) -> Result<String, IngestError> {
    let document =
        Document::load(path).map_err(|error| IngestError::PdfParse(error.to_string()))?;

    let mut text = String::new();
    for (page_no, _page_id) in document.get_pages() {
        let page_text = document
            .extract_text(&[page_no])
            .map_err(|error| IngestError::PdfParse(error.to_string()))?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text)
}
