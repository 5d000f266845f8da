//! Text extraction from resume document bytes

use crate::error::{Result, ScannerError};
use crate::input::file_detector::DocumentKind;
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ScannerError::Extraction(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = read_docx(bytes).map_err(|e| ScannerError::Extraction(e.to_string()))?;

        // One line per paragraph, runs concatenated in order.
        let mut lines: Vec<String> = Vec::new();
        for child in docx.document.children.iter() {
            if let DocumentChild::Paragraph(para) = child {
                let mut line = String::new();
                for pc in para.children.iter() {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in run.children.iter() {
                            if let RunChild::Text(t) = rc {
                                line.push_str(&t.text);
                            }
                        }
                    }
                }
                lines.push(line);
            }
        }

        Ok(lines.join("\n").trim().to_string())
    }
}

/// Routes bytes to the extractor for the declared document kind.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String> {
    match kind {
        DocumentKind::Pdf => PdfTextExtractor.extract(bytes),
        DocumentKind::Docx => DocxTextExtractor.extract(bytes),
    }
}
