//! Structural formatting checks for ATS-unfriendly document features
//!
//! Checking is advisory: any failure inside the walk becomes an
//! `extraction_error` issue appended after whatever was already found,
//! never an error returned to the pipeline.

use crate::input::file_detector::DocumentKind;
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

const TABLE_DETAIL: &str = "Resume contains tables, which may not be ATS-friendly.";
const IMAGE_DETAIL: &str = "Resume contains images, which may not be ATS-friendly.";

/// A page drawing at least this many rectangle operators is treated as
/// containing a ruled table.
const TABLE_RECT_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    ContainsTable,
    ContainsImage,
    ExtractionError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingIssue {
    pub kind: IssueKind,
    pub detail: String,
}

impl FormattingIssue {
    pub fn table() -> Self {
        Self {
            kind: IssueKind::ContainsTable,
            detail: TABLE_DETAIL.to_string(),
        }
    }

    pub fn image() -> Self {
        Self {
            kind: IssueKind::ContainsImage,
            detail: IMAGE_DETAIL.to_string(),
        }
    }

    pub fn check_failure(detail: &str) -> Self {
        Self {
            kind: IssueKind::ExtractionError,
            detail: format!("Error during formatting check: {}", detail),
        }
    }
}

/// Walks the document and reports tables and images in traversal order.
/// Issues found before a mid-walk failure are kept; the failure itself is
/// appended as a final `extraction_error` issue.
pub fn check_formatting(bytes: &[u8], kind: DocumentKind) -> Vec<FormattingIssue> {
    let mut issues = Vec::new();
    let outcome = match kind {
        DocumentKind::Pdf => check_pdf(bytes, &mut issues),
        DocumentKind::Docx => check_docx(bytes, &mut issues),
    };
    if let Err(detail) = outcome {
        issues.push(FormattingIssue::check_failure(&detail));
    }
    issues
}

fn check_pdf(bytes: &[u8], issues: &mut Vec<FormattingIssue>) -> Result<(), String> {
    let doc = Document::load_mem(bytes).map_err(|e| e.to_string())?;

    for (_page_num, page_id) in doc.get_pages() {
        if page_draws_table(&doc, page_id)? {
            issues.push(FormattingIssue::table());
        }
        if page_has_image(&doc, page_id) {
            issues.push(FormattingIssue::image());
        }
    }
    Ok(())
}

fn page_draws_table(doc: &Document, page_id: ObjectId) -> Result<bool, String> {
    let content_bytes = doc.get_page_content(page_id).map_err(|e| e.to_string())?;
    let content = Content::decode(&content_bytes).map_err(|e| e.to_string())?;
    let rect_ops = content
        .operations
        .iter()
        .filter(|op| op.operator == "re")
        .count();
    Ok(rect_ops >= TABLE_RECT_THRESHOLD)
}

fn page_has_image(doc: &Document, page_id: ObjectId) -> bool {
    let (inline_resources, resource_ids) = doc.get_page_resources(page_id);

    if let Some(dict) = inline_resources {
        if resources_contain_image(doc, dict) {
            return true;
        }
    }
    for id in resource_ids {
        if let Ok(dict) = doc.get_dictionary(id) {
            if resources_contain_image(doc, dict) {
                return true;
            }
        }
    }
    false
}

fn resources_contain_image(doc: &Document, resources: &Dictionary) -> bool {
    let xobjects = match resources.get(b"XObject").map(|obj| resolve(doc, obj)) {
        Ok(Some(Object::Dictionary(dict))) => dict,
        _ => return false,
    };

    for (_name, entry) in xobjects.iter() {
        if let Some(Object::Stream(stream)) = resolve(doc, entry) {
            if let Ok(b"Image") = stream.dict.get(b"Subtype").and_then(Object::as_name) {
                return true;
            }
        }
    }
    false
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn check_docx(bytes: &[u8], issues: &mut Vec<FormattingIssue>) -> Result<(), String> {
    let docx = read_docx(bytes).map_err(|e| e.to_string())?;

    for child in docx.document.children.iter() {
        match child {
            DocumentChild::Table(_) => issues.push(FormattingIssue::table()),
            DocumentChild::Paragraph(para) => {
                for pc in para.children.iter() {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in run.children.iter() {
                            if let RunChild::Drawing(_) = rc {
                                issues.push(FormattingIssue::image());
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use lopdf::content::Operation;
    use lopdf::{dictionary, Stream};

    /// One-page PDF with the requested number of rectangle draws and an
    /// optional 1x1 grayscale image XObject.
    fn pdf_bytes(rect_ops: usize, with_image: bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut operations = Vec::new();
        for _ in 0..rect_ops {
            operations.push(Operation::new(
                "re",
                vec![10.into(), 10.into(), 100.into(), 20.into()],
            ));
        }
        if rect_ops > 0 {
            operations.push(Operation::new("S", vec![]));
        }
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            Content { operations }.encode().unwrap(),
        ));

        let mut resources = dictionary! {};
        if with_image {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![0u8],
            ));
            resources.set("XObject", dictionary! { "Im0" => image_id });
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pdf_with_table_and_image_reports_both() {
        let issues = check_formatting(&pdf_bytes(4, true), DocumentKind::Pdf);
        let kinds: Vec<IssueKind> = issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, vec![IssueKind::ContainsTable, IssueKind::ContainsImage]);
    }

    #[test]
    fn test_plain_pdf_page_reports_nothing() {
        assert!(check_formatting(&pdf_bytes(0, false), DocumentKind::Pdf).is_empty());
    }

    #[test]
    fn test_rectangle_count_below_threshold_is_not_a_table() {
        assert!(check_formatting(&pdf_bytes(3, false), DocumentKind::Pdf).is_empty());
    }

    #[test]
    fn test_docx_reports_one_issue_per_table() {
        fn table() -> Table {
            Table::new(vec![TableRow::new(vec![
                TableCell::new().add_paragraph(Paragraph::new())
            ])])
        }
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Summary")))
            .add_table(table())
            .add_table(table());
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();

        let issues = check_formatting(&buf.into_inner(), DocumentKind::Docx);
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|issue| issue.kind == IssueKind::ContainsTable));
    }

    #[test]
    fn test_unreadable_bytes_become_extraction_error_issue() {
        let issues = check_formatting(b"garbage", DocumentKind::Pdf);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ExtractionError);
        assert!(issues[0]
            .detail
            .starts_with("Error during formatting check:"));
    }

    #[test]
    fn test_issue_details_match_expected_wording() {
        assert_eq!(FormattingIssue::table().detail, TABLE_DETAIL);
        assert_eq!(FormattingIssue::image().detail, IMAGE_DETAIL);
    }
}
