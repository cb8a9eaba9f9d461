use docx_rs::{read_docx, DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

use super::ExtractionError;

/// Joins every top-level body paragraph with `\n`, in document order.
/// Empty paragraphs are kept as empty lines. Tables and text boxes are skipped.
pub(super) fn extract_paragraphs(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

/// Hyperlinks and tracked insertions hold runs of their own; deletions are
/// not part of the visible text.
fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Insert};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        pack(docx)
    }

    #[test]
    fn test_paragraphs_joined_with_newline() {
        let bytes = build_docx(&["A", "B"]);
        assert_eq!(extract_paragraphs(&bytes).unwrap(), "A\nB");
    }

    #[test]
    fn test_runs_within_paragraph_are_concatenated() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Data"))
            .add_run(Run::new().add_text("base"));
        let bytes = pack(Docx::new().add_paragraph(paragraph));
        assert_eq!(extract_paragraphs(&bytes).unwrap(), "Database");
    }

    #[test]
    fn test_hyperlink_text_is_included() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Contact:"))
            .add_hyperlink(
                Hyperlink::new("https://linkedin.com/in/jane", HyperlinkType::External)
                    .add_run(Run::new().add_text("linkedin.com/in/jane")),
            );
        let bytes = pack(Docx::new().add_paragraph(paragraph));
        assert_eq!(
            extract_paragraphs(&bytes).unwrap(),
            "Contact:linkedin.com/in/jane"
        );
    }

    #[test]
    fn test_tracked_insertion_text_is_included() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Rust"))
            .add_insert(Insert::new(Run::new().add_text("acean")));
        let bytes = pack(Docx::new().add_paragraph(paragraph));
        assert_eq!(extract_paragraphs(&bytes).unwrap(), "Rustacean");
    }

    #[test]
    fn test_empty_paragraph_kept_as_blank_line() {
        let bytes = build_docx(&["Experience", "", "Education"]);
        assert_eq!(
            extract_paragraphs(&bytes).unwrap(),
            "Experience\n\nEducation"
        );
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(matches!(
            extract_paragraphs(b"plain text pretending to be docx"),
            Err(ExtractionError::Docx(_))
        ));
    }
}
