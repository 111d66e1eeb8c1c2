//! DOCX adapter backed by docx-rs.
//!
//! Extraction walks the Paragraph -> Run -> Text path of the parsed
//! document tree; rendering builds a new document with a heading and one
//! paragraph per blank-line-delimited block of the summary.

use crate::error::{ExtractError, RenderError};
use docx_rs::{read_docx, Docx, Paragraph, Run};

/// Extract paragraph text from DOCX bytes, one line per paragraph.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let parsed = read_docx(bytes).map_err(|error| ExtractError(format!("docx parse error: {error:?}")))?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in &parsed.document.children {
        // Only Paragraph nodes carry body text; tables and section breaks
        // contribute nothing.
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            paragraphs.push(paragraph_text(paragraph));
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Concatenate the text runs of one paragraph. Runs are parts of the same
/// sentence, so no separator is inserted between them.
fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut parts: Vec<String> = Vec::new();

    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(text) = run_child {
                    parts.push(text.text.clone());
                }
            }
        }
    }

    parts.concat()
}

/// Render the summary as a DOCX document: a heading naming the original
/// file, then one paragraph per blank-line block.
pub fn render(summary: &str, original_filename: &str) -> Result<Vec<u8>, RenderError> {
    let heading = Paragraph::new().add_run(
        Run::new()
            .add_text(format!("Summary {original_filename}"))
            .bold()
            .size(32),
    );

    let mut document = Docx::new().add_paragraph(heading);

    for block in super::paragraph_blocks(summary) {
        let mut paragraph = Paragraph::new();
        // Line breaks inside a block stay inside one paragraph.
        for (index, line) in block.lines().enumerate() {
            let mut run = Run::new();
            if index > 0 {
                run = run.add_break(docx_rs::BreakType::TextWrapping);
            }
            paragraph = paragraph.add_run(run.add_text(line));
        }
        document = document.add_paragraph(paragraph);
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    document
        .build()
        .pack(&mut buffer)
        .map_err(|error| RenderError(format!("docx pack error: {error}")))?;

    Ok(buffer.into_inner())
}
