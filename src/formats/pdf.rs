//! PDF adapter: extraction via pdf-extract, rendering via lopdf.
//!
//! Rendering produces a paginated Letter document with a title line naming
//! the original file, then the summary's blank-line blocks as paragraphs.
//! Layout is intentionally plain: Helvetica, fixed leading, greedy word
//! wrap, new page when the column runs out.

use crate::error::{ExtractError, RenderError};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const LEADING: f32 = 14.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
/// Greedy wrap width for 11pt Helvetica in a 468pt column.
const MAX_LINE_CHARS: usize = 90;

/// Extract the text of every page. pdf-extract walks the page tree and
/// joins page texts itself; a corrupt file fails the whole document.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|error| ExtractError(format!("pdf parse error: {error}")))
}

/// One laid-out text line, flagged when it is the title.
struct Line {
    text: String,
    title: bool,
}

/// Render the summary as a PDF document.
pub fn render(summary: &str, original_filename: &str) -> Result<Vec<u8>, RenderError> {
    let lines = layout(summary, original_filename);
    let lines_per_page = ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING) as usize;

    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids: Vec<Object> = Vec::new();

    for page_lines in lines.chunks(lines_per_page.max(1)) {
        let content = page_content(page_lines);
        let encoded = content
            .encode()
            .map_err(|error| RenderError(format!("pdf content encode error: {error}")))?;

        let content_id = document.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document.compress();

    let mut buffer = Vec::new();
    document
        .save_to(&mut buffer)
        .map_err(|error| RenderError(format!("pdf save error: {error}")))?;

    Ok(buffer)
}

/// Flatten title + paragraph blocks into wrapped text lines, with a blank
/// line after the title and between blocks.
fn layout(summary: &str, original_filename: &str) -> Vec<Line> {
    let mut lines = vec![
        Line {
            text: format!("summary {original_filename}"),
            title: true,
        },
        Line {
            text: String::new(),
            title: false,
        },
    ];

    let blocks = super::paragraph_blocks(summary);
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            lines.push(Line {
                text: String::new(),
                title: false,
            });
        }
        for physical_line in block.lines() {
            for wrapped in wrap(physical_line, MAX_LINE_CHARS) {
                lines.push(Line {
                    text: wrapped,
                    title: false,
                });
            }
        }
    }

    lines
}

/// Greedy word wrap on spaces, hard-cutting words longer than the width.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() {
            current.push_str(word);
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            wrapped.push(std::mem::take(&mut current));
            current.push_str(word);
        }

        // Hard-cut oversized words so a single token can't overflow the column.
        while current.chars().count() > width {
            let cut: String = current.chars().take(width).collect();
            let rest: String = current.chars().skip(width).collect();
            wrapped.push(cut);
            current = rest;
        }
    }

    if !current.is_empty() {
        wrapped.push(current);
    }

    wrapped
}

/// Build the content stream for one page of lines.
fn page_content(lines: &[Line]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new(
            "Td",
            vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - LEADING).into()],
        ),
    ];

    let mut current_size = 0.0;
    for line in lines {
        let size = if line.title { TITLE_SIZE } else { BODY_SIZE };
        if size != current_size {
            operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
            current_size = size;
        }
        if !line.text.is_empty() {
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(latin1_bytes(&line.text), StringFormat::Literal)],
            ));
        }
        operations.push(Operation::new("T*", vec![]));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// Map text to Latin-1 bytes for the non-embedded Helvetica font,
/// substituting '?' for anything outside that range.
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
        .collect()
}
