//! Format adapter registry.
//!
//! Maps a file extension to a pair of functions: extraction (document bytes
//! to plain text) and rendering (summary text to document bytes). All
//! format-specific library calls live behind this dispatch so the command
//! pipeline never touches a parser directly.

pub mod docx;
pub mod pdf;

use crate::error::{ExtractError, RenderError};

/// Supported document formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Txt,
    Pdf,
    Docx,
    Csv,
}

impl FileFormat {
    /// Sniff the format from a filename's extension, case-insensitive.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Whether the summarize command accepts this format.
    pub fn can_summarize(self) -> bool {
        true
    }

    /// Whether the answer command accepts this format. CSV is summarize-only.
    pub fn can_answer(self) -> bool {
        !matches!(self, Self::Csv)
    }

    /// Extract plain text from document bytes.
    pub fn extract(self, bytes: &[u8]) -> Result<String, ExtractError> {
        match self {
            Self::Txt => extract_txt(bytes),
            Self::Pdf => pdf::extract(bytes),
            Self::Docx => docx::extract(bytes),
            Self::Csv => extract_csv(bytes),
        }
    }

    /// Render a summary as a document in this format. `original_filename`
    /// is woven into the title/heading where the format has one.
    pub fn render(self, summary: &str, original_filename: &str) -> Result<Vec<u8>, RenderError> {
        match self {
            Self::Txt => Ok(summary.as_bytes().to_vec()),
            Self::Pdf => pdf::render(summary, original_filename),
            Self::Docx => docx::render(summary, original_filename),
            Self::Csv => render_csv(summary),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Txt => write!(f, "txt"),
            FileFormat::Pdf => write!(f, "pdf"),
            FileFormat::Docx => write!(f, "docx"),
            FileFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Split a summary into blank-line-delimited paragraph blocks, dropping
/// whitespace-only blocks. Shared by the pdf and docx renderers.
pub(crate) fn paragraph_blocks(summary: &str) -> Vec<&str> {
    summary
        .split("\n\n")
        .map(str::trim_end)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

fn extract_txt(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| ExtractError("text file is not valid UTF-8".into()))
}

fn extract_csv(bytes: &[u8]) -> Result<String, ExtractError> {
    let decoded = std::str::from_utf8(bytes)
        .map_err(|_| ExtractError("csv file is not valid UTF-8".into()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut text = String::new();
    for record in reader.records() {
        let record = record.map_err(|error| ExtractError(format!("csv parse error: {error}")))?;
        let fields: Vec<&str> = record.iter().collect();
        text.push_str(&fields.join(", "));
        text.push('\n');
    }

    Ok(text)
}

fn render_csv(summary: &str) -> Result<Vec<u8>, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Summary"])
        .and_then(|_| writer.write_record([summary]))
        .map_err(|error| RenderError(format!("csv write error: {error}")))?;

    writer
        .into_inner()
        .map_err(|error| RenderError(format!("csv flush error: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_extensions_case_insensitively() {
        assert_eq!(FileFormat::from_filename("notes.txt"), Some(FileFormat::Txt));
        assert_eq!(FileFormat::from_filename("REPORT.PDF"), Some(FileFormat::Pdf));
        assert_eq!(FileFormat::from_filename("a.b.docx"), Some(FileFormat::Docx));
        assert_eq!(FileFormat::from_filename("data.Csv"), Some(FileFormat::Csv));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        assert_eq!(FileFormat::from_filename("archive.xyz"), None);
        assert_eq!(FileFormat::from_filename("no_extension"), None);
    }

    #[test]
    fn csv_is_summarize_only() {
        assert!(FileFormat::Csv.can_summarize());
        assert!(!FileFormat::Csv.can_answer());
        assert!(FileFormat::Pdf.can_answer());
        assert!(FileFormat::Txt.can_answer());
        assert!(FileFormat::Docx.can_answer());
    }

    #[test]
    fn txt_extraction_is_verbatim() {
        let text = FileFormat::Txt.extract(b"Hello world").unwrap();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn txt_extraction_rejects_invalid_utf8() {
        assert!(FileFormat::Txt.extract(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn txt_render_is_verbatim_utf8() {
        let bytes = FileFormat::Txt.render("Greeting.", "hello.txt").unwrap();
        assert_eq!(bytes, b"Greeting.");
    }

    #[test]
    fn csv_extraction_joins_fields_and_rows() {
        let text = FileFormat::Csv.extract(b"a,b\nc,d\n").unwrap();
        assert_eq!(text, "a, b\nc, d\n");
    }

    #[test]
    fn csv_render_is_a_two_row_table() {
        let bytes = FileFormat::Csv.render("short summary", "data.csv").unwrap();
        let rendered = String::from_utf8(bytes).unwrap();
        assert_eq!(rendered, "Summary\nshort summary\n");
    }

    #[test]
    fn csv_render_quotes_multiline_summaries() {
        let bytes = FileFormat::Csv.render("line one\nline two", "data.csv").unwrap();
        let rendered = String::from_utf8(bytes).unwrap();
        // The whole summary lands in one quoted cell.
        assert_eq!(rendered, "Summary\n\"line one\nline two\"\n");
    }

    #[test]
    fn paragraph_blocks_split_on_blank_lines() {
        let blocks = paragraph_blocks("first block\nstill first\n\nsecond\n\n\n\nthird\n");
        assert_eq!(blocks, vec!["first block\nstill first", "second", "third"]);
    }
}
