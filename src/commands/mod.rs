//! Command pipelines for the two slash commands.
//!
//! Each pipeline is a linear sequence: extract, truncate, one completion
//! call, render. The Discord layer handles validation, deferral, download,
//! and delivery; everything here is platform-free so tests can drive it
//! with a stub gateway.

pub mod answer;
pub mod summarize;

use crate::error::CommandError;
use crate::formats::FileFormat;
use crate::{llm::CompletionGateway, IncomingDocument};

/// Which slash command is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Summarize,
    Answer,
}

impl CommandKind {
    /// Whether this command accepts the given format.
    pub fn supports(self, format: FileFormat) -> bool {
        match self {
            CommandKind::Summarize => format.can_summarize(),
            CommandKind::Answer => format.can_answer(),
        }
    }

    /// Guidance shown when the command is invoked without an attachment.
    pub fn missing_attachment_message(self) -> &'static str {
        match self {
            CommandKind::Summarize => {
                "Please attach the document to be summarized! \
                 Use the command `/summarize` again with the file attachment."
            }
            CommandKind::Answer => {
                "Please attach a document containing questions! \
                 Use `/answer` again with the file attachment."
            }
        }
    }

    /// Rejection shown for an unsupported extension.
    pub fn unsupported_format_message(self) -> &'static str {
        match self {
            CommandKind::Summarize => {
                "Format not supported. Supported format: .txt, .pdf, .docx, .csv"
            }
            CommandKind::Answer => "Unsupported format. Supported formats: .txt, .pdf, .docx",
        }
    }

    /// Message sent when the completion call fails.
    pub fn generation_failed_message(self) -> &'static str {
        match self {
            CommandKind::Summarize => "Failed to generate the summary.",
            CommandKind::Answer => "Failed to generate an answer.",
        }
    }

    /// Caption accompanying the delivered file.
    pub fn delivery_caption(self) -> &'static str {
        match self {
            CommandKind::Summarize => "Here is the summary of your document:",
            CommandKind::Answer => "Here are the answers from the document:",
        }
    }
}

/// Message sent when extraction fails, shared by both commands.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract text from the file.";

/// Validate the attachment filename for a command before any work happens.
/// Returns the resolved format, or the user-input error to report.
pub fn validate_attachment(
    kind: CommandKind,
    filename: Option<&str>,
) -> Result<FileFormat, CommandError> {
    let filename = filename.ok_or(CommandError::MissingAttachment)?;

    match FileFormat::from_filename(filename) {
        Some(format) if kind.supports(format) => Ok(format),
        _ => Err(CommandError::UnsupportedFormat {
            extension: filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default(),
        }),
    }
}

/// Extract and clamp the document text. Empty extraction is a failure, never
/// a silently-empty prompt.
fn extracted_text(document: &IncomingDocument) -> Result<String, CommandError> {
    let text = document.format.extract(&document.bytes).map_err(|error| {
        tracing::warn!(
            filename = %document.filename,
            format = %document.format,
            %error,
            "text extraction failed"
        );
        CommandError::ExtractionFailed
    })?;

    if text.trim().is_empty() {
        tracing::warn!(
            filename = %document.filename,
            format = %document.format,
            "document yielded no extractable text"
        );
        return Err(CommandError::ExtractionFailed);
    }

    Ok(crate::truncate::clamp(&text).into_owned())
}

/// Run one completion call, mapping any gateway failure to the terminal
/// generation error.
async fn generate(
    gateway: &dyn CompletionGateway,
    request: crate::llm::CompletionRequest<'_>,
) -> Result<String, CommandError> {
    gateway.complete(request).await.map_err(|error| {
        tracing::error!(%error, "completion call failed");
        CommandError::GenerationFailed
    })
}
