//! Error types for the norris crate.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Discord(#[from] serenity::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Terminal outcomes of a command invocation that map to a single
/// user-visible message. Each stage either fully succeeds or the whole
/// command stops with one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command was invoked without a file attachment.
    #[error("no attachment provided")]
    MissingAttachment,

    /// The attachment's extension is not supported by this command.
    #[error("unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    /// The document could not be parsed, or yielded no text at all.
    #[error("failed to extract text from the document")]
    ExtractionFailed,

    /// The completion API call failed or returned a malformed reply.
    #[error("completion request failed")]
    GenerationFailed,
}

/// Failure while parsing a document into plain text.
#[derive(Debug, thiserror::Error)]
#[error("extraction failed: {0}")]
pub struct ExtractError(pub String);

/// Failure while building an output document. Recovered by the caller with
/// a plain-text fallback artifact, never surfaced to the user.
#[derive(Debug, thiserror::Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);
