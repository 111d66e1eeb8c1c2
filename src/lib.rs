//! Norris: a Discord bot that summarizes documents and answers questions
//! from them.
//!
//! The flow per slash command is linear: validate the attachment, extract
//! text via the format registry, clamp it to the prompt budget, make one
//! completion call, render the result in the original format (or plain
//! text), and deliver it back as a file.

pub mod commands;
pub mod config;
pub mod discord;
pub mod error;
pub mod formats;
pub mod llm;
pub mod prompts;
pub mod truncate;

pub use error::{CommandError, Error, Result};

use formats::FileFormat;

/// A document attachment fetched from the platform, immutable once read.
#[derive(Debug, Clone)]
pub struct IncomingDocument {
    pub filename: String,
    pub format: FileFormat,
    pub bytes: Vec<u8>,
}

/// A generated file ready to be sent back through the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub filename: String,
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl OutputArtifact {
    /// Build an artifact, guessing the MIME type from the filename.
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();
        Self {
            filename,
            data,
            mime_type,
        }
    }
}
