//! Summarize pipeline: extract, clamp, one completion call, render the
//! summary in the document's original format.

use crate::error::CommandError;
use crate::llm::{CompletionGateway, CompletionRequest};
use crate::{prompts, IncomingDocument, OutputArtifact};

const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 2048;

/// Produce a summary artifact for the document.
pub async fn run(
    gateway: &dyn CompletionGateway,
    document: &IncomingDocument,
) -> Result<OutputArtifact, CommandError> {
    let text = super::extracted_text(document)?;

    let user_prompt = prompts::summarize_prompt(&text);
    let summary = super::generate(
        gateway,
        CompletionRequest {
            system_prompt: prompts::SUMMARIZE_SYSTEM,
            user_prompt: &user_prompt,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        },
    )
    .await?;

    Ok(render_artifact(document, &summary))
}

/// Render the summary in the original format, falling back to a plain-text
/// artifact on any render failure. Rendering never fails the command.
fn render_artifact(document: &IncomingDocument, summary: &str) -> OutputArtifact {
    match document.format.render(summary, &document.filename) {
        Ok(data) => OutputArtifact::new(format!("summary_{}", document.filename), data),
        Err(error) => {
            tracing::warn!(
                filename = %document.filename,
                format = %document.format,
                %error,
                "render failed, falling back to plain text"
            );
            fallback_artifact(summary, &document.filename)
        }
    }
}

/// Plain-text artifact carrying the untouched summary.
fn fallback_artifact(summary: &str, original_filename: &str) -> OutputArtifact {
    OutputArtifact::new(
        format!("summary_{original_filename}.txt"),
        summary.as_bytes().to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FileFormat;

    #[test]
    fn successful_render_keeps_the_original_format() {
        let document = IncomingDocument {
            filename: "notes.txt".into(),
            format: FileFormat::Txt,
            bytes: b"irrelevant".to_vec(),
        };

        let artifact = render_artifact(&document, "Greeting.");
        assert_eq!(artifact.filename, "summary_notes.txt");
        assert_eq!(artifact.data, b"Greeting.");
        assert_eq!(artifact.mime_type, "text/plain");
    }

    #[test]
    fn fallback_artifact_carries_the_untouched_summary() {
        let artifact = fallback_artifact("The summary,\nverbatim.", "report.pdf");
        assert_eq!(artifact.filename, "summary_report.pdf.txt");
        assert_eq!(artifact.data, b"The summary,\nverbatim.");
        assert_eq!(artifact.mime_type, "text/plain");
    }
}
