//! Answer pipeline: extract, clamp, one completion call, wrap the reply in
//! the fixed banner, always deliver plain text.

use crate::error::CommandError;
use crate::llm::{CompletionGateway, CompletionRequest};
use crate::{prompts, IncomingDocument, OutputArtifact};

const TEMPERATURE: f64 = 0.1;
const MAX_TOKENS: u32 = 2048;

/// Produce an answer-set artifact for the document.
pub async fn run(
    gateway: &dyn CompletionGateway,
    document: &IncomingDocument,
) -> Result<OutputArtifact, CommandError> {
    let text = super::extracted_text(document)?;

    let user_prompt = prompts::answer_prompt(&text);
    let answer = super::generate(
        gateway,
        CompletionRequest {
            system_prompt: prompts::ANSWER_SYSTEM,
            user_prompt: &user_prompt,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        },
    )
    .await?;

    let formatted = prompts::answer_banner(&answer);
    let basename = basename(&document.filename);

    Ok(OutputArtifact::new(
        format!("answer_{basename}.txt"),
        formatted.into_bytes(),
    ))
}

/// Filename up to the first dot, matching the delivered `answer_<basename>.txt`.
fn basename(filename: &str) -> &str {
    filename.split('.').next().unwrap_or(filename)
}
