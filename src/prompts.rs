//! Fixed prompt templates and output framing.

/// System prompt for the summarize command.
pub const SUMMARIZE_SYSTEM: &str =
    "You are an assistant who summarizes documents briefly, clearly, and accurately.";

/// System prompt for the answer command.
pub const ANSWER_SYSTEM: &str =
    "You are a highly intelligent AI that answers any type of question accurately.";

/// Attribution line appended to every answer file.
const ATTRIBUTION: &str = "Generated by Norris";

const BANNER_RULE: &str = "========================";

/// User prompt for summarizing a document.
pub fn summarize_prompt(text: &str) -> String {
    format!(
        "Summarize the following text clearly and concisely. \
         Retain the key points and main information.\n\nText:\n{text}\n\nSummary:"
    )
}

/// User prompt for answering the questions contained in a document.
pub fn answer_prompt(text: &str) -> String {
    format!(
        "You are an AI assistant that answers various questions from documents. \
         Please analyze the document below and provide the best answers in a \
         clear and structured format.\n\nDocument:\n{text}\n\nAnswer:"
    )
}

/// Wrap a raw model answer with the fixed banner header/footer.
pub fn answer_banner(answer: &str) -> String {
    format!("Answers\n{BANNER_RULE}\n\n{answer}\n\n{BANNER_RULE}\n{ATTRIBUTION}")
}
