//! End-to-end command pipeline scenarios with a stub completion gateway.

use async_trait::async_trait;
use norris::commands::{self, CommandKind};
use norris::formats::FileFormat;
use norris::llm::{CompletionGateway, CompletionRequest};
use norris::truncate::TRUNCATION_MARKER;
use norris::{CommandError, IncomingDocument};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Gateway stub that returns a canned reply and records what it was asked.
struct StubGateway {
    reply: &'static str,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGateway {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl CompletionGateway for StubGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.user_prompt.to_string());
        Ok(self.reply.to_string())
    }
}

/// Gateway stub whose single attempt always fails.
struct FailingGateway;

#[async_trait]
impl CompletionGateway for FailingGateway {
    async fn complete(&self, _request: CompletionRequest<'_>) -> anyhow::Result<String> {
        anyhow::bail!("connection reset by peer")
    }
}

fn document(filename: &str, format: FileFormat, bytes: &[u8]) -> IncomingDocument {
    IncomingDocument {
        filename: filename.into(),
        format,
        bytes: bytes.to_vec(),
    }
}

fn empty_docx() -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    docx_rs::Docx::new().build().pack(&mut buffer).unwrap();
    buffer.into_inner()
}

#[tokio::test]
async fn summarize_txt_delivers_the_model_reply_verbatim() {
    let gateway = StubGateway::new("Greeting.");
    let doc = document("hello.txt", FileFormat::Txt, b"Hello world");

    let artifact = commands::summarize::run(&gateway, &doc).await.unwrap();

    assert_eq!(artifact.filename, "summary_hello.txt");
    assert_eq!(artifact.data, b"Greeting.");
    assert_eq!(gateway.call_count(), 1);
    // The short document passes through truncation untouched.
    assert!(gateway.last_prompt().contains("Hello world"));
    assert!(!gateway.last_prompt().contains(TRUNCATION_MARKER));
}

#[tokio::test]
async fn summarize_csv_extracts_joined_rows_and_renders_a_table() {
    let gateway = StubGateway::new("Two rows of letters.");
    let doc = document("table.csv", FileFormat::Csv, b"a,b\nc,d\n");

    let artifact = commands::summarize::run(&gateway, &doc).await.unwrap();

    // Extraction joined fields with ", " and rows with newlines.
    assert!(gateway.last_prompt().contains("a, b\nc, d"));

    assert_eq!(artifact.filename, "summary_table.csv");
    let rendered = String::from_utf8(artifact.data).unwrap();
    assert_eq!(rendered, "Summary\nTwo rows of letters.\n");
}

#[tokio::test]
async fn answer_on_docx_without_text_fails_before_any_completion_call() {
    let gateway = StubGateway::new("should never be used");
    let doc = document("blank.docx", FileFormat::Docx, &empty_docx());

    let outcome = commands::answer::run(&gateway, &doc).await;

    assert_eq!(outcome.unwrap_err(), CommandError::ExtractionFailed);
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn answer_wraps_the_reply_in_the_banner() {
    let gateway = StubGateway::new("1. Yes.\n2. No.");
    let doc = document("questions.txt", FileFormat::Txt, b"Q1? Q2?");

    let artifact = commands::answer::run(&gateway, &doc).await.unwrap();

    assert_eq!(artifact.filename, "answer_questions.txt");
    let text = String::from_utf8(artifact.data).unwrap();
    assert!(text.starts_with("Answers\n"));
    assert!(text.contains("1. Yes.\n2. No."));
    assert!(text.ends_with("Generated by Norris"));
}

#[tokio::test]
async fn oversized_documents_are_clamped_before_the_completion_call() {
    let gateway = StubGateway::new("Condensed.");
    let body = "x".repeat(40_000);
    let doc = document("big.txt", FileFormat::Txt, body.as_bytes());

    commands::summarize::run(&gateway, &doc).await.unwrap();

    let prompt = gateway.last_prompt();
    assert!(prompt.contains(TRUNCATION_MARKER));
    // Prompt = template + 30k chars of body + marker; nowhere near 40k of body.
    assert!(prompt.chars().count() < 31_000);
}

#[tokio::test]
async fn gateway_failure_surfaces_as_generation_error() {
    let doc = document("hello.txt", FileFormat::Txt, b"Hello world");

    let outcome = commands::summarize::run(&FailingGateway, &doc).await;
    assert_eq!(outcome.unwrap_err(), CommandError::GenerationFailed);

    let outcome = commands::answer::run(&FailingGateway, &doc).await;
    assert_eq!(outcome.unwrap_err(), CommandError::GenerationFailed);
}

#[tokio::test]
async fn corrupt_documents_fail_extraction_without_a_completion_call() {
    let gateway = StubGateway::new("unused");

    let doc = document("broken.pdf", FileFormat::Pdf, b"not a pdf at all");
    let outcome = commands::summarize::run(&gateway, &doc).await;

    assert_eq!(outcome.unwrap_err(), CommandError::ExtractionFailed);
    assert_eq!(gateway.call_count(), 0);
}

#[test]
fn validation_rejects_bad_input_before_any_network_work() {
    // Missing attachment: guidance, no extraction, no gateway involvement.
    assert_eq!(
        commands::validate_attachment(CommandKind::Summarize, None),
        Err(CommandError::MissingAttachment)
    );

    // Unknown extension is a user-input error for both commands.
    for kind in [CommandKind::Summarize, CommandKind::Answer] {
        assert_eq!(
            commands::validate_attachment(kind, Some("payload.xyz")),
            Err(CommandError::UnsupportedFormat {
                extension: "xyz".into()
            })
        );
    }
}
