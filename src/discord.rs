//! Discord gateway client: slash-command registration and dispatch.

use crate::commands::{self, CommandKind, EXTRACTION_FAILED_MESSAGE};
use crate::error::CommandError;
use crate::llm::CompletionGateway;
use crate::IncomingDocument;

use async_trait::async_trait;
use serenity::all::{
    Attachment, Command, CommandInteraction, CommandOptionType, Context, CreateAttachment,
    CreateCommand, CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EventHandler, GatewayIntents, Interaction, Ready,
};
use std::sync::Arc;

/// The bot: a token plus the injected completion gateway.
pub struct DiscordBot {
    token: String,
    gateway: Arc<dyn CompletionGateway>,
}

impl DiscordBot {
    pub fn new(token: impl Into<String>, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            token: token.into(),
            gateway,
        }
    }

    /// Build the serenity client. Slash commands arrive over the interaction
    /// endpoint, so no privileged gateway intents are needed.
    pub async fn build_client(&self) -> crate::Result<serenity::Client> {
        let handler = Handler {
            gateway: self.gateway.clone(),
        };

        let client = serenity::Client::builder(&self.token, GatewayIntents::empty())
            .event_handler(handler)
            .await?;

        Ok(client)
    }
}

struct Handler {
    gateway: Arc<dyn CompletionGateway>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(bot_name = %ready.user.name, "discord connected");

        let definitions = vec![
            CreateCommand::new("summarize")
                .description("Summarize document")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Attachment,
                        "file",
                        "Document to summarize",
                    )
                    .required(false),
                ),
            CreateCommand::new("answer")
                .description("Answer questions from the sent document")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Attachment,
                        "file",
                        "Document containing the questions",
                    )
                    .required(false),
                ),
        ];

        match Command::set_global_commands(&ctx.http, definitions).await {
            Ok(registered) => {
                tracing::info!(count = registered.len(), "slash commands registered");
            }
            Err(error) => {
                tracing::error!(%error, "failed to register slash commands");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let kind = match command.data.name.as_str() {
            "summarize" => CommandKind::Summarize,
            "answer" => CommandKind::Answer,
            other => {
                tracing::warn!(command = %other, "unknown command interaction");
                return;
            }
        };

        if let Err(error) = self.handle_command(&ctx, &command, kind).await {
            tracing::error!(%error, command = ?kind, "command handling failed");
        }
    }
}

impl Handler {
    /// Drive one command invocation through the pipeline: validate, defer,
    /// download, run, deliver.
    async fn handle_command(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        kind: CommandKind,
    ) -> crate::Result<()> {
        let Some(attachment) = attachment_option(command) else {
            respond_now(ctx, command, kind.missing_attachment_message(), true).await?;
            return Ok(());
        };

        let format = match commands::validate_attachment(kind, Some(&attachment.filename)) {
            Ok(format) => format,
            Err(_) => {
                tracing::info!(
                    filename = %attachment.filename,
                    command = ?kind,
                    "rejected unsupported attachment"
                );
                respond_now(ctx, command, kind.unsupported_format_message(), false).await?;
                return Ok(());
            }
        };

        // Deferred "thinking" acknowledgment: Discord's initial-response
        // deadline is shorter than the completion round trip.
        command.defer(&ctx.http).await?;

        let bytes = match attachment.download().await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::error!(%error, filename = %attachment.filename, "attachment download failed");
                followup_text(ctx, command, "Failed to download the attachment.").await?;
                return Ok(());
            }
        };

        let document = IncomingDocument {
            filename: attachment.filename.clone(),
            format,
            bytes,
        };

        let outcome = match kind {
            CommandKind::Summarize => {
                commands::summarize::run(self.gateway.as_ref(), &document).await
            }
            CommandKind::Answer => commands::answer::run(self.gateway.as_ref(), &document).await,
        };

        match outcome {
            Ok(artifact) => {
                tracing::info!(
                    filename = %artifact.filename,
                    size_bytes = artifact.data.len(),
                    command = ?kind,
                    "delivering artifact"
                );

                let file = CreateAttachment::bytes(artifact.data, artifact.filename);
                let followup = CreateInteractionResponseFollowup::new()
                    .content(kind.delivery_caption())
                    .add_file(file);
                command.create_followup(&ctx.http, followup).await?;
            }
            Err(error) => {
                let text = match error {
                    CommandError::ExtractionFailed => EXTRACTION_FAILED_MESSAGE,
                    _ => kind.generation_failed_message(),
                };
                followup_text(ctx, command, text).await?;
            }
        }

        Ok(())
    }
}

/// Pull the attachment out of the command options, if one was provided.
fn attachment_option(command: &CommandInteraction) -> Option<&Attachment> {
    command
        .data
        .options()
        .into_iter()
        .find_map(|option| match option.value {
            serenity::all::ResolvedValue::Attachment(attachment) => Some(attachment),
            _ => None,
        })
}

/// Immediate (non-deferred) response, used for validation rejections.
async fn respond_now(
    ctx: &Context,
    command: &CommandInteraction,
    text: &str,
    ephemeral: bool,
) -> crate::Result<()> {
    let message = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(ephemeral);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// Plain-text follow-up after a deferral.
async fn followup_text(
    ctx: &Context,
    command: &CommandInteraction,
    text: &str,
) -> crate::Result<()> {
    command
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new().content(text),
        )
        .await?;
    Ok(())
}
