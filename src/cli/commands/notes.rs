use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::commands::client_for;
use crate::cli::config::CliConfig;
use crate::cli::utils;
use crate::cli::OutputFormat;
use crate::types::{CreateNoteRequest, UpdateNoteRequest};

#[derive(Subcommand)]
pub enum NotesCommands {
    #[command(about = "List your notes")]
    List,

    #[command(about = "Add a note")]
    Add {
        #[arg(long, help = "Note title")]
        title: String,
        #[arg(long, help = "Note body")]
        content: String,
        #[arg(long, help = "Image reference (URL or encoded data)")]
        image: Option<String>,
    },

    #[command(about = "Change fields of one of your notes")]
    Update {
        #[arg(help = "Note ID")]
        id: Uuid,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New body")]
        content: Option<String>,
        #[arg(long, help = "New image reference")]
        image: Option<String>,
    },

    #[command(about = "Delete one of your notes")]
    Delete {
        #[arg(help = "Note ID")]
        id: Uuid,
    },
}

pub async fn handle(cmd: NotesCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = CliConfig::load()?;
    let session = config.require_session()?;
    let client = client_for(&config)?;

    match cmd {
        NotesCommands::List => {
            let notes = client.list_notes(&session).await.map_err(utils::friendly)?;
            utils::output_notes(&output_format, &notes)
        }
        NotesCommands::Add { title, content, image } => {
            let request = CreateNoteRequest { title, content, image };
            // same checks the server applies, without the round trip
            request.clone().validate()?;

            let note = client
                .create_note(&session, &request)
                .await
                .map_err(utils::friendly)?;
            utils::output_note(&output_format, "Note created", &note)
        }
        NotesCommands::Update { id, title, content, image } => {
            let request = UpdateNoteRequest { title, content, image };
            request.clone().validate()?;

            let note = client
                .update_note(&session, id, &request)
                .await
                .map_err(utils::friendly)?;
            utils::output_note(&output_format, "Note updated", &note)
        }
        NotesCommands::Delete { id } => {
            client
                .delete_note(&session, id)
                .await
                .map_err(utils::friendly)?;
            utils::output_success(
                &output_format,
                &format!("Deleted note {}", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
