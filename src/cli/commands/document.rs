//! Document commands - add, get, set and delete single documents

use crate::cli::output::{print_document, print_output, print_success};
use crate::cli::OutputFormat;
use crate::core::error::FolkError;
use crate::core::services::Services;
use crate::core::types::{payload_from_str, DocId, Payload};
use clap::Args;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a command reads its JSON payload from
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// JSON payload ("-" reads stdin)
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub json: Option<String>,

    /// Read the JSON payload from a file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    /// Read and validate the payload
    pub fn read(&self) -> Result<Payload, FolkError> {
        let json = match (&self.json, &self.file) {
            (_, Some(path)) => std::fs::read_to_string(path)?,
            (Some(json), None) if json == "-" => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
            (Some(json), None) => json.clone(),
            (None, None) => {
                return Err(FolkError::InvalidPayload("no payload given".to_string()))
            }
        };
        payload_from_str(json.trim())
    }
}

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document id
    pub id: DocId,
}

/// Arguments for the set command
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Document id (created if absent)
    pub id: DocId,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Document id
    pub id: DocId,
}

/// Mutation response
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    #[serde(rename = "ID")]
    pub id: DocId,
    pub action: &'static str,
}

/// Execute the add command
pub async fn execute_add(
    args: AddArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = args.payload.read()?;
    let id = services.create(payload).await?;

    match format {
        OutputFormat::Human => print_success(&format!("Created document {id}")),
        OutputFormat::Json => print_output(
            &MutationResponse {
                id,
                action: "created",
            },
            format,
        ),
    }
    Ok(())
}

/// Execute the get command
pub async fn execute_get(
    args: GetArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = services.get(args.id)?;
    print_document(args.id, &payload, format);
    Ok(())
}

/// Execute the set command
pub async fn execute_set(
    args: SetArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = args.payload.read()?;
    services.set(args.id, payload).await?;

    match format {
        OutputFormat::Human => print_success(&format!("Stored document {}", args.id)),
        OutputFormat::Json => print_output(
            &MutationResponse {
                id: args.id,
                action: "stored",
            },
            format,
        ),
    }
    Ok(())
}

/// Execute the delete command
pub async fn execute_delete(
    args: DeleteArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !services.delete(args.id).await {
        return Err(FolkError::NotFound(args.id).into());
    }

    match format {
        OutputFormat::Human => print_success(&format!("Deleted document {}", args.id)),
        OutputFormat::Json => print_output(
            &MutationResponse {
                id: args.id,
                action: "deleted",
            },
            format,
        ),
    }
    Ok(())
}
