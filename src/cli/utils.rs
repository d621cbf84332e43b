use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::cli::OutputFormat;
use crate::client::ClientError;
use crate::database::Note;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a list of notes, or a friendly line when there are none
pub fn output_notes(output_format: &OutputFormat, notes: &[Note]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "notes": notes }))?);
        }
        OutputFormat::Text if notes.is_empty() => {
            println!("No notes yet");
        }
        OutputFormat::Text => {
            for note in notes {
                print_note(note);
            }
        }
    }
    Ok(())
}

pub fn output_note(output_format: &OutputFormat, message: &str, note: &Note) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_success(output_format, message, Some(serde_json::to_value(note)?)),
        OutputFormat::Text => {
            println!("✓ {}", message);
            print_note(note);
            Ok(())
        }
    }
}

fn print_note(note: &Note) {
    println!("{}  {}", note.id, note.title);
    for line in note.content.lines() {
        println!("    {}", line);
    }
    if note.image.is_some() {
        println!("    [image attached]");
    }
}

/// Attach the category's generic message to a client error
pub fn friendly(err: ClientError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// Use the given password or read one line from stdin
pub fn resolve_password(provided: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Fill both fields: password is required");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn friendly_error_shows_category_message() {
        let err = friendly(ClientError::Api {
            status: StatusCode::FORBIDDEN,
            message: "Invalid token".to_string(),
        });
        assert_eq!(err.to_string(), "Auth error, please login again");
        assert!(err.downcast_ref::<ClientError>().is_some());
    }

    #[test]
    fn provided_password_used_verbatim() {
        assert_eq!(resolve_password(Some("pw".into())).unwrap(), "pw");
    }
}
