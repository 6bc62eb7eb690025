//! Console module
//!
//! This module contains the line-oriented command surface: command parsing,
//! handlers that apply commands to the session, and response rendering.

pub mod commands;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::state::AppState;
pub use commands::Command;
pub use handlers::handle_command;
pub use responses::Response;

/// How responses are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One JSON object per line
    Json,
    /// Plain text in the theme's text colour
    Color,
    /// Plain text without escape sequences
    Plain,
}

/// Read commands line by line until `quit` or end of input
pub async fn run_console<R, W>(
    state: Arc<AppState>,
    input: R,
    mut output: W,
    mode: OutputMode,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Console ready, type 'help' for commands");
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match line.parse::<Command>() {
            Ok(Command::Quit) => {
                debug!("Quit requested");
                break;
            }
            Ok(command) => {
                debug!("Console command: {:?}", command);
                handle_command(&state, command)
            }
            Err(e) => Response::error(e),
        };
        if response.is_error() {
            warn!("Command '{}' failed", line);
        }

        let rendered = render(&state, &response, mode)?;
        output.write_all(rendered.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    info!("Console session ended");
    Ok(())
}

fn render(state: &AppState, response: &Response, mode: OutputMode) -> anyhow::Result<String> {
    Ok(match mode {
        OutputMode::Json => serde_json::to_string(response)?,
        OutputMode::Plain => response.to_text(),
        OutputMode::Color => {
            let color = state.get_settings()
                .map(|settings| settings.display_text_color())
                .map_err(anyhow::Error::msg)?;
            format!("{}{}\x1b[0m", color.ansi_fg(), response.to_text())
        }
    })
}
