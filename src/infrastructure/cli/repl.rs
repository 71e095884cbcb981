//! The main game loop

use std::io;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncWrite};

use super::Terminal;
use crate::application::ports::outbound::LlmPort;
use crate::application::services::SessionDispatcher;

const ACTION_PROMPT: &str = "\nWhat would you like to do? ";
const QUIT_COMMAND: &str = ".quit";
const INPUT_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Read player input line by line until the session ends.
///
/// End of input is treated as `.quit`.
pub async fn run_session<R, W, L>(
    terminal: &mut Terminal<R, W>,
    session: &mut SessionDispatcher<L>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    L: LlmPort,
{
    loop {
        let line = match terminal.ask(ACTION_PROMPT).await {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(error = %e, "Unreadable input line");
                terminal.say(INPUT_ERROR_MESSAGE).await?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let input = match line.as_deref().map(str::trim) {
            Some("") => continue,
            Some(input) => input,
            None => QUIT_COMMAND,
        };

        let result = session.process(input).await?;
        terminal.say(&format!("\n{}", result.content)).await?;

        if result.game_over {
            tracing::info!(session_id = %session.id(), "Game over");
            return Ok(());
        }
    }
}
