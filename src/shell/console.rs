//! Terminal input shared by the command loop and confirmation prompts

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::services::Confirm;

/// Line reader over stdin; the command loop only holds it while reading
pub type InputLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn stdin_lines() -> InputLines {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Read one line; `None` at end of input
pub async fn read_line(input: &InputLines, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = std::io::stdout().flush();
    match input.lock().await.next_line().await {
        Ok(line) => line,
        Err(e) => {
            tracing::error!("Failed to read input: {}", e);
            None
        }
    }
}

/// Asks on the terminal; anything but `y`/`yes` declines
pub struct ConsoleConfirm {
    input: InputLines,
}

impl ConsoleConfirm {
    pub fn new(input: InputLines) -> Self {
        Self { input }
    }
}

#[async_trait]
impl Confirm for ConsoleConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let answer = read_line(&self.input, &format!("{} [y/N] ", prompt)).await;
        matches!(
            answer.as_deref().map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes")
        )
    }
}
