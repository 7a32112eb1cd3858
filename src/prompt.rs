//! Interactive prompts for secrets.

use std::io;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin},
    sync::Mutex,
};
use zeroize::Zeroizing;

/// Errors raised while prompting the user.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading from or writing to the terminal failed.
    #[error("prompt failed: {0}")]
    Io(#[from] io::Error),

    /// Input ended before an answer was given.
    #[error("no input available to answer the {0} prompt")]
    Closed(&'static str),
}

/// Source of secrets the user has to type in.
#[automock]
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask for the account password.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be used or input has ended.
    async fn password(&self) -> Result<Zeroizing<String>, PromptError>;

    /// Ask for a one-time password from the user's authenticator.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be used or input has ended.
    async fn otp(&self) -> Result<String, PromptError>;
}

/// Prompts on stderr and reads answers line by line from stdin.
///
/// One reader is kept for every prompt so input buffered past the first
/// answer is still there for the next one.
#[derive(Debug)]
pub struct TerminalPrompt {
    stdin: Mutex<BufReader<Stdin>>,
}

impl TerminalPrompt {
    /// Prompt on this process's stderr and stdin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn ask(&self, label: &'static str, message: &str) -> Result<String, PromptError> {
        let mut stderr = tokio::io::stderr();

        stderr.write_all(message.as_bytes()).await?;
        stderr.flush().await?;

        let mut line = Zeroizing::new(String::new());
        let read = self.stdin.lock().await.read_line(&mut *line).await?;

        if read == 0 {
            return Err(PromptError::Closed(label));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn password(&self) -> Result<Zeroizing<String>, PromptError> {
        self.ask("password", "password: ")
            .await
            .map(Zeroizing::new)
    }

    async fn otp(&self) -> Result<String, PromptError> {
        let answer = self
            .ask(
                "one-time password",
                "This operation requires a one-time password.\nEnter OTP: ",
            )
            .await?;

        Ok(answer.trim().to_string())
    }
}
