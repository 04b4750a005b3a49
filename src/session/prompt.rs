//! Interface to the interactive terminal
//!
//! The session controller only talks to the operator through `Prompt`, so
//! the terminal can be swapped for a scripted one.

use indicatif::ProgressBar;

/// The operator's input stream ended; the session should stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

pub type PromptResult<T> = Result<T, InputClosed>;

/// Operator-facing input and output
pub trait Prompt {
    /// Picks one of `items`, returning its index
    fn select(&self, prompt: &str, items: &[String], default: usize) -> PromptResult<usize>;

    /// Reads a line of text; an empty answer yields `default`
    fn input(&self, prompt: &str, default: &str) -> PromptResult<String>;

    /// Reads a line without echoing it
    fn secret(&self, prompt: &str) -> PromptResult<String>;

    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<bool>;

    /// Waits for the operator to acknowledge the output
    fn pause(&self) -> PromptResult<()>;

    fn heading(&self, text: &str);
    fn info(&self, text: &str);
    fn success(&self, text: &str);
    fn warn(&self, text: &str);
    fn error(&self, text: &str);

    /// Shows a block of content under a title
    fn panel(&self, title: &str, body: &str);

    fn table(&self, title: &str, headers: &[&str], rows: &[Vec<String>]);

    /// Starts a spinner (`total == None`) or a bounded progress bar
    fn progress(&self, label: &str, total: Option<u64>) -> ProgressBar;
}
