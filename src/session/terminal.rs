//! `Prompt` implementation for an interactive terminal

use crate::session::prompt::{InputClosed, Prompt, PromptResult};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Terminal prompts backed by dialoguer, colored, and indicatif
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

/// Any prompt failure means the terminal is gone
fn closed(e: dialoguer::Error) -> InputClosed {
    tracing::debug!("Prompt ended: {}", e);
    InputClosed
}

impl Prompt for TerminalPrompt {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> PromptResult<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(closed)
    }

    fn input(&self, prompt: &str, default: &str) -> PromptResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(closed)
    }

    fn secret(&self, prompt: &str) -> PromptResult<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(closed)
    }

    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(closed)
    }

    fn pause(&self) -> PromptResult<()> {
        print!("\n{}", "Press Enter to continue...".dimmed());
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Err(InputClosed),
            Ok(_) => Ok(()),
        }
    }

    fn heading(&self, text: &str) {
        println!();
        println!("{}", text.green().bold());
    }

    fn info(&self, text: &str) {
        println!("{}", text.cyan());
    }

    fn success(&self, text: &str) {
        println!("{}", text.green());
    }

    fn warn(&self, text: &str) {
        println!("{}", text.yellow());
    }

    fn error(&self, text: &str) {
        eprintln!("{} {}", "Error:".red().bold(), text);
    }

    fn panel(&self, title: &str, body: &str) {
        let rule = "─".repeat(60);
        println!("{}", rule.dimmed());
        println!("{}", title.bold());
        println!("{}", rule.dimmed());
        println!("{}", body);
        println!("{}", rule.dimmed());
    }

    fn table(&self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let pad = |text: &str, width: usize| {
            let len = text.chars().count();
            format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
        };

        println!();
        println!("{}", title.bold());
        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect();
        println!("{}", header_line.join("  ").cyan());
        for row in rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| pad(c, *w))
                .collect();
            println!("{}", line.join("  "));
        }
    }

    fn progress(&self, label: &str, total: Option<u64>) -> ProgressBar {
        let bar = match total {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner:.cyan} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}
