use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use tracing::debug;

use crate::error::{AppError, Result};

const QUIT_KEY: &str = "q";
const QUIT_TOKENS: [&str; 2] = ["q", "quit"];

/// One selectable entry of a menu, carrying the value it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<T> {
    pub key: String,
    pub label: String,
    pub value: T,
}

impl<T> MenuOption<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
        }
    }
}

/// Line-based terminal dialogue: menus, free-text questions and status lines.
///
/// Generic over its reader and writer so the whole program can be driven
/// from in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Render `options` under `title` and block until a valid key or the
    /// quit token is entered. Returns `None` on quit.
    pub fn menu<'a, T>(
        &mut self,
        title: &str,
        options: &'a [MenuOption<T>],
    ) -> Result<Option<&'a MenuOption<T>>> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", title.bold())?;
        for option in options {
            writeln!(self.output, "[{}] {}", option.key, option.label)?;
        }
        writeln!(self.output, "[{}] Quit/back", QUIT_KEY)?;

        loop {
            let choice = self.read_line("> ")?.to_lowercase();
            if QUIT_TOKENS.contains(&choice.as_str()) {
                debug!(title, "menu dismissed");
                return Ok(None);
            }
            if let Some(option) = options.iter().find(|o| o.key.to_lowercase() == choice) {
                debug!(title, key = %option.key, "menu selection");
                return Ok(Some(option));
            }
            self.warn("Invalid option, please try again.")?;
        }
    }

    /// Ask a free-text question; the answer comes back trimmed.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.read_line(question)
    }

    /// Ask a yes/no question that defaults to no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{} (y/N): ", question))?.to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    pub fn success(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref().green())?;
        Ok(())
    }

    pub fn warn(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref().yellow())?;
        Ok(())
    }

    /// Report a failed operation: a generic message, then the underlying detail.
    pub fn failure(&mut self, message: impl AsRef<str>, err: &AppError) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref().red())?;
        writeln!(self.output, "{}", err.detail())?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::Interrupted);
        }
        Ok(line.trim().to_string())
    }
}
