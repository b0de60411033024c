//! # Interactive Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! Line-oriented prompts over any `BufRead`/`Write` pair. The CLI wires them to
//! stdin/stdout; tests feed scripted input from a byte slice.
//!
//! End of input is reported as `None` (or `false` for confirmations) so
//! callers can unwind their menus cleanly when stdin closes.
//!
use std::io::{self, BufRead, Write};

/// Prompts over an input/output pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wraps `input` and `output`.
    ///
    /// # Arguments
    ///
    /// * `input` - Answers are read from here one line at a time.
    /// * `output` - Questions and messages are written here (stdout for the
    ///   menu, stderr for `projgit token`).
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` verbatim.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Writes `text` followed by a newline.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Asks a question and returns the trimmed answer, or `None` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.say(question)?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            self.line("")?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Like `ask`, but repeats until the answer is non-empty.
    pub fn ask_required(&mut self, question: &str) -> io::Result<Option<String>> {
        loop {
            match self.ask(question)? {
                Some(answer) if answer.is_empty() => self.line("A value is required.")?,
                other => return Ok(other),
            }
        }
    }

    /// Asks with a default used when the answer is empty.
    pub fn ask_with_default(&mut self, question: &str, default: &str) -> io::Result<Option<String>> {
        let answer = self.ask(&format!("{} [{}]: ", question, default))?;
        Ok(answer.map(|a| if a.is_empty() { default.to_string() } else { a }))
    }

    /// Shows a numbered list and returns the chosen index.
    ///
    /// An empty answer or end of input returns `None`.
    pub fn choose(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>> {
        self.line(title)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option)?;
        }
        loop {
            let Some(answer) = self.ask("Enter the number (empty to go back): ")? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => self.line(&format!(
                    "Invalid selection '{}'. Enter a number between 1 and {}.",
                    answer,
                    options.len()
                ))?,
            }
        }
    }

    /// Yes/no question, defaulting to no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} [y/N]: ", question))?;
        Ok(matches!(
            answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    /// Waits for Enter. End of input also returns.
    pub fn pause(&mut self) -> io::Result<()> {
        self.ask("\nPress Enter to continue...").map(|_| ())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
