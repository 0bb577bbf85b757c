//! User interaction capability.
//!
//! The removal flow asks questions only through [`InteractionPort`]. The
//! terminal implementation reads plain line input; it never decides anything
//! on the user's behalf.

use crate::error::InteractionError;
use crate::types::AssociatedItem;
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

pub trait InteractionPort {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, prompt: &str) -> bool;

    /// Pick one of `options`. Returns whatever the user answered, which may not
    /// be one of the options; fails with `Cancelled` if the user backs out.
    fn choose_one(&self, prompt: &str, options: &[String]) -> Result<String, InteractionError>;

    /// Pick any subset of `items`, possibly none.
    fn choose_many(&self, prompt: &str, items: &[AssociatedItem]) -> Vec<AssociatedItem>;
}

/// Line-based prompts on a terminal.
pub struct TerminalPrompt<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl TerminalPrompt<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Write `text` (no newline), flush, and read one trimmed line.
    /// `None` on end of input.
    fn ask(&self, text: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.output.borrow_mut();
            write!(out, "{}", text)?;
            out.flush()?;
        }
        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&self, text: &str) -> io::Result<()> {
        writeln!(self.output.borrow_mut(), "{}", text)
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

impl<R: BufRead, W: Write> InteractionPort for TerminalPrompt<R, W> {
    fn confirm(&self, prompt: &str) -> bool {
        match self.ask(&format!("{} [y/N]: ", prompt)) {
            Ok(Some(answer)) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                log::warn!("failed to read confirmation: {}", err);
                false
            }
        }
    }

    fn choose_one(&self, prompt: &str, options: &[String]) -> Result<String, InteractionError> {
        self.say(prompt)?;
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {}", i + 1, option))?;
        }

        let answer = match self.ask("Enter a number: ")? {
            Some(answer) if !answer.is_empty() => answer,
            _ => return Err(InteractionError::Cancelled),
        };

        match answer.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => Ok(options[n - 1].clone()),
            _ => Ok(answer),
        }
    }

    fn choose_many(&self, prompt: &str, items: &[AssociatedItem]) -> Vec<AssociatedItem> {
        let listing = || -> io::Result<Option<String>> {
            self.say(prompt)?;
            for (i, item) in items.iter().enumerate() {
                let size = item
                    .size_human()
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default();
                self.say(&format!("  {}) {}{} [{}]", i + 1, item.name, size, item.location))?;
            }
            self.ask("Numbers separated by spaces or commas, 'all', or empty for none: ")
        };

        let answer = match listing() {
            Ok(Some(answer)) => answer,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("failed to read selection: {}", err);
                return Vec::new();
            }
        };

        parse_selection(&answer, items.len())
            .into_iter()
            .map(|i| items[i].clone())
            .collect()
    }
}

/// Turn `"1, 3 4"` or `"all"` into sorted, unique zero-based indices.
/// Tokens that are not valid item numbers are ignored.
fn parse_selection(answer: &str, len: usize) -> Vec<usize> {
    if answer.eq_ignore_ascii_case("all") {
        return (0..len).collect();
    }

    let mut picked: Vec<usize> = answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|n| *n >= 1 && *n <= len)
        .map(|n| n - 1)
        .collect();
    picked.sort_unstable();
    picked.dedup();
    picked
}
