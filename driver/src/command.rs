use std::collections::VecDeque;
use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::debug;

/// One request read from the command stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `a <word>`
    Add(String),
    /// `g <word>`
    Get(String),
    /// `p`
    Print,
    /// `x`
    Exit,
}

/// Splits an input stream into whitespace-delimited tokens and groups them into commands.
///
/// Lines are read lazily so an interactive session gets answers as soon as a command is complete.
/// Input is taken as raw bytes; a token that is not valid UTF-8 is passed on lossily so the trie
/// rejects that word alone.
pub struct CommandReader<R> {
    input: R,
    pending: VecDeque<String>,
    line: Vec<u8>,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            line: Vec::new(),
        }
    }

    /// Next complete command, or `None` once the input is exhausted.
    ///
    /// Unknown tokens are skipped. A command whose argument is cut off by the end of input ends
    /// the stream.
    pub fn next_command(&mut self) -> Result<Option<Command>> {
        while let Some(token) = self.next_token()? {
            let command = match token.as_str() {
                "a" => self.next_token()?.map(Command::Add),
                "g" => self.next_token()?.map(Command::Get),
                "p" => Some(Command::Print),
                "x" => Some(Command::Exit),
                other => {
                    debug!(token = other, "ignoring unknown command");
                    continue;
                }
            };
            return Ok(command);
        }
        Ok(None)
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            let read = self
                .input
                .read_until(b'\n', &mut self.line)
                .context("failed to read command input")?;
            if read == 0 {
                return Ok(None);
            }
            self.pending.extend(
                self.line
                    .split(u8::is_ascii_whitespace)
                    .filter(|token| !token.is_empty())
                    .map(|token| String::from_utf8_lossy(token).into_owned()),
            );
        }
    }
}
