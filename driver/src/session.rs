use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use wordtrie_core::{TrieError, WordTrie};

use crate::command::{Command, CommandReader};
use crate::config::{DriverConfig, InvalidWordPolicy, OutputFormat};
use crate::protocol::OutputLine;

/// Counters reported when a session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub inserted: usize,
    pub queries: usize,
    pub listings: usize,
    pub rejected: usize,
}

/// Drives a [`WordTrie`] from a command stream.
pub struct Session {
    config: DriverConfig,
    trie: WordTrie,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            trie: WordTrie::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn trie(&self) -> &WordTrie {
        &self.trie
    }

    /// Executes commands until `x` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<SessionStats> {
        let mut commands = CommandReader::new(input);
        while let Some(command) = commands.next_command()? {
            debug!(?command, "dispatching command");
            match command {
                Command::Exit => break,
                Command::Add(word) => self.add(&word, &mut output)?,
                Command::Get(word) => self.get(&word, &mut output)?,
                Command::Print => self.print(&mut output)?,
            }
            if self.config.output.flush_per_command {
                output.flush().context("failed to flush output")?;
            }
        }
        output.flush().context("failed to flush output")?;
        Ok(self.stats)
    }

    fn add<W: Write>(&mut self, word: &str, output: &mut W) -> Result<()> {
        match self.trie.insert(word) {
            Ok(frequency) => {
                self.stats.inserted += 1;
                let line = OutputLine::Inserted { word, frequency };
                write_line(output, self.config.output.format, &line)
            }
            Err(error) => self.reject(word, error, output),
        }
    }

    fn get<W: Write>(&mut self, query: &str, output: &mut W) -> Result<()> {
        let completions = match self.trie.completions(query) {
            Ok(completions) => completions,
            Err(error) => return self.reject(query, error, output),
        };
        self.stats.queries += 1;
        for completion in completions {
            let (best, frequency) = match completion.best {
                Ok(best) => (Some(best.word), Some(best.frequency)),
                Err(_) => (None, None),
            };
            let line = OutputLine::Completion {
                prefix: &query[..completion.prefix_len],
                best,
                frequency,
            };
            write_line(output, self.config.output.format, &line)?;
        }
        Ok(())
    }

    fn print<W: Write>(&mut self, output: &mut W) -> Result<()> {
        self.stats.listings += 1;
        for (word, frequency) in self.trie.iter() {
            write_line(
                output,
                self.config.output.format,
                &OutputLine::Entry { word, frequency },
            )?;
        }
        Ok(())
    }

    fn reject<W: Write>(&mut self, word: &str, error: TrieError, output: &mut W) -> Result<()> {
        self.stats.rejected += 1;
        match self.config.input.on_invalid {
            InvalidWordPolicy::Abort => {
                Err(error).with_context(|| format!("rejected word {word:?}"))
            }
            InvalidWordPolicy::Skip => {
                warn!(word, %error, "skipping word");
                write_line(
                    output,
                    self.config.output.format,
                    &OutputLine::rejected(word, error),
                )
            }
        }
    }
}

fn write_line<W: Write>(output: &mut W, format: OutputFormat, line: &OutputLine<'_>) -> Result<()> {
    if let Some(rendered) = line.render(format)? {
        writeln!(output, "{rendered}").context("failed to write output")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::{InputConfig, OutputConfig};

    fn config(format: OutputFormat, on_invalid: InvalidWordPolicy) -> DriverConfig {
        DriverConfig {
            output: OutputConfig {
                format,
                flush_per_command: true,
            },
            input: InputConfig { on_invalid },
        }
    }

    fn run(config: DriverConfig, input: &str) -> (Result<SessionStats>, String) {
        let mut session = Session::new(config);
        let mut output = Vec::new();
        let result = session.run(Cursor::new(input), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    fn run_text(input: &str) -> String {
        let (result, output) = run(DriverConfig::default(), input);
        result.unwrap();
        output
    }

    #[test]
    fn reference_scenario_in_text() {
        let input = "a cat a cat a cat\n\
                     a car a car a car a car a car\n\
                     a dog\n\
                     g ca\n\
                     g cat\n\
                     p\n\
                     x\n";
        let expected = "Best extension of c is car\n\
                        Best extension of ca is car\n\
                        Best extension of c is car\n\
                        Best extension of ca is car\n\
                        Best extension of cat is cat\n\
                        car, 5\n\
                        cat, 3\n\
                        dog, 1\n";
        assert_eq!(run_text(input), expected);
    }

    #[test]
    fn missing_prefix_reports_every_longer_prefix() {
        let output = run_text("a cat g cow");
        assert_eq!(
            output,
            "Best extension of c is cat\nNo extension of co\nNo extension of cow\n"
        );
    }

    #[test]
    fn input_after_exit_is_ignored() {
        let output = run_text("a dog x a cat p");
        assert_eq!(output, "");
    }

    #[test]
    fn invalid_word_is_skipped_by_default() {
        let (result, output) = run(DriverConfig::default(), "a Dog a dog g d0 p");
        let stats = result.unwrap();
        assert_eq!(output, "dog, 1\n");
        assert_eq!(
            stats,
            SessionStats {
                inserted: 1,
                queries: 0,
                listings: 1,
                rejected: 2,
            }
        );
    }

    #[test]
    fn non_utf8_word_is_skipped_and_session_continues() {
        let mut session = Session::new(DriverConfig::default());
        let mut output = Vec::new();
        let stats = session
            .run(Cursor::new(b"a dog\na caf\xe9 a cat\np\n".to_vec()), &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "cat, 1\ndog, 1\n");
        assert_eq!(session.trie().frequency("cat").unwrap(), 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.inserted, 2);
    }

    #[test]
    fn invalid_word_aborts_when_configured() {
        let config = config(OutputFormat::Text, InvalidWordPolicy::Abort);
        let (result, output) = run(config, "a dog a Dog p");
        let error = result.unwrap_err();
        assert!(format!("{error:#}").contains("\"Dog\""));
        assert!(error.downcast_ref::<TrieError>().is_some());
        assert_eq!(output, "");
    }

    #[test]
    fn jsonl_session() {
        let config = config(OutputFormat::Jsonl, InvalidWordPolicy::Skip);
        let (result, output) = run(config, "a a a a a ab g ab a B p");
        result.unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        let types: Vec<&str> = lines.iter().map(|l| l["type"].as_str().unwrap()).collect();
        assert_eq!(
            types,
            vec![
                "inserted",
                "inserted",
                "inserted",
                "completion",
                "completion",
                "error",
                "entry",
                "entry"
            ]
        );
        assert_eq!(lines[1]["frequency"], 2);
        assert_eq!(lines[3]["prefix"], "a");
        assert_eq!(lines[3]["best"], "a");
        assert_eq!(lines[4]["best"], "ab");
        assert_eq!(lines[4]["frequency"], 1);
        assert_eq!(lines[6]["word"], "a");
        assert_eq!(lines[7]["word"], "ab");
    }

    #[test]
    fn jsonl_reports_missing_extension_as_null() {
        let config = config(OutputFormat::Jsonl, InvalidWordPolicy::Skip);
        let (result, output) = run(config, "g q");
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
        assert!(value["best"].is_null());
        assert!(value["frequency"].is_null());
    }

    #[test]
    fn trie_survives_the_session() {
        let mut session = Session::new(DriverConfig::default());
        session
            .run(Cursor::new("a sun a sun a sea"), Vec::new())
            .unwrap();
        assert_eq!(session.trie().frequency("sun").unwrap(), 2);
        assert_eq!(session.trie().len(), 2);
    }
}
