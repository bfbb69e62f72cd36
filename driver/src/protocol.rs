use anyhow::Result;
use serde::Serialize;
use wordtrie_core::TrieError;

use crate::config::OutputFormat;

/// A single line of session output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputLine<'a> {
    Inserted {
        word: &'a str,
        frequency: u32,
    },
    Completion {
        prefix: &'a str,
        best: Option<&'a str>,
        frequency: Option<u32>,
    },
    Entry {
        word: &'a str,
        frequency: u32,
    },
    Error(ErrorResponse),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCharacter,
}

impl OutputLine<'_> {
    pub fn rejected(word: &str, error: TrieError) -> Self {
        let code = match error {
            TrieError::InvalidCharacter { .. } => ErrorCode::InvalidCharacter,
        };
        OutputLine::Error(ErrorResponse {
            code,
            message: format!("rejected {word:?}: {error}"),
        })
    }

    /// Renders the line without its trailing newline. `None` means the format leaves it out.
    pub fn render(&self, format: OutputFormat) -> Result<Option<String>> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Jsonl => Ok(Some(serde_json::to_string(self)?)),
        }
    }

    fn to_text(&self) -> Option<String> {
        match self {
            OutputLine::Completion {
                prefix,
                best: Some(best),
                ..
            } => Some(format!("Best extension of {prefix} is {best}")),
            OutputLine::Completion { prefix, .. } => Some(format!("No extension of {prefix}")),
            OutputLine::Entry { word, frequency } => Some(format!("{word}, {frequency}")),
            OutputLine::Inserted { .. } | OutputLine::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lines() {
        let best = OutputLine::Completion {
            prefix: "ca",
            best: Some("car"),
            frequency: Some(5),
        };
        let none = OutputLine::Completion {
            prefix: "cx",
            best: None,
            frequency: None,
        };
        let entry = OutputLine::Entry {
            word: "dog",
            frequency: 1,
        };
        assert_eq!(
            best.render(OutputFormat::Text).unwrap().as_deref(),
            Some("Best extension of ca is car")
        );
        assert_eq!(
            none.render(OutputFormat::Text).unwrap().as_deref(),
            Some("No extension of cx")
        );
        assert_eq!(
            entry.render(OutputFormat::Text).unwrap().as_deref(),
            Some("dog, 1")
        );
    }

    #[test]
    fn text_omits_inserts_and_errors() {
        let inserted = OutputLine::Inserted {
            word: "cat",
            frequency: 2,
        };
        let error = OutputLine::rejected(
            "Cat",
            TrieError::InvalidCharacter { ch: 'C', position: 0 },
        );
        assert_eq!(inserted.render(OutputFormat::Text).unwrap(), None);
        assert_eq!(error.render(OutputFormat::Text).unwrap(), None);
    }

    #[test]
    fn jsonl_is_tagged() {
        let line = OutputLine::Completion {
            prefix: "ca",
            best: Some("car"),
            frequency: Some(5),
        };
        let raw = line.render(OutputFormat::Jsonl).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["type"], "completion");
        assert_eq!(value["prefix"], "ca");
        assert_eq!(value["best"], "car");
        assert_eq!(value["frequency"], 5);
    }

    #[test]
    fn jsonl_error_carries_code() {
        let line = OutputLine::rejected(
            "a1",
            TrieError::InvalidCharacter { ch: '1', position: 1 },
        );
        let raw = line.render(OutputFormat::Jsonl).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["code"], "invalid_character");
        assert!(value["message"].as_str().unwrap().contains("'1'"));
    }
}
