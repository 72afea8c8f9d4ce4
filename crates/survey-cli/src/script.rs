//! Session scripts: one session command per line.
//!
//! Blank lines and lines starting with `#` are skipped. Line numbers are kept
//! so errors and step reports point back at the source.

use survey_analysis::{AnalysisError, SessionCommand};
use thiserror::Error;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the source.
    pub line: usize,
    /// The trimmed source text.
    pub text: String,
    pub command: SessionCommand,
}

/// A script line that is not a valid session command.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    pub source: AnalysisError,
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                return None;
            }
            let line = index + 1;
            Some(
                text.parse::<SessionCommand>()
                    .map(|command| ScriptLine {
                        line,
                        text: text.to_string(),
                        command,
                    })
                    .map_err(|source| ScriptError { line, source }),
            )
        })
        .collect()
}
