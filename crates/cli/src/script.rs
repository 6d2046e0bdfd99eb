//! Replay script format.
//!
//! One step per line; blank lines and `#` comments are skipped. An argument
//! wrapped in double quotes keeps its surrounding whitespace (`type " a "`).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace the input value (a change event).
    Type(String),
    /// Key-down with the given key name.
    Key(String),
    /// Key-down with the configured confirm key.
    Enter,
    /// Click on the clear affordance.
    Clear,
    /// The caller's authoritative text changed.
    External(String),
    /// The caller started or finished fetching.
    Fetching(bool),
    /// Let virtual time pass.
    Wait(u64),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

fn unquote(arg: &str) -> &str {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

/// Parse a script into `(line number, step)` pairs.
pub fn parse_script(src: &str) -> Result<Vec<(usize, Step)>, ScriptError> {
    let mut steps = Vec::new();

    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (command, arg) = match trimmed.split_once(' ') {
            Some((c, a)) => (c, unquote(a.trim_end_matches('\r'))),
            None => (trimmed.trim_end(), ""),
        };
        let err = |message: String| ScriptError { line, message };

        let step = match command {
            "type" => Step::Type(arg.to_string()),
            "key" if !arg.is_empty() => Step::Key(arg.to_string()),
            "key" => return Err(err("'key' needs a key name".into())),
            "enter" => Step::Enter,
            "clear" => Step::Clear,
            "external" => Step::External(arg.to_string()),
            "fetching" => match arg.trim() {
                "on" | "true" => Step::Fetching(true),
                "off" | "false" => Step::Fetching(false),
                other => return Err(err(format!("'fetching' expects on/off, got '{other}'"))),
            },
            "wait" => {
                let ms = arg
                    .trim()
                    .trim_end_matches("ms")
                    .parse::<u64>()
                    .map_err(|e| err(format!("invalid wait '{arg}': {e}")))?;
                Step::Wait(ms)
            }
            other => return Err(err(format!("unknown command '{other}'"))),
        };
        steps.push((line, step));
    }

    Ok(steps)
}
