//! Reading numeric sequences from text.
//!
//! Values are separated by whitespace or commas. A `#` starts a comment
//! that runs to the end of the line.

use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading values.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: '{token}' is not a finite number")]
    NonFinite { line: usize, token: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse every value in `text`, preserving order.
pub fn parse_values(text: &str) -> Result<Vec<f64>, InputError> {
    let mut values = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or("");

        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            values.push(parse_token(token, index + 1)?);
        }
    }

    Ok(values)
}

/// Parse a single command-line value.
pub fn parse_arg(token: &str) -> Result<f64, InputError> {
    parse_token(token.trim(), 1)
}

fn parse_token(token: &str, line: usize) -> Result<f64, InputError> {
    let value: f64 = token.parse().map_err(|_| InputError::InvalidNumber {
        line,
        token: token.to_string(),
    })?;

    if !value.is_finite() {
        return Err(InputError::NonFinite {
            line,
            token: token.to_string(),
        });
    }

    Ok(value)
}

/// Read values from a file, or from stdin when `path` is `-`.
pub fn read_values(path: &Path) -> Result<Vec<f64>, InputError> {
    let shown = path.display().to_string();
    let io_err = |source: std::io::Error| InputError::Io {
        path: shown.clone(),
        source,
    };

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    let values = parse_values(&content)?;
    debug!("Read {} values from {}", values.len(), shown);

    Ok(values)
}
