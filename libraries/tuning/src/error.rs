use pid::{Axis, GainField, PIDError};
use thiserror::Error;

/// Structural problems in a gain script
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("no gain assignments or return block found")]
    Empty,

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown parameter '{key}', expected <axis>_<kp|ki|kd>")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: '{key}' has an invalid value")]
    InvalidValue { line: usize, key: String },

    #[error("line {line}: '{key}' is assigned more than once")]
    Duplicate { line: usize, key: String },

    #[error("line {line}: '{name}' is a read-only telemetry variable")]
    ReadOnly { line: usize, name: String },

    #[error("line {line}: unexpected '{found}'")]
    UnexpectedDelimiter { line: usize, found: char },

    #[error("line {line}: '{open}' is never closed")]
    Unclosed { line: usize, open: char },

    #[error("missing return block")]
    MissingReturn,
}

/// Why a script did not produce a gain set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("validation error: {0}")]
    Validation(#[from] PIDError),
}

impl CompileError {
    /// Axis named by a validation failure
    pub fn axis(&self) -> Option<Axis> {
        match self {
            CompileError::Validation(PIDError::NonFiniteGain { axis, .. })
            | CompileError::Validation(PIDError::GainOutOfRange { axis, .. }) => Some(*axis),
            _ => None,
        }
    }

    /// Gain named by a validation failure
    pub fn field(&self) -> Option<GainField> {
        match self {
            CompileError::Validation(PIDError::NonFiniteGain { field, .. })
            | CompileError::Validation(PIDError::GainOutOfRange { field, .. }) => Some(*field),
            _ => None,
        }
    }

    /// Source line of a parse failure, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Parse(
                ParseError::Syntax { line, .. }
                | ParseError::UnknownKey { line, .. }
                | ParseError::InvalidValue { line, .. }
                | ParseError::Duplicate { line, .. }
                | ParseError::ReadOnly { line, .. }
                | ParseError::UnexpectedDelimiter { line, .. }
                | ParseError::Unclosed { line, .. },
            ) => Some(*line),
            _ => None,
        }
    }
}
