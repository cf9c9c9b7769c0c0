//! Custom errors of the configuration checker.

use std::error;
use std::fmt;
use std::io;
use std::num::ParseIntError;

/// Errors that can occur while a configuration file is imported.
#[derive(Debug)]
pub enum ImportError {
    IoError(io::Error),
    ParseError(ParseIntError),
    InputMalformedError,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImportError::IoError(err) => write!(f, "io error: {}", err),
            ImportError::ParseError(err) => write!(f, "parse error: {}", err),
            ImportError::InputMalformedError => write!(f, "configuration file is malformed"),
        }
    }
}

impl error::Error for ImportError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ImportError::IoError(err) => Some(err),
            ImportError::ParseError(err) => Some(err),
            ImportError::InputMalformedError => None,
        }
    }
}

impl From<io::Error> for ImportError {
    fn from(err: io::Error) -> Self {
        ImportError::IoError(err)
    }
}

impl From<ParseIntError> for ImportError {
    fn from(err: ParseIntError) -> Self {
        ImportError::ParseError(err)
    }
}

/// Errors that can occur while the checker is processing a configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProcessingError {
    InvalidParameter(String),
    InvalidEdgeId(usize),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessingError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            ProcessingError::InvalidEdgeId(id) => write!(f, "no edge carries the dual id {}", id),
        }
    }
}

impl error::Error for ProcessingError {}
