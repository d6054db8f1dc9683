use std::{error::Error as StdError, fmt};

use super::BoxError;
use crate::field::{DisplayPath, Path};

#[derive(Debug)]
pub enum EnvError {
    /// A path step expected a nested record but found a leaf.
    NotARecord {
        path: Path,
    },
    /// A path step pointed past the fields of a record.
    NoSuchField {
        path: Path,
    },
    Missing {
        env_var: String,
    },
    Conversion {
        env_var: String,
        value: String,
        error: BoxError,
    },
    /// A resolved value did not fit the leaf its path located.
    Mismatch {
        path: Path,
    },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotARecord { path } => {
                write!(f, "Field at `{}` is not a record", DisplayPath(path))
            }
            Self::NoSuchField { path } => {
                write!(f, "No field at `{}`", DisplayPath(path))
            }
            Self::Missing { env_var } => {
                write!(f, "Missing required environment variable '{env_var}'")
            }
            Self::Conversion {
                env_var,
                value,
                error,
            } => {
                write!(f, "Failed to parse '{env_var}'=\"{value}\": {error}")
            }
            Self::Mismatch { path } => {
                write!(
                    f,
                    "Value does not match the type of the field at `{}`",
                    DisplayPath(path)
                )
            }
        }
    }
}

impl StdError for EnvError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Conversion { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// The converter was asked for a type outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannotConvert;

impl fmt::Display for CannotConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot convert")
    }
}

impl StdError for CannotConvert {}

/// Pipeline stage that produced a [`BindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Read => "read environment",
            Self::Write => "write values",
        };
        f.write_str(stage)
    }
}

/// Error returned from [`bind`](crate::bind).
///
/// Wraps the first [`EnvError`] hit by the pipeline together with the stage
/// it came from:
///
/// ```text
/// read environment: Failed to parse 'PORT'="eighty": invalid digit found in string
/// ```
#[derive(Debug)]
pub struct BindError {
    stage: Stage,
    error: EnvError,
}

impl BindError {
    pub(crate) fn new(stage: Stage, error: EnvError) -> Self {
        Self { stage, error }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn error(&self) -> &EnvError {
        &self.error
    }

    pub fn into_error(self) -> EnvError {
        self.error
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.error)
    }
}

impl StdError for BindError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}
