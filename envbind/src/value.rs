use std::time::Duration;

use crate::field::{Path, ScalarType};

/// A converted scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(isize),
    Uint(usize),
    Float(f64),
    Bool(bool),
    Duration(Duration),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::Text(_) => ScalarType::Text,
            Self::Int(_) => ScalarType::Int,
            Self::Uint(_) => ScalarType::Uint,
            Self::Float(_) => ScalarType::Float,
            Self::Bool(_) => ScalarType::Bool,
            Self::Duration(_) => ScalarType::Duration,
        }
    }
}

/// Payload of a resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nothing to assign; the field keeps whatever it held.
    Absent,
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// A field's path paired with the value read for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub path: Path,
    pub value: Value,
}
