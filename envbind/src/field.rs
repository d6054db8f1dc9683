use std::fmt;

/// Positional indices locating a leaf inside a (possibly nested) record.
pub type Path = Vec<usize>;

/// The scalar types a leaf, or the elements of a sequence leaf, can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Text,
    Int,
    Uint,
    Float,
    Bool,
    Duration,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Int => "signed integer",
            Self::Uint => "unsigned integer",
            Self::Float => "floating-point",
            Self::Bool => "boolean",
            Self::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Semantic type of a leaf, as classified from its declared Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarType),
    /// Comma-separated sequence of the given element type.
    Sequence(ScalarType),
    /// A type outside the supported set. Holds the Rust type name.
    Unsupported(&'static str),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Sequence(elem) => write!(f, "sequence of {elem}"),
            Self::Unsupported(type_name) => write!(f, "unsupported type `{type_name}`"),
        }
    }
}

/// One bindable leaf of a record, as produced by [`inspect`](crate::inspect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub path: Path,
    pub field_type: FieldType,
    /// Final variable name, including any inherited prefix. Empty when the
    /// field carries no `name`.
    pub env_name: String,
    pub required: bool,
}

impl FieldDescriptor {
    /// Element type of a sequence leaf.
    pub fn elem_type(&self) -> Option<ScalarType> {
        match self.field_type {
            FieldType::Sequence(elem) => Some(elem),
            FieldType::Scalar(_) | FieldType::Unsupported(_) => None,
        }
    }
}

/// Metadata attached to a record field through `#[env(...)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldAttrs {
    pub name: Option<&'static str>,
    pub required: bool,
    pub env_prefix: Option<&'static str>,
}

/// Renders a path as dotted indices, e.g. `3.0`.
pub(crate) struct DisplayPath<'a>(pub &'a [usize]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut indices = self.0.iter();
        if let Some(first) = indices.next() {
            write!(f, "{first}")?;
        }
        for index in indices {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}
