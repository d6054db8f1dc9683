use std::time::Duration;

use crate::{
    field::{FieldDescriptor, FieldType, ScalarType},
    value::{Scalar, Value},
};

/// A struct whose fields can be bound from the environment.
///
/// Implemented through `#[derive(Record)]`; the generated code describes each
/// field in declaration order and hands out positional mutable access to it.
pub trait Record {
    /// Appends a descriptor for every leaf reachable from `Self`, depth first.
    ///
    /// `path` locates `Self` inside the outermost record and `prefix` is
    /// prepended to every variable name in the subtree.
    fn inspect_fields(path: &[usize], prefix: &str, fields: &mut Vec<FieldDescriptor>)
    where
        Self: Sized;

    /// Mutable access to the field declared at `index`.
    fn field_mut(&mut self, index: usize) -> Option<Slot<'_>>;
}

/// Mutable handle to one field of a [`Record`].
pub enum Slot<'a> {
    Record(&'a mut dyn Record),
    Leaf(&'a mut dyn Leaf),
    /// A field whose type can be neither descended into nor assigned.
    Opaque,
}

/// A field type that can receive a converted [`Value`].
pub trait Leaf {
    fn field_type() -> FieldType
    where
        Self: Sized;

    /// Stores `value`, or hands it back untouched if it does not fit.
    fn assign(&mut self, value: Value) -> Result<(), Value>;
}

/// A scalar type usable on its own or as the element of a `Vec` leaf.
pub trait Element: Sized {
    const SCALAR_TYPE: ScalarType;

    fn from_scalar(scalar: Scalar) -> Result<Self, Scalar>;
}

macro_rules! impl_scalar_leaf {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const SCALAR_TYPE: ScalarType = ScalarType::$variant;

                fn from_scalar(scalar: Scalar) -> Result<Self, Scalar> {
                    match scalar {
                        Scalar::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl Leaf for $ty {
                fn field_type() -> FieldType {
                    FieldType::Scalar(<Self as Element>::SCALAR_TYPE)
                }

                fn assign(&mut self, value: Value) -> Result<(), Value> {
                    let Value::Scalar(scalar) = value else {
                        return Err(value);
                    };
                    *self = <Self as Element>::from_scalar(scalar).map_err(Value::Scalar)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_scalar_leaf! {
    String => Text,
    isize => Int,
    usize => Uint,
    f64 => Float,
    bool => Bool,
    Duration => Duration,
}

impl<T: Element> Leaf for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::Sequence(T::SCALAR_TYPE)
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        let Value::Sequence(elems) = value else {
            return Err(value);
        };
        if elems.iter().any(|elem| elem.scalar_type() != T::SCALAR_TYPE) {
            return Err(Value::Sequence(elems));
        }
        *self = elems
            .into_iter()
            .filter_map(|elem| T::from_scalar(elem).ok())
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_leaf_rejects_other_scalars() {
        let mut port = 0usize;
        let value = Value::Scalar(Scalar::Int(-1));

        assert_eq!(port.assign(value.clone()), Err(value));
        assert_eq!(port, 0);
    }

    #[test]
    fn sequence_leaf_replaces_contents() {
        let mut topics = vec!["old".to_owned()];
        let value = Value::Sequence(vec![
            Scalar::Text("a".into()),
            Scalar::Text("b".into()),
        ]);

        topics.assign(value).unwrap();

        assert_eq!(topics, ["a", "b"]);
    }

    #[test]
    fn sequence_leaf_rejects_mixed_elements() {
        let mut flags = vec![true];
        let value = Value::Sequence(vec![Scalar::Bool(false), Scalar::Uint(1)]);

        assert!(flags.assign(value).is_err());
        assert_eq!(flags, [true]);
    }

    #[test]
    fn field_types() {
        assert_eq!(
            <Duration as Leaf>::field_type(),
            FieldType::Scalar(ScalarType::Duration)
        );
        assert_eq!(
            <Vec<f64> as Leaf>::field_type(),
            FieldType::Sequence(ScalarType::Float)
        );
    }
}
