use tracing::debug;

use crate::{
    error::EnvError,
    record::{Leaf, Record, Slot},
    value::Resolved,
};

/// Assigns every resolved value to the leaf its path locates inside `record`.
///
/// [`Value::Absent`](crate::Value::Absent) entries are skipped, leaving those leaves as they were.
pub fn write_values<R: Record>(record: &mut R, values: Vec<Resolved>) -> Result<(), EnvError> {
    let mut written = 0;

    for Resolved { path, value } in values {
        if value.is_absent() {
            continue;
        }
        let leaf = locate(record, &path)?;
        leaf.assign(value).map_err(|_| EnvError::Mismatch { path })?;
        written += 1;
    }

    debug!(written, "wrote values");
    Ok(())
}

/// Walks `path` one field at a time down to a leaf.
fn locate<'a>(record: &'a mut dyn Record, path: &[usize]) -> Result<&'a mut dyn Leaf, EnvError> {
    let Some((&last, parents)) = path.split_last() else {
        return Err(EnvError::NoSuchField { path: Vec::new() });
    };

    let mut current = record;
    for (depth, &index) in parents.iter().enumerate() {
        current = match current.field_mut(index) {
            Some(Slot::Record(nested)) => nested,
            Some(Slot::Leaf(_) | Slot::Opaque) => {
                return Err(EnvError::NotARecord {
                    path: path[..=depth].to_vec(),
                });
            }
            None => {
                return Err(EnvError::NoSuchField {
                    path: path[..=depth].to_vec(),
                });
            }
        };
    }

    match current.field_mut(last) {
        Some(Slot::Leaf(leaf)) => Ok(leaf),
        Some(Slot::Record(_) | Slot::Opaque) => Err(EnvError::Mismatch {
            path: path.to_vec(),
        }),
        None => Err(EnvError::NoSuchField {
            path: path.to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        field::FieldDescriptor,
        value::{Scalar, Value},
    };

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        timeout: Duration,
    }

    impl Record for Inner {
        fn inspect_fields(_: &[usize], _: &str, _: &mut Vec<FieldDescriptor>) {}

        fn field_mut(&mut self, index: usize) -> Option<Slot<'_>> {
            match index {
                0 => Some(Slot::Leaf(&mut self.timeout)),
                _ => None,
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        verbose: bool,
        port: isize,
        hosts: Vec<String>,
        inner: Inner,
    }

    impl Record for Outer {
        fn inspect_fields(_: &[usize], _: &str, _: &mut Vec<FieldDescriptor>) {}

        fn field_mut(&mut self, index: usize) -> Option<Slot<'_>> {
            match index {
                0 => Some(Slot::Leaf(&mut self.verbose)),
                1 => Some(Slot::Leaf(&mut self.port)),
                2 => Some(Slot::Leaf(&mut self.hosts)),
                3 => Some(Slot::Record(&mut self.inner)),
                _ => None,
            }
        }
    }

    fn resolved(path: &[usize], value: Value) -> Resolved {
        Resolved {
            path: path.to_vec(),
            value,
        }
    }

    #[test]
    fn writes_along_paths() {
        let mut outer = Outer::default();
        let values = vec![
            resolved(&[0], Value::Scalar(Scalar::Bool(true))),
            resolved(&[1], Value::Scalar(Scalar::Int(5))),
            resolved(
                &[2],
                Value::Sequence(vec![Scalar::Text("a".into()), Scalar::Text("b".into())]),
            ),
            resolved(&[3, 0], Value::Scalar(Scalar::Duration(Duration::from_secs(15)))),
        ];

        write_values(&mut outer, values).unwrap();

        let expected = Outer {
            verbose: true,
            port: 5,
            hosts: vec!["a".into(), "b".into()],
            inner: Inner {
                timeout: Duration::from_secs(15),
            },
        };
        assert_eq!(outer, expected);
    }

    #[test]
    fn absent_values_leave_fields_alone() {
        let mut outer = Outer {
            port: 8080,
            ..Outer::default()
        };
        let values = vec![
            resolved(&[1], Value::Absent),
            resolved(&[3, 0], Value::Absent),
        ];

        write_values(&mut outer, values).unwrap();

        assert_eq!(outer.port, 8080);
        assert_eq!(outer.inner, Inner::default());
    }

    #[test]
    fn path_through_a_leaf_is_not_a_record() {
        let mut outer = Outer::default();
        let values = vec![resolved(&[1, 0], Value::Scalar(Scalar::Int(1)))];

        let err = write_values(&mut outer, values).unwrap_err();

        assert!(matches!(err, EnvError::NotARecord { path } if path == [1]));
    }

    #[test]
    fn path_past_the_last_field() {
        let mut outer = Outer::default();
        let values = vec![resolved(&[3, 4], Value::Scalar(Scalar::Int(1)))];

        let err = write_values(&mut outer, values).unwrap_err();

        assert!(matches!(err, EnvError::NoSuchField { path } if path == [3, 4]));
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let mut outer = Outer::default();
        let values = vec![resolved(&[0], Value::Scalar(Scalar::Text("yes".into())))];

        let err = write_values(&mut outer, values).unwrap_err();

        assert!(matches!(err, EnvError::Mismatch { path } if path == [0]));
        assert!(!outer.verbose);
    }
}
