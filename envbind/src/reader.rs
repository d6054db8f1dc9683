use tracing::{debug, trace};

use crate::{
    BoxError,
    duration::parse_duration,
    env::{Environment, ProcessEnv},
    error::{CannotConvert, EnvError},
    field::{FieldDescriptor, FieldType, ScalarType},
    value::{Resolved, Scalar, Value},
};

/// Reads a value for every descriptor from the process environment.
///
/// See [`read_environment_from`].
pub fn read_environment(fields: &[FieldDescriptor]) -> Result<Vec<Resolved>, EnvError> {
    read_environment_from(fields, &ProcessEnv)
}

/// Reads a value for every descriptor from `env`.
///
/// The result lines up with `fields` one to one. An unset optional variable,
/// or a field without a name, resolves to [`Value::Absent`]. Stops at the first
/// required variable that is unset or the first value that fails to convert.
pub fn read_environment_from<E>(
    fields: &[FieldDescriptor],
    env: &E,
) -> Result<Vec<Resolved>, EnvError>
where
    E: Environment + ?Sized,
{
    let mut values = Vec::with_capacity(fields.len());

    for field in fields {
        let env_var = &field.env_name;
        let raw = if env_var.is_empty() {
            debug!(path = ?field.path, "field has no variable name");
            None
        } else {
            let raw = env.lookup(env_var);
            trace!(env_var = %env_var, set = raw.is_some(), "looked up variable");
            raw
        };

        let value = match raw {
            None if field.required => {
                return Err(EnvError::Missing {
                    env_var: env_var.to_owned(),
                });
            }
            None => Value::Absent,
            Some(raw) => {
                let raw = raw.into_string().map_err(|raw| EnvError::Conversion {
                    env_var: env_var.to_owned(),
                    value: raw.to_string_lossy().into_owned(),
                    error: "value is not valid unicode".into(),
                })?;
                convert(&raw, field.field_type).map_err(|error| EnvError::Conversion {
                    env_var: env_var.to_owned(),
                    value: raw,
                    error,
                })?
            }
        };

        values.push(Resolved {
            path: field.path.clone(),
            value,
        });
    }

    debug!(values = values.len(), "read environment");
    Ok(values)
}

/// Converts a raw variable value into the given field type.
///
/// A sequence is split on `,` and each element converted in turn. The empty
/// string is an empty assignment for a sequence and resolves to
/// [`Value::Absent`], so the field keeps its current contents.
///
/// ```
/// use envbind::{FieldType, Scalar, ScalarType, Value, convert};
///
/// let value = convert("1,2,3", FieldType::Sequence(ScalarType::Uint)).unwrap();
/// assert_eq!(
///     value,
///     Value::Sequence(vec![Scalar::Uint(1), Scalar::Uint(2), Scalar::Uint(3)])
/// );
/// ```
pub fn convert(raw: &str, field_type: FieldType) -> Result<Value, BoxError> {
    match field_type {
        FieldType::Scalar(scalar_type) => convert_scalar(raw, scalar_type).map(Value::Scalar),
        FieldType::Sequence(elem_type) => {
            if raw.is_empty() {
                return Ok(Value::Absent);
            }
            raw.split(',')
                .map(|token| convert_scalar(token, elem_type))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence)
        }
        FieldType::Unsupported(_) => Err(CannotConvert.into()),
    }
}

fn convert_scalar(raw: &str, scalar_type: ScalarType) -> Result<Scalar, BoxError> {
    let scalar = match scalar_type {
        ScalarType::Text => Scalar::Text(raw.to_owned()),
        ScalarType::Int => Scalar::Int(isize::try_from(raw.parse::<i64>()?)?),
        ScalarType::Uint => Scalar::Uint(usize::try_from(raw.parse::<u64>()?)?),
        ScalarType::Float => Scalar::Float(raw.parse::<f64>()?),
        ScalarType::Bool => Scalar::Bool(parse_bool(raw)?),
        ScalarType::Duration => Scalar::Duration(parse_duration(raw)?),
    };
    Ok(scalar)
}

fn parse_bool(raw: &str) -> Result<bool, BoxError> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|s| raw.eq_ignore_ascii_case(s)) {
        Ok(true)
    } else if FALSE.iter().any(|s| raw.eq_ignore_ascii_case(s)) {
        Ok(false)
    } else {
        Err(format!("invalid boolean \"{raw}\"").into())
    }
}
