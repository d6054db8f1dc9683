use tracing::debug;

use crate::{
    field::{FieldAttrs, FieldDescriptor, FieldType},
    record::Record,
};

/// Describes every leaf of `R` in depth-first, declaration order.
pub fn inspect<R: Record>() -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    R::inspect_fields(&[], "", &mut fields);
    debug!(
        record = std::any::type_name::<R>(),
        fields = fields.len(),
        "inspected record"
    );
    fields
}

/// Descends into the nested record declared at `index`.
///
/// The field's `env_prefix` is appended to the inherited one, so prefixes
/// accumulate along the path.
pub(crate) fn inspect_nested<R: Record>(
    path: &[usize],
    index: usize,
    prefix: &str,
    attrs: FieldAttrs,
    fields: &mut Vec<FieldDescriptor>,
) {
    let path = child_path(path, index);
    let prefix = format!("{prefix}{}", attrs.env_prefix.unwrap_or_default());
    R::inspect_fields(&path, &prefix, fields);
}

/// Emits the descriptor for the leaf declared at `index`.
pub(crate) fn describe_leaf(
    path: &[usize],
    index: usize,
    prefix: &str,
    attrs: FieldAttrs,
    field_type: FieldType,
    fields: &mut Vec<FieldDescriptor>,
) {
    let env_name = match attrs.name {
        Some(name) => format!("{prefix}{name}"),
        None => String::new(),
    };
    fields.push(FieldDescriptor {
        path: child_path(path, index),
        field_type,
        env_name,
        required: attrs.required,
    });
}

fn child_path(path: &[usize], index: usize) -> Vec<usize> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(index);
    child
}
