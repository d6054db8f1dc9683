//! Internal traits and types used by the derive macro.
//!
//! These are not meant to be used directly by users of the library.
//!
//! The derive cannot tell from a field's tokens whether its type is a nested
//! record, a supported leaf or something else, so it calls the probes below
//! through autoref specialization: `(&&&Probe::<T>::new()).inspect_field(..)`
//! resolves to [`InspectRecord`] when `T: Record`, to [`InspectLeaf`] when
//! `T: Leaf`, and to [`InspectOpaque`] otherwise. [`SlotProbe`] does the same
//! for mutable access.
use std::{cell::Cell, marker::PhantomData};

pub use crate::field::{FieldAttrs, FieldDescriptor, FieldType};
pub use crate::record::{Leaf, Record, Slot};
use crate::inspector::{describe_leaf, inspect_nested};

pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Probe<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait InspectRecord {
    fn inspect_field(
        &self,
        path: &[usize],
        index: usize,
        prefix: &str,
        attrs: FieldAttrs,
        fields: &mut Vec<FieldDescriptor>,
    );
}

impl<T: Record> InspectRecord for &&Probe<T> {
    fn inspect_field(
        &self,
        path: &[usize],
        index: usize,
        prefix: &str,
        attrs: FieldAttrs,
        fields: &mut Vec<FieldDescriptor>,
    ) {
        inspect_nested::<T>(path, index, prefix, attrs, fields);
    }
}

pub trait InspectLeaf {
    fn inspect_field(
        &self,
        path: &[usize],
        index: usize,
        prefix: &str,
        attrs: FieldAttrs,
        fields: &mut Vec<FieldDescriptor>,
    );
}

impl<T: Leaf> InspectLeaf for &Probe<T> {
    fn inspect_field(
        &self,
        path: &[usize],
        index: usize,
        prefix: &str,
        attrs: FieldAttrs,
        fields: &mut Vec<FieldDescriptor>,
    ) {
        describe_leaf(path, index, prefix, attrs, T::field_type(), fields);
    }
}

pub trait InspectOpaque {
    fn inspect_field(
        &self,
        path: &[usize],
        index: usize,
        prefix: &str,
        attrs: FieldAttrs,
        fields: &mut Vec<FieldDescriptor>,
    );
}

impl<T> InspectOpaque for Probe<T> {
    fn inspect_field(
        &self,
        path: &[usize],
        index: usize,
        prefix: &str,
        attrs: FieldAttrs,
        fields: &mut Vec<FieldDescriptor>,
    ) {
        let field_type = FieldType::Unsupported(std::any::type_name::<T>());
        describe_leaf(path, index, prefix, attrs, field_type, fields);
    }
}

pub struct SlotProbe<'a, T>(Cell<Option<&'a mut T>>);

impl<'a, T> SlotProbe<'a, T> {
    pub fn new(field: &'a mut T) -> Self {
        Self(Cell::new(Some(field)))
    }
}

pub trait SlotRecord<'a> {
    fn slot(&self) -> Slot<'a>;
}

impl<'a, T: Record> SlotRecord<'a> for &&SlotProbe<'a, T> {
    fn slot(&self) -> Slot<'a> {
        match self.0.take() {
            Some(field) => Slot::Record(field),
            None => Slot::Opaque,
        }
    }
}

pub trait SlotLeaf<'a> {
    fn slot(&self) -> Slot<'a>;
}

impl<'a, T: Leaf> SlotLeaf<'a> for &SlotProbe<'a, T> {
    fn slot(&self) -> Slot<'a> {
        match self.0.take() {
            Some(field) => Slot::Leaf(field),
            None => Slot::Opaque,
        }
    }
}

pub trait SlotOpaque<'a> {
    fn slot(&self) -> Slot<'a>;
}

impl<'a, T> SlotOpaque<'a> for SlotProbe<'a, T> {
    fn slot(&self) -> Slot<'a> {
        Slot::Opaque
    }
}
