use std::{
    collections::{BTreeMap, HashMap},
    ffi::OsString,
    hash::BuildHasher,
};

/// A source of environment variables.
///
/// [`ProcessEnv`] reads the real process environment; maps implement it too so
/// a record can be bound from a fixed set of variables.
pub trait Environment {
    /// Returns the raw value of `name`, or `None` when it is unset.
    fn lookup(&self, name: &str) -> Option<OsString>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

impl Environment for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<OsString> {
        (**self).lookup(name)
    }
}
