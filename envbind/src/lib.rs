//! Bind environment variables into plain structs.
//!
//! Derive [`Record`] on a struct and annotate its fields with `#[env(...)]`:
//!
//! ```
//! use std::time::Duration;
//!
//! use envbind::Record;
//!
//! #[derive(Record, Debug, Default)]
//! pub struct Database {
//!     #[env(name = "HOST", required)]
//!     pub host: String,
//!     #[env(name = "POOL_SIZE")]
//!     pub pool_size: usize,
//! }
//!
//! #[derive(Record, Debug, Default)]
//! pub struct Config {
//!     #[env(name = "LISTEN_ADDR", required)]
//!     pub listen_addr: String,
//!     #[env(name = "READ_TIMEOUT")]
//!     pub read_timeout: Duration,
//!     #[env(name = "ALLOWED_ORIGINS")]
//!     pub allowed_origins: Vec<String>,
//!     #[env(env_prefix = "DB_")]
//!     pub database: Database,
//! }
//!
//! let vars = [
//!     ("LISTEN_ADDR", "0.0.0.0:8080"),
//!     ("READ_TIMEOUT", "1m30s"),
//!     ("DB_HOST", "localhost"),
//! ];
//! let env: std::collections::HashMap<String, String> = vars
//!     .into_iter()
//!     .map(|(k, v)| (k.to_owned(), v.to_owned()))
//!     .collect();
//!
//! let mut config = Config::default();
//! envbind::bind_with(&mut config, &env).unwrap();
//!
//! assert_eq!(config.listen_addr, "0.0.0.0:8080");
//! assert_eq!(config.read_timeout, Duration::from_secs(90));
//! assert!(config.allowed_origins.is_empty());
//! assert_eq!(config.database.host, "localhost");
//! assert_eq!(config.database.pool_size, 0);
//! ```
//!
//! # Attributes
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `name = "VAR"` | Variable to read. Fields without a name are never bound. |
//! | `required` | Fail when the variable is unset. Also accepts `required = true` or a string such as `required = "t"`. |
//! | `env_prefix = "P_"` | On a nested record, prepended to every name inside it. Prefixes accumulate. |
//!
//! # Field types
//!
//! `String`, `isize`, `usize`, `f64`, `bool`, [`Duration`](std::time::Duration)
//! (see [`parse_duration`]), and `Vec` of any of those, read as a comma
//! separated list. A field whose type derives [`Record`] is descended into. Any
//! other type is described but fails to convert when its variable is set.
//!
//! An unset optional variable leaves its field untouched, and so does an empty
//! variable for a `Vec` field.
//!
//! # Errors
//!
//! Every variable is read and converted before anything is written, so a
//! missing or malformed variable leaves the record as it was.
//!
//! The record must be passed by mutable reference:
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record, Default)]
//! pub struct Config {
//!     #[env(name = "PORT")]
//!     pub port: usize,
//! }
//!
//! let config = Config::default();
//! envbind::bind(config).unwrap();
//! ```
//!
//! and must be a record:
//!
//! ```compile_fail
//! let mut ports: Vec<usize> = Vec::new();
//! envbind::bind(&mut ports).unwrap();
//! ```
//!
//! # Derive errors
//!
//! Only structs with named fields and no generic parameters can derive
//! [`Record`]:
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub struct Config<T> {
//!     #[env(name = "PORT")]
//!     pub port: T,
//! }
//! ```
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub struct Config(#[env(name = "PORT")] usize);
//! ```
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub enum Mode {
//!     Dev,
//!     Prod,
//! }
//! ```
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub union Port {
//!     signed: isize,
//!     unsigned: usize,
//! }
//! ```
//!
//! A `name` must not be empty:
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub struct Config {
//!     #[env(name = "")]
//!     pub port: usize,
//! }
//! ```
//!
//! A `required` field must have a `name`:
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub struct Config {
//!     #[env(required)]
//!     pub port: usize,
//! }
//! ```
//!
//! and keys other than `name`, `required` and `env_prefix` are rejected:
//!
//! ```compile_fail
//! # use envbind::Record;
//! #[derive(Record)]
//! pub struct Config {
//!     #[env(name = "PORT", default = "8080")]
//!     pub port: usize,
//! }
//! ```
mod duration;
mod env;
mod error;
mod field;
mod inspector;
mod reader;
mod record;
mod value;
mod writer;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

use tracing::debug;

pub use duration::{DurationError, parse_duration};
pub use env::{Environment, ProcessEnv};
pub use envbind_derive::Record;
pub use error::{BindError, CannotConvert, EnvError, Stage};
pub use field::{FieldAttrs, FieldDescriptor, FieldType, Path, ScalarType};
pub use inspector::inspect;
pub use reader::{convert, read_environment, read_environment_from};
pub use record::{Element, Leaf, Record, Slot};
pub use value::{Resolved, Scalar, Value};
pub use writer::write_values;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Binds `record` from the process environment.
///
/// See [`bind_with`].
pub fn bind<R: Record>(record: &mut R) -> Result<(), BindError> {
    bind_with(record, &ProcessEnv)
}

/// Binds `record` from `env`: inspects its fields, reads and converts a value
/// for each, then writes the values that were set.
pub fn bind_with<R, E>(record: &mut R, env: &E) -> Result<(), BindError>
where
    R: Record,
    E: Environment + ?Sized,
{
    let fields = inspect::<R>();
    let values =
        read_environment_from(&fields, env).map_err(|error| BindError::new(Stage::Read, error))?;
    write_values(record, values).map_err(|error| BindError::new(Stage::Write, error))?;
    debug!(record = std::any::type_name::<R>(), "bound record");
    Ok(())
}

/// Lists the variables `R` reads, one per line in field order, in a form that
/// can seed a `.env` file. Optional variables are commented out.
///
/// ```
/// use envbind::Record;
///
/// #[derive(Record)]
/// pub struct Config {
///     #[env(name = "DATABASE_URL", required)]
///     pub database_url: String,
///     #[env(name = "LOG_JSON")]
///     pub log_json: bool,
/// }
///
/// assert_eq!(envbind::requirements::<Config>(), "DATABASE_URL=\n# LOG_JSON=\n");
/// ```
pub fn requirements<R: Record>() -> String {
    let mut requirements = String::new();
    for field in inspect::<R>() {
        if field.env_name.is_empty() {
            continue;
        }
        if !field.required {
            requirements.push_str("# ");
        }
        requirements.push_str(&field.env_name);
        requirements.push_str("=\n");
    }
    requirements
}
