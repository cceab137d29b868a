//! Load typed configuration records from env files and the process
//! environment.
//!
//! A record is a plain struct whose fields are integers or strings, declared
//! with [`record!`]. [`EnvLoader::load_from_file`] reads `KEY=VALUE` lines,
//! writes each pair into a [`TargetEnv`] table, reads it back and binds it to
//! the same-named field. [`EnvLoader::load_from_env`] binds straight from the
//! table. Both finish with a completeness pass: every field must end up
//! non-zero.
//!
//! ```
//! use envrecord::{EnvLoader, TargetEnv, record};
//!
//! record! {
//!     #[allow(non_snake_case)]
//!     #[derive(Debug, Default)]
//!     pub struct Settings {
//!         pub HOST: String,
//!         pub PORT: u16,
//!     }
//! }
//!
//! let mut table = std::collections::BTreeMap::new();
//! table.insert("HOST".to_owned(), "localhost".to_owned());
//! table.insert("PORT".to_owned(), "8080".to_owned());
//!
//! let mut settings = Settings::default();
//! EnvLoader::new()
//!     .target(TargetEnv::from_memory(table))
//!     .load_from_env(&mut settings)
//!     .expect("settings should load");
//! assert_eq!(settings.PORT, 8080);
//! ```
//!
//! [`from_path`] writes into the process environment and is `unsafe`, because
//! callers must guarantee no concurrent process-environment access.

mod binder;
mod env;
mod error;
mod loader;
mod model;
mod parser;
mod record;
mod validate;

pub use env::TargetEnv;
pub use error::{Error, ParseError};
pub use loader::{EnvLoader, from_env, from_path};
pub use model::{Entry, LoadReport, UnknownKeyPolicy};
pub use parser::{LineKind, classify_line, parse_line, parse_reader, parse_str};
pub use record::{Field, FieldKind, FieldSlot, IntegerSlot, Record};
pub use validate::validate_record;
