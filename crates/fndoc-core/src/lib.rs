//! # fndoc-core — Function Records and Pipeline Configuration
//!
//! Leaf crate of the fndoc workspace. Defines the types every other crate
//! passes around:
//!
//! - [`Config`]: the explicit pipeline configuration (repository URL,
//!   local paths, template and output locations).
//! - [`FunctionRecord`]: one validated function document plus the path
//!   it was loaded from.
//! - [`Definition`]: the `shared` / `client` / `server` view that is
//!   authoritative for a record.
//! - [`ExampleRecord`]: an example declaration with its source code
//!   resolved relative to the owning document.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fndoc-*` crates.
//! - No `.unwrap()` outside tests. Malformed records fail with
//!   [`FunctionError`], never with an empty name.

pub mod config;
pub mod error;
pub mod example;
pub mod function;

pub use config::Config;
pub use error::{ConfigError, FunctionError};
pub use example::{ExampleDeclaration, ExampleRecord};
pub use function::{Definition, DefinitionKind, FunctionRecord};
