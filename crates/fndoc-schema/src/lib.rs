//! # fndoc-schema — Schema Validation & Function Loading
//!
//! ## Schema Loading (`validate`)
//!
//! [`load_schema`] reads the function schema (a JSON Schema written in YAML
//! or JSON) and compiles it once. [`FunctionSchema::validate`] checks a
//! parsed document and reports every violation with its instance path.
//!
//! ## Function Loading (`loader`)
//!
//! [`load_all_functions`] walks the documentation tree, parses and
//! validates every function document, and returns a [`LoadReport`] with the
//! accepted [`FunctionRecord`](fndoc_core::FunctionRecord)s and the
//! documents that were skipped.
//!
//! ## Crate Policy
//!
//! - Schema validation is the gate into rendering: no record reaches the
//!   renderer without passing it.
//! - A bad document is logged and skipped, never fatal. A bad schema is
//!   always fatal.
//! - `$ref`s resolve from the schema's own directory. No network access.

pub mod loader;
pub mod validate;

pub use loader::{find_documents, load_all_functions, load_function, LoadFailure, LoadReport};
pub use validate::{load_schema, FunctionSchema, SchemaError, ValidationViolations, Violation};
