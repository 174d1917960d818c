//! # fndoc-render — HTML Page Rendering
//!
//! Renders one HTML page per [`FunctionRecord`](fndoc_core::FunctionRecord)
//! from a single minijinja template.
//!
//! The template receives three bindings:
//!
//! | Binding             | Contents                                           |
//! |---------------------|----------------------------------------------------|
//! | `function`          | the raw function document, plus its `path`         |
//! | `function_name`     | the resolved function name                         |
//! | `function_examples` | list of `{path, description, code}`                |
//!
//! After rendering, every `[[Name]]` in the output becomes a link to
//! `Name.html` (see [`rewrite_links`]).
//!
//! ## Crate Policy
//!
//! - Every render is a full rebuild: the output directory is deleted and
//!   recreated, so pages of removed functions disappear.
//! - Output is a pure function of the inputs. Nothing time-dependent is
//!   written, so unchanged inputs give byte-identical pages.
//! - Two functions with the same name are an error, reported before the
//!   output directory is touched.

pub mod error;
pub mod links;
pub mod renderer;

pub use error::RenderError;
pub use links::rewrite_links;
pub use renderer::{PageRenderer, RenderSummary};
