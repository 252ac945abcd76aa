// src/transform/mod.rs
//! CMS config → rendering engine input

pub mod builder;
pub mod keys;
pub mod sections;

pub use builder::{build_render_input, resolve_render_input, InputSource, RenderInput};
pub use keys::{camel_to_snake, normalize_keys};
pub use sections::{transform_sections, SectionKind};
