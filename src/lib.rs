//! Convert the CMS-authored CV config into rendercv input, render it to PDF,
//! and publish the PDF plus a metadata record for the website.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod pdf_validator;
pub mod publisher;
pub mod render;
pub mod transform;
pub mod types;

pub use config::CvConfig;
pub use error::RenderError;
pub use generator::CvRenderer;
pub use types::CvMetadata;
