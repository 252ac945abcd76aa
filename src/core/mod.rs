// src/core/mod.rs
//! Core services shared by the render pipeline

pub mod fs_ops;

pub use fs_ops::FsOps;
