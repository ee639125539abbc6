//! Core library for the assembly-bom command line application.
//!
//! The modules keep responsibilities narrow: the assembly document model
//! lives in [`model`], part information reading and editing in [`info`], the
//! aggregation engine in [`bom`], cell naming in [`address`], spreadsheet and
//! JSON adapters under [`io`], drawing title blocks in [`drawing`], and the
//! file-level orchestration used by the CLI in [`commands`].

pub mod address;
pub mod bom;
pub mod commands;
pub mod config;
pub mod drawing;
pub mod error;
pub mod info;
pub mod io;
pub mod model;

pub use error::{Result, ToolError};
