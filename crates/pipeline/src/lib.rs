//! Stage orchestration for lsp-json-schema
//!
//! Fetches the LSP and reference repositories, drives the node
//! schema tooling and runs the parser and generator stages in order.
//!
//! # Examples
//!
//! ```no_run
//! use lsp_json_schema_common::GeneratorConfig;
//! use lsp_json_schema_pipeline::{SpecGenerator, SystemToolchain};
//!
//! let config = GeneratorConfig::default();
//! let toolchain = SystemToolchain::new(&config);
//! let report = SpecGenerator::new(config, "work", "output", toolchain)
//!     .generate()
//!     .expect("generation failed");
//!
//! println!("{} methods", report.methods.len());
//! ```

pub mod artifacts;
pub mod git_fetcher;
pub mod npm;
mod process;
mod spec_generator;
pub mod toolchain;

pub use artifacts::ArtifactPaths;
pub use spec_generator::{GenerationReport, SpecGenerator};
pub use toolchain::{SystemToolchain, Toolchain};
