//! pdxtree: parser and printer for Paradox-style configuration files.
//!
//! Layers, innermost first:
//! - `domain`: node tree, line parser, attribute mapping and record types
//! - `application`: services reading and writing files through a `FileSystem`
//! - `infrastructure`: filesystem, Windows-1252 codec, dependency wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
