//! File I/O operations for JSON documents.
//!
//! This module provides functionality to load JSON files from disk or stdin.

pub mod loader;
