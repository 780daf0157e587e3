//! CLI module for ngscan
//!
//! Both commands are standalone: they read the filesystem and write to
//! stdout/stderr or an export file, nothing else.

pub mod classify;
pub mod error;
pub mod output;
pub mod scan;
