//! PDF assembly.

pub mod merge;

pub use merge::{merge_files, MergeInput};
