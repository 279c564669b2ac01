//! Filesystem helpers shared by the pipeline phases

mod copy;

pub use copy::{copy_file, copy_tree};
