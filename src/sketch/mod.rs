//! Sketch source rewriting
//!
//! Two transformations make a sketch buildable by the WebAssembly toolchain:
//! the sketch file takes over the fixed entry-point name, and every source
//! file gets the platform shim include as its first line.

mod entry;
mod shim;

pub use entry::{find_sketches, normalize_entry_point, EntryPointNames, EntryPointOutcome};
pub use shim::{has_single_shim, inject_shim, inject_shim_tree};
