//! File writer adapters.

mod local;
mod memory;

pub use local::{LocalFileWriter, WRITE_PROBE};
pub use memory::MemoryFileWriter;
