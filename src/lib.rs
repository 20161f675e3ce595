//! A chip8 interpreter core, the machine state with its frame scheduler, the
//! compatibility quirks and the seams needed to drive it from a host.
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod quirks;
pub mod resources;
pub mod settings;
pub mod timer;

mod error;
mod runner;

// reexporting for convinience
pub use error::*;
pub use runner::*;
