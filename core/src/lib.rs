pub use chip8::{Chip8, CycleOutcome};
pub use error::Error;
pub use quirks::Quirks;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod quirks;
pub mod state;
