use std::fmt;

/// Fatal machine conditions. The instruction set has no fault or interrupt
/// mechanism, so none of these are recoverable; the run loop halts on any of
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The fetched word doesn't decode to any defined instruction.
    UnknownOpcode { op: u16 },
    /// Address arithmetic indexed memory outside its fixed bounds.
    OutOfRange { addr: usize },
    /// The supplied program doesn't fit between 0x200 and the end of memory.
    RomTooLarge { len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownOpcode { op } => write!(f, "unknown opcode {:04X}", op),
            Error::OutOfRange { addr } => {
                write!(f, "memory access out of range at {:#05X}", addr)
            }
            Error::RomTooLarge { len } => {
                write!(f, "ROM of {} bytes doesn't fit in program memory", len)
            }
        }
    }
}

impl std::error::Error for Error {}
