use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Recoverable faults raised while executing a single instruction.
///
/// The faulting instruction is abandoned without touching the state, so the PC still points
/// at it when the next cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("stack overflow: CALL at {pc:#06X} with a full stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: RET at {pc:#06X} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06X} at {pc:#06X}")]
    UnknownOpcode { opcode: u16, pc: u16 },
}

/// Reasons a ROM could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unable to read ROM: {0}")]
    Read(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum Chip8Error {
    /// Only surfaced in strict mode; otherwise faults are logged and skipped.
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid key {0:#04X}; keys are 0x0..=0xF")]
    InvalidKey(u8),
}
