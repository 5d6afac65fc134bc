pub use chip8::{Chip8, Report};
pub use config::Config;
pub use error::{Chip8Error, Fault, LoadError};
pub use instruction::disassemble;
pub use keypad::Keypad;
pub use state::{FrameBuffer, State};
pub use timing::{Scheduler, Tick};

mod chip8;
mod config;
pub mod constants;
mod error;
pub mod instruction;
mod keypad;
pub mod opcode;
mod operations;
pub mod state;
mod timing;
