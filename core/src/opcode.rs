use crate::constants::ADDRESS_MASK;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
///
/// Decoding never touches the program counter.
pub trait Opcode {
    /// The raw 16-bit instruction word.
    fn word(&self) -> u16;

    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (((self.word() & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8 {
        ((self.word() & 0x0F00) >> 8) as u8
    }

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8 {
        ((self.word() & 0x00F0) >> 4) as u8
    }

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8 {
        (self.word() & 0x000F) as u8
    }

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8 {
        (self.word() & 0x00FF) as u8
    }

    /// The Opcode's without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16 {
        self.word() & 0x0FFF
    }
}

impl Opcode for u16 {
    fn word(&self) -> u16 {
        *self
    }
}

/// Reads the opcode at `pc`.
///
/// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes
/// big-endian. Both addresses wrap within the 4K address space.
pub fn fetch(memory: &[u8], pc: u16) -> u16 {
    let left = u16::from(memory[(pc & ADDRESS_MASK) as usize]);
    let right = u16::from(memory[(pc.wrapping_add(1) & ADDRESS_MASK) as usize]);
    left << 8 | right
}
