use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// One instruction form: an opcode matches it when `opcode & mask == pattern`.
///
/// `syntax` is the assembly template used for disassembly. Placeholders are filled from the
/// opcode: `{x}`, `{y}`, `{n}`, `{kk}`, `{addr}` and `{word}`.
pub struct Instruction {
    pub mask: u16,
    pub pattern: u16,
    pub syntax: &'static str,
    pub operation: Operation,
}

impl Instruction {
    pub fn matches(&self, op: &dyn Opcode) -> bool {
        op.word() & self.mask == self.pattern
    }

    pub fn execute(&self, op: &dyn Opcode, state: &State, inputs: &mut Inputs) -> Outcome {
        (self.operation)(op, state, inputs)
    }

    /// The mnemonic alone, e.g. `DRW`.
    #[cfg(test)]
    fn mnemonic(&self) -> &'static str {
        self.syntax.split(' ').next().unwrap_or(self.syntax)
    }
}

const fn form(mask: u16, pattern: u16, syntax: &'static str, operation: Operation) -> Instruction {
    Instruction {
        mask,
        pattern,
        syntax,
        operation,
    }
}

/// Every known instruction, most specific first.
///
/// Forms sharing a leading nibble are ordered so exact patterns are tested before looser ones,
/// e.g. CLS and RET before SYS, which would otherwise swallow the whole 0-prefix family.
#[rustfmt::skip]
pub static INSTRUCTIONS: [Instruction; 35] = [
    form(0xFFFF, 0x00E0, "CLS", clr),
    form(0xFFFF, 0x00EE, "RET", rts),
    form(0xF000, 0x0000, "SYS {addr}", sys),
    form(0xF000, 0x1000, "JP {addr}", jump),
    form(0xF000, 0x2000, "CALL {addr}", call),
    form(0xF000, 0x3000, "SE V{x}, {kk}", ske),
    form(0xF000, 0x4000, "SNE V{x}, {kk}", skne),
    form(0xF00F, 0x5000, "SE V{x}, V{y}", skre),
    form(0xF000, 0x6000, "LD V{x}, {kk}", load),
    form(0xF000, 0x7000, "ADD V{x}, {kk}", add),
    form(0xF00F, 0x8000, "LD V{x}, V{y}", mv),
    form(0xF00F, 0x8001, "OR V{x}, V{y}", or),
    form(0xF00F, 0x8002, "AND V{x}, V{y}", and),
    form(0xF00F, 0x8003, "XOR V{x}, V{y}", xor),
    form(0xF00F, 0x8004, "ADD V{x}, V{y}", addr),
    form(0xF00F, 0x8005, "SUB V{x}, V{y}", sub),
    form(0xF00F, 0x8006, "SHR V{x}", shr),
    form(0xF00F, 0x8007, "SUBN V{x}, V{y}", subn),
    form(0xF00F, 0x800E, "SHL V{x}", shl),
    form(0xF00F, 0x9000, "SNE V{x}, V{y}", skrne),
    form(0xF000, 0xA000, "LD I, {addr}", loadi),
    form(0xF000, 0xB000, "JP V0, {addr}", jumpi),
    form(0xF000, 0xC000, "RND V{x}, {kk}", rnd),
    form(0xF000, 0xD000, "DRW V{x}, V{y}, {n}", draw),
    form(0xF0FF, 0xE09E, "SKP V{x}", skpr),
    form(0xF0FF, 0xE0A1, "SKNP V{x}", skup),
    form(0xF0FF, 0xF007, "LD V{x}, DT", movd),
    form(0xF0FF, 0xF00A, "LD V{x}, K", keyd),
    form(0xF0FF, 0xF015, "LD DT, V{x}", setd),
    form(0xF0FF, 0xF018, "LD ST, V{x}", sets),
    form(0xF0FF, 0xF01E, "ADD I, V{x}", addi),
    form(0xF0FF, 0xF029, "LD F, V{x}", ldspr),
    form(0xF0FF, 0xF033, "LD B, V{x}", bcd),
    form(0xF0FF, 0xF055, "LD [I], V{x}", stor),
    form(0xF0FF, 0xF065, "LD V{x}, [I]", read),
];

/// Catch-all for words that match nothing in `INSTRUCTIONS`.
pub static UNKNOWN: Instruction = form(0x0000, 0x0000, "??? {word}", unknown);

/// Selects the correct Instruction for a given Opcode; the first match wins.
pub fn from_op(op: &dyn Opcode) -> &'static Instruction {
    INSTRUCTIONS
        .iter()
        .find(|instruction| instruction.matches(op))
        .unwrap_or(&UNKNOWN)
}

/// Renders an opcode as assembly, e.g. `0xD125` as `DRW V1, V2, 5`.
pub fn disassemble(op: &dyn Opcode) -> String {
    from_op(op)
        .syntax
        .replace("{x}", &format!("{:X}", op.x()))
        .replace("{y}", &format!("{:X}", op.y()))
        .replace("{n}", &op.n().to_string())
        .replace("{kk}", &format!("{:#04X}", op.kk()))
        .replace("{addr}", &format!("{:#05X}", op.addr()))
        .replace("{word}", &format!("{:#06X}", op.word()))
}
