use log::warn;
use rand::RngCore;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, GLYPH_SIZE, STACK_SIZE};
use crate::error::Fault;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::{indexed, State};

/// Everything outside of `State` that an operation may consult.
pub struct Inputs<'a> {
    pub keypad: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
}

/// The state after an operation, or the fault that abandoned it.
pub type Outcome = Result<State, Fault>;

/// Every operation has this shape so that they can be stored side by side in a table.
pub type Operation = fn(op: &dyn Opcode, state: &State, inputs: &mut Inputs) -> Outcome;

fn next(state: &State) -> u16 {
    state.pc.wrapping_add(0x2)
}

fn skip_if(condition: bool, state: &State) -> u16 {
    if condition {
        state.pc.wrapping_add(0x4)
    } else {
        next(state)
    }
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: next(state),
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    })
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow { pc: state.pc });
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    })
}

/// Machine code routine at addr; not supported.
/// The PC is left where it is, so a ROM that reaches one spins on it.
pub fn sys(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    warn!(
        "SYS {:#05X} at {:#06X} is not implemented",
        op.addr(),
        state.pc
    );
    Ok(*state)
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: op.addr(),
        ..*state
    })
}

/// STACK.push(PC + 2); PC = addr
pub fn call(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    if state.sp as usize >= STACK_SIZE {
        return Err(Fault::StackOverflow { pc: state.pc });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = next(state);
    Ok(State {
        pc: op.addr(),
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let pc = skip_if(state.v[op.x() as usize] == op.kk(), state);
    Ok(State { pc, ..*state })
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let pc = skip_if(state.v[op.x() as usize] != op.kk(), state);
    Ok(State { pc, ..*state })
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let pc = skip_if(state.v[op.x() as usize] == state.v[op.y() as usize], state);
    Ok(State { pc, ..*state })
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let pc = skip_if(state.v[op.x() as usize] != state.v[op.y() as usize], state);
    Ok(State { pc, ..*state })
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] = op.kk();
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] = state.v[op.x() as usize].wrapping_add(op.kk());
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] = v[op.y() as usize];
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] |= v[op.y() as usize];
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] &= v[op.y() as usize];
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] ^= v[op.y() as usize];
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

// The arithmetic operations below write VF before Vx, so when x is F the result wins.

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let (res, over) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    let mut v = state.v;
    v[FLAG] = over as u8;
    v[op.x() as usize] = res;
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    let mut v = state.v;
    v[FLAG] = (vx > vy) as u8;
    v[op.x() as usize] = vx.wrapping_sub(vy);
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let vx = state.v[op.x() as usize];
    let mut v = state.v;
    v[FLAG] = vx & 0x1;
    v[op.x() as usize] = vx >> 1;
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    let mut v = state.v;
    v[FLAG] = (vy > vx) as u8;
    v[op.x() as usize] = vy.wrapping_sub(vx);
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx <<= 1; VF = msb
pub fn shl(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let vx = state.v[op.x() as usize];
    let mut v = state.v;
    v[FLAG] = (vx & 0x80) >> 7;
    v[op.x() as usize] = vx << 1;
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: next(state),
        i: op.addr(),
        ..*state
    })
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: op.addr().wrapping_add(u16::from(state.v[0x0])),
        ..*state
    })
}

/// Vx = rand_byte & kk
pub fn rnd(op: &dyn Opcode, state: &State, inputs: &mut Inputs) -> Outcome {
    let rand_byte = (inputs.rng.next_u32() & 0xFF) as u8;
    let mut v = state.v;
    v[op.x() as usize] = rand_byte & op.kk();
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
/// Pixels that fall off the right or bottom edge are dropped rather than wrapped.
/// Sets VF if any pixels are erased
pub fn draw(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let origin_x = state.v[op.x() as usize] as usize;
    let origin_y = state.v[op.y() as usize] as usize;
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    // Reset the carry flag (used for collision detection)
    v[FLAG] = 0x0;

    for byte in 0..op.n() as usize {
        let y = origin_y + byte;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let sprite_row = state.read_at_i(byte as u16);
        for bit in 0..8 {
            let x = origin_x + bit;
            if x >= DISPLAY_WIDTH {
                break;
            }
            let pixel_value = (sprite_row >> (7 - bit)) & 1;
            v[FLAG] |= pixel_value & frame_buffer[y][x];
            frame_buffer[y][x] ^= pixel_value;
        }
    }

    Ok(State {
        pc: next(state),
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &State, inputs: &mut Inputs) -> Outcome {
    let pc = skip_if(inputs.keypad.is_pressed(state.v[op.x() as usize]), state);
    Ok(State { pc, ..*state })
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &State, inputs: &mut Inputs) -> Outcome {
    let pc = skip_if(!inputs.keypad.is_pressed(state.v[op.x() as usize]), state);
    Ok(State { pc, ..*state })
}

/// Vx = DT
pub fn movd(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    v[op.x() as usize] = state.delay_timer;
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Vx = await keypress
/// Polls rather than blocks: with no key down the PC stays put and this runs again next cycle.
/// With several keys down the lowest one wins.
pub fn keyd(op: &dyn Opcode, state: &State, inputs: &mut Inputs) -> Outcome {
    match inputs.keypad.first_pressed() {
        Some(key) => {
            let mut v = state.v;
            v[op.x() as usize] = key;
            Ok(State {
                pc: next(state),
                v,
                ..*state
            })
        }
        None => Ok(*state),
    }
}

/// DT = Vx
pub fn setd(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: next(state),
        delay_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// ST = Vx
pub fn sets(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: next(state),
        sound_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: next(state),
        i: state.i.wrapping_add(u16::from(state.v[op.x() as usize])),
        ..*state
    })
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Ok(State {
        pc: next(state),
        i: u16::from(state.v[op.x() as usize]) * GLYPH_SIZE,
        ..*state
    })
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let vx = state.v[op.x() as usize];
    let bcd = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    let mut memory = state.memory;
    for (offset, digit) in bcd.iter().enumerate() {
        memory[indexed(state.i, offset as u16)] = *digit;
    }
    Ok(State {
        pc: next(state),
        memory,
        ..*state
    })
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut memory = state.memory;
    for r in 0..=op.x() as usize {
        memory[indexed(state.i, r as u16)] = state.v[r];
    }
    Ok(State {
        pc: next(state),
        memory,
        ..*state
    })
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    let mut v = state.v;
    for (r, register) in v.iter_mut().enumerate().take(op.x() as usize + 1) {
        *register = state.read_at_i(r as u16);
    }
    Ok(State {
        pc: next(state),
        v,
        ..*state
    })
}

/// Anything that didn't match a known instruction.
pub fn unknown(op: &dyn Opcode, state: &State, _inputs: &mut Inputs) -> Outcome {
    Err(Fault::UnknownOpcode {
        opcode: op.word(),
        pc: state.pc,
    })
}
