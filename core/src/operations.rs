use std::ops::Range;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_SIZE, MEMORY_SIZE, STACK_DEPTH};
use crate::error::Error;
use crate::quirks::Quirks;
use crate::state::State;

/// The input latch: one 0/1 entry per hex key.
pub type Keys = [u8; 16];

/// Bounds-checks a `base..base + len` window into memory.
/// Address arithmetic that escapes the 4KiB space is fatal, never clamped.
fn mem_range(base: u16, len: u16) -> Result<Range<usize>, Error> {
    let start = base as usize;
    let end = start + len as usize;
    if end > MEMORY_SIZE {
        return Err(Error::OutOfRange { addr: end - 1 });
    }
    Ok(start..end)
}

/// `0NNN`: historically a machine-code call; ignored
pub fn sys(state: &State) -> State {
    State {
        pc: state.pc + 2,
        ..*state
    }
}

/// `00E0`: clear the display
pub fn clear(state: &State) -> State {
    State {
        pc: state.pc + 2,
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        dirty: true,
        ..*state
    }
}

/// `00EE`: PC = STACK.pop()
/// With nothing on the stack the pop is skipped and execution falls through
/// to the next instruction.
pub fn ret(state: &State) -> State {
    if state.sp == 0 {
        return State {
            pc: state.pc + 2,
            ..*state
        };
    }
    State {
        pc: state.stack[state.sp as usize] + 2,
        sp: state.sp - 1,
        ..*state
    }
}

/// `1NNN`: PC = NNN
pub fn jump(nnn: u16, state: &State) -> State {
    State { pc: nnn, ..*state }
}

/// `2NNN`: STACK.push(PC); PC = NNN
/// The push is dropped once the stack is full; the jump still happens.
pub fn call(nnn: u16, state: &State) -> State {
    let mut sp = state.sp;
    let mut stack = state.stack;
    if (sp as usize) < STACK_DEPTH - 1 {
        sp += 1;
        stack[sp as usize] = state.pc;
    }
    State {
        pc: nnn,
        sp,
        stack,
        ..*state
    }
}

/// `3XNN`: if Vx == NN then skip the next instruction
pub fn skip_eq_imm(x: u8, nn: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == nn {
        state.pc + 4
    } else {
        state.pc + 2
    };
    State { pc, ..*state }
}

/// `4XNN`: if Vx != NN then skip the next instruction
pub fn skip_ne_imm(x: u8, nn: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != nn {
        state.pc + 4
    } else {
        state.pc + 2
    };
    State { pc, ..*state }
}

/// `5XY0`: if Vx == Vy then skip the next instruction
pub fn skip_eq_reg(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == state.v[y as usize] {
        state.pc + 4
    } else {
        state.pc + 2
    };
    State { pc, ..*state }
}

/// `9XY0`: if Vx != Vy then skip the next instruction
pub fn skip_ne_reg(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != state.v[y as usize] {
        state.pc + 4
    } else {
        state.pc + 2
    };
    State { pc, ..*state }
}

/// `6XNN`: Vx = NN
pub fn load_imm(x: u8, nn: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = nn;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `7XNN`: Vx += NN, overflow dropped, no flag
pub fn add_imm(x: u8, nn: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(nn);
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY0`: Vx = Vy
pub fn move_reg(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY1`: Vx |= Vy
pub fn or_reg(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY2`: Vx &= Vy
pub fn and_reg(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY3`: Vx ^= Vy
pub fn xor_reg(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY4`: Vx += Vy; VF = carry
/// VF is written after the result so it wins when X is F.
pub fn add_reg(x: u8, y: u8, state: &State) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = carry as u8;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY5`: Vx -= Vy; VF = NOT borrow
pub fn sub_reg(x: u8, y: u8, state: &State) -> State {
    let (res, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = !borrow as u8;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY6`: VF = LSB of Vx; Vx >>= 1
pub fn shift_right(x: u8, state: &State) -> State {
    let lsb = state.v[x as usize] & 0x1;
    let mut v = state.v;
    v[x as usize] >>= 1;
    v[0xF] = lsb;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XY7`: Vx = Vy - Vx; VF = NOT borrow
pub fn sub_from_reg(x: u8, y: u8, state: &State) -> State {
    let (res, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = !borrow as u8;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `8XYE`: VF = MSB of Vx; Vx <<= 1, overflow dropped
pub fn shift_left(x: u8, state: &State) -> State {
    let msb = state.v[x as usize] >> 7;
    let mut v = state.v;
    v[x as usize] <<= 1;
    v[0xF] = msb;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `ANNN`: I = NNN
pub fn load_index(nnn: u16, state: &State) -> State {
    State {
        pc: state.pc + 2,
        i: nnn,
        ..*state
    }
}

/// `BNNN`: PC = NNN + V0, mod 65536
pub fn jump_offset(nnn: u16, state: &State) -> State {
    State {
        pc: nnn.wrapping_add(u16::from(state.v[0x0])),
        ..*state
    }
}

/// `CXNN`: Vx = random byte AND NN
pub fn random(x: u8, nn: u8, state: &State) -> State {
    let byte: u8 = rand::random();
    let mut v = state.v;
    v[x as usize] = byte & nn;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `DXYN`: XOR the N-row sprite at I onto the frame buffer at (Vx, Vy)
///
/// VF is cleared first and set as soon as any drawn pixel flips from set to
/// unset. Pixels that land outside the 64x32 grid are skipped individually;
/// the rest of the sprite still draws. Reading sprite rows past the end of
/// memory is fatal.
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> Result<State, Error> {
    let rows = mem_range(state.i, u16::from(n))?;
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;

    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;
    v[0xF] = 0;

    for (row, &byte) in state.memory[rows].iter().enumerate() {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            continue;
        }
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                continue;
            }
            let pixel = (byte >> (7 - bit)) & 1;
            v[0xF] |= pixel & frame_buffer[py][px];
            frame_buffer[py][px] ^= pixel;
        }
    }

    Ok(State {
        pc: state.pc + 2,
        dirty: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// `EX9E`: if key Vx is down then skip the next instruction
pub fn skip_key_down(x: u8, state: &State, keys: &Keys) -> State {
    let pc = if keys[(state.v[x as usize] & 0xF) as usize] == 1 {
        state.pc + 4
    } else {
        state.pc + 2
    };
    State { pc, ..*state }
}

/// `EXA1`: if key Vx is up then skip the next instruction
pub fn skip_key_up(x: u8, state: &State, keys: &Keys) -> State {
    let pc = if keys[(state.v[x as usize] & 0xF) as usize] == 0 {
        state.pc + 4
    } else {
        state.pc + 2
    };
    State { pc, ..*state }
}

/// `FX07`: Vx = DT
pub fn read_delay(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State {
        pc: state.pc + 2,
        v,
        ..*state
    }
}

/// `FX0A`: busy-wait for a keypress, then Vx = lowest pressed key
///
/// No key down leaves PC pointing at this instruction so it refetches on the
/// next scheduler iteration. The cycle budget is still consumed and timers
/// keep ticking while the wait spins.
pub fn wait_key(x: u8, state: &State, keys: &Keys) -> State {
    match keys.iter().position(|&k| k == 1) {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key as u8;
            State {
                pc: state.pc + 2,
                v,
                ..*state
            }
        }
        None => *state,
    }
}

/// `FX15`: DT = Vx
pub fn set_delay(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 2,
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// `FX18`: ST = Vx
pub fn set_sound(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 2,
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// `FX1E`: I += Vx
/// Wraps at 16 bits, or at the address space when the quirk is set.
pub fn add_index(x: u8, state: &State, quirks: Quirks) -> State {
    let mut i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    if quirks.index_add_wraps_address_space {
        i %= MEMORY_SIZE as u16;
    }
    State {
        pc: state.pc + 2,
        i,
        ..*state
    }
}

/// `FX29`: I = address of the font glyph for Vx
pub fn load_glyph(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 2,
        i: u16::from(state.v[x as usize]) * GLYPH_SIZE,
        ..*state
    }
}

/// `FX33`: mem[I..I+3] = the decimal digits of Vx (hundreds, tens, ones)
pub fn store_bcd(x: u8, state: &State) -> Result<State, Error> {
    let range = mem_range(state.i, 3)?;
    let vx = state.v[x as usize];
    let mut memory = state.memory;
    memory[range].copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(State {
        pc: state.pc + 2,
        memory,
        ..*state
    })
}

/// `FX55`: mem[I..I+X+1] = V0..Vx
pub fn store_regs(x: u8, state: &State, quirks: Quirks) -> Result<State, Error> {
    let range = mem_range(state.i, u16::from(x) + 1)?;
    let mut memory = state.memory;
    memory[range].copy_from_slice(&state.v[0..=x as usize]);
    Ok(State {
        pc: state.pc + 2,
        memory,
        i: block_io_index(x, state, quirks),
        ..*state
    })
}

/// `FX65`: V0..Vx = mem[I..I+X+1]
pub fn load_regs(x: u8, state: &State, quirks: Quirks) -> Result<State, Error> {
    let range = mem_range(state.i, u16::from(x) + 1)?;
    let mut v = state.v;
    v[0..=x as usize].copy_from_slice(&state.memory[range]);
    Ok(State {
        pc: state.pc + 2,
        v,
        i: block_io_index(x, state, quirks),
        ..*state
    })
}

fn block_io_index(x: u8, state: &State, quirks: Quirks) -> u16 {
    if quirks.increment_index_on_block_io {
        state.i.wrapping_add(u16::from(x) + 1)
    } else {
        state.i
    }
}
