use std::fmt;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT, MEMORY_SIZE, PROGRAM_START, STACK_DEPTH};

/// The frame buffer is indexed as [y][x]; each cell is one 0/1 pixel.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the whole machine.
///
/// ## CPU
/// - (v) 16 8-bit registers; V0..VE are general purpose, VF doubles as the
///   carry/borrow/collision flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter, always advanced in steps of 2
/// - (sp) a stack pointer into a 16-slot stack of return addresses
///
/// ## Timers
/// - 2 8-bit counters (delay & sound) decremented toward zero at 60Hz,
///   independent of the instruction rate
///
/// ## Memory
/// - 4096 bytes of addressable memory; the font lives at 0x000-0x04F and
///   programs at 0x200+
/// - a 64x32 1-bit frame buffer plus a dirty flag marking that it changed
///   since the last render
///
/// The executor never mutates a `State` in place; every instruction maps the
/// current snapshot to a new one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub dirty: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[0..FONT.len()].copy_from_slice(&FONT);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line diagnostic dump of the register file, used for instruction
/// tracing and for the post-mortem printed when the machine halts.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc {:04X} i {:04X} sp {:X} dt {:02X} st {:02X} v {:02X?} stack {:04X?}",
            self.pc, self.i, self.sp, self.delay_timer, self.sound_timer, self.v, self.stack
        )
    }
}

#[cfg(test)]
mod test_state {
    use super::*;

    #[test]
    fn test_font_loaded_at_zero() {
        let state = State::new();
        assert_eq!(state.memory[0x000..0x050], FONT);
        // the 0 glyph
        assert_eq!(state.memory[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }

    #[test]
    fn test_memory_above_font_zeroed() {
        let state = State::new();
        assert!(state.memory[0x050..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pc_starts_at_program_start() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
    }
}
