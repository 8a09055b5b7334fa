use crate::constants::{CYCLES_PER_TIMER_TICK, MEMORY_SIZE, PROGRAM_START};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, State};

/// What one scheduler iteration produced beyond the state transition itself.
///
/// `ticked` fires every 17th cycle when the 60Hz timers decrement; the
/// renderer should only be signaled on ticked cycles. `sound_elapsed` fires
/// on the tick where the sound timer crosses from nonzero to zero, exactly
/// once per crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub ticked: bool,
    pub sound_elapsed: bool,
}

/// # Chip-8
/// The whole machine: current `State`, the input latch, and the cycle
/// counter that divides the instruction rate down to the 60Hz timer tick.
///
/// Supplies interfaces for:
/// - loading ROMs and rebooting
/// - pressing and releasing keys
/// - advancing the machine one instruction at a time
/// - taking the frame buffer for rendering when it's dirty
pub struct Chip8 {
    state: State,
    pressed_keys: [u8; 16],
    quirks: Quirks,
    rom: Vec<u8>,
    cycles: u8,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [0; 16],
            quirks,
            rom: Vec::new(),
            cycles: 0,
        }
    }

    /// Copies a ROM verbatim into memory at 0x200 and retains the image so
    /// `reset` can reload it. Memory past the program keeps its prior value.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        let start = PROGRAM_START as usize;
        if rom.len() > MEMORY_SIZE - start {
            return Err(Error::RomTooLarge { len: rom.len() });
        }
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        self.rom = rom.to_vec();
        Ok(())
    }

    /// Reboot: fresh machine state with the retained ROM reloaded.
    pub fn reset(&mut self) {
        let rom = std::mem::take(&mut self.rom);
        self.state = State::new();
        self.pressed_keys = [0; 16];
        self.cycles = 0;
        // the image fit when it was first loaded
        let _ = self.load_rom(&rom);
    }

    /// Latches a key down. Indices are masked to 0x0-0xF.
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = 0x1;
    }

    /// Latches a key up. Indices are masked to 0x0-0xF.
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = 0x0;
    }

    /// Runs one scheduler iteration: fetch, decode, and execute a single
    /// instruction, then tick the 60Hz timers if this cycle lands on the
    /// divisor boundary. Decode failures and out-of-range address arithmetic
    /// halt the machine.
    pub fn cycle(&mut self) -> Result<CycleOutcome, Error> {
        let op = self.peek_op();
        self.state = Instruction::decode(op)?.execute(&self.state, &self.pressed_keys, self.quirks)?;

        self.cycles += 1;
        if self.cycles < CYCLES_PER_TIMER_TICK {
            return Ok(CycleOutcome {
                ticked: false,
                sound_elapsed: false,
            });
        }
        self.cycles = 0;
        Ok(self.tick_timers())
    }

    /// Decrements any nonzero timer by one; a zero timer stays zero.
    fn tick_timers(&mut self) -> CycleOutcome {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        let sound_elapsed = self.state.sound_timer == 1;
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
        CycleOutcome {
            ticked: true,
            sound_elapsed,
        }
    }

    /// Returns the frame buffer and clears the dirty flag if the display
    /// changed since the last take.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.dirty {
            self.state.dirty = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The opcode currently pointed at by the pc. Memory is stored as bytes
    /// but opcodes are 16 bits, so two subsequent bytes are combined
    /// big-endian.
    pub fn peek_op(&self) -> u16 {
        let left = u16::from(self.state.memory[self.state.pc as usize]);
        let right = u16::from(self.state.memory[self.state.pc as usize + 1]);
        left << 8 | right
    }

    /// Read-only view of the machine state, for tracing and post-mortems.
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
