/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded; everything below is interpreter territory.
pub const PROGRAM_START: u16 = 0x200;

/// Call stack depth in return addresses.
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Target instruction rate. 1024 divides into whole instructions per timer
/// tick, which keeps the timer cadence independent of host jitter.
pub const CLOCK_HZ: u32 = 1024;

/// Delay and sound timers decrement at 60Hz.
pub const TIMER_HZ: u32 = 60;

/// Instructions executed per timer tick (~17).
pub const CYCLES_PER_TIMER_TICK: u8 = (CLOCK_HZ / TIMER_HZ) as u8;

/// Nanoseconds per instruction at the target clock rate.
pub const CYCLE_TIME_NS: u32 = 1_000_000_000 / CLOCK_HZ;

/// Bytes per font glyph.
pub const GLYPH_SIZE: u16 = 5;

/// Hex digit glyphs, 5 bytes each, baked into memory at 0x000.
/// The glyph for digit `d` lives at `[5d, 5d + 5)`.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod test_constants {
    use super::*;

    #[test]
    fn test_divisor_is_a_whole_number_of_instructions() {
        assert_eq!(CYCLES_PER_TIMER_TICK, 17);
    }

    #[test]
    fn test_font_covers_every_hex_digit() {
        assert_eq!(FONT.len(), 16 * GLYPH_SIZE as usize);
    }
}
