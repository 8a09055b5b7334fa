use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::constants::CYCLE_TIME_NS;
use vip8_core::Chip8;
use vip8_display::Display;

use crate::audio::{self, Sound};
use crate::keymap::keymap;

/// The scheduler: one instruction per iteration at the target clock rate,
/// with input latched before each instruction and rendering/audio driven off
/// the core's divisor tick.
///
/// Controls outside the machine's own keypad:
/// - Escape or closing the window quits
/// - P toggles pause (timers and instructions both stop)
/// - Backspace reboots the machine with the same ROM
/// - holding Space fast-forwards by skipping the wall-clock pacing
pub fn run(mut chip8: Chip8, scale: u32, mute: bool, trace: bool) -> Result<()> {
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut sound = audio::open(&sdl, mute);

    let cycle_time = Duration::new(0, CYCLE_TIME_NS);
    let mut last_cycle = Instant::now();
    let mut fast_forward = false;
    let mut paused = false;

    'event: loop {
        // Latch pending input transitions before executing anything
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::P, _) => paused = !paused,
                    (Keycode::Backspace, _) => chip8.reset(),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        if !paused {
            if trace {
                println!("{:04X} {}", chip8.peek_op(), chip8.state());
            }

            let outcome = match chip8.cycle() {
                Ok(outcome) => outcome,
                Err(e) => {
                    // post-mortem dump before halting
                    eprintln!("{}", chip8.state());
                    return Err(anyhow!(e).context("machine halted"));
                }
            };

            if outcome.ticked {
                if let Some(frame) = chip8.take_frame() {
                    display.render(&frame).map_err(|e| anyhow!(e))?;
                }
                if outcome.sound_elapsed {
                    sound.cue();
                }
            }
        }
        sound.poll();

        // Pace to the target clock; the divisor tick above, not this sleep,
        // is what fixes the timer cadence
        let now = Instant::now();
        let elapsed = now - last_cycle;
        if !fast_forward && cycle_time > elapsed {
            std::thread::sleep(cycle_time - elapsed);
        }
        last_cycle = now;
    }

    sound.stop();
    Ok(())
}
