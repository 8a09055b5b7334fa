use std::time::{Duration, Instant};

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// How long one cue rings; the zero-crossing event carries no duration.
const CUE_LENGTH: Duration = Duration::from_millis(150);
const PITCH_HZ: f32 = 440.0;

/// The audio collaborator. The core signals it once per sound-timer
/// zero-crossing via `cue`; `poll` runs every scheduler iteration to silence
/// the device once the cue has rung long enough.
pub trait Sound {
    fn cue(&mut self);
    fn poll(&mut self);
    fn stop(&mut self);
}

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

pub struct Beeper {
    device: AudioDevice<SquareWave>,
    ringing_until: Option<Instant>,
}

impl Sound for Beeper {
    fn cue(&mut self) {
        self.device.resume();
        self.ringing_until = Some(Instant::now() + CUE_LENGTH);
    }

    fn poll(&mut self) {
        if let Some(until) = self.ringing_until {
            if Instant::now() >= until {
                self.stop();
            }
        }
    }

    fn stop(&mut self) {
        self.device.pause();
        self.ringing_until = None;
    }
}

pub struct Mute;

impl Sound for Mute {
    fn cue(&mut self) {}
    fn poll(&mut self) {}
    fn stop(&mut self) {}
}

/// Opens the default playback device; falls back to silence if the host has
/// no usable audio.
pub fn open(sdl: &sdl2::Sdl, mute: bool) -> Box<dyn Sound> {
    if mute {
        return Box::new(Mute);
    }
    match beeper(sdl) {
        Ok(beeper) => Box::new(beeper),
        Err(e) => {
            eprintln!("audio unavailable ({}); continuing muted", e);
            Box::new(Mute)
        }
    }
}

fn beeper(sdl: &sdl2::Sdl) -> Result<Beeper, String> {
    let audio = sdl.audio()?;
    let desired = AudioSpecDesired {
        freq: Some(44_100),
        channels: Some(1),
        samples: None,
    };
    let device = audio.open_playback(None, &desired, |spec| SquareWave {
        phase_inc: PITCH_HZ / spec.freq as f32,
        phase: 0.0,
        volume: 0.25,
    })?;
    Ok(Beeper {
        device,
        ringing_until: None,
    })
}
