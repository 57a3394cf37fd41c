use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use sdl2::event::Event;

use display::Display;
use vm8::constants::FRAME_NANOS;
use vm8::{Chip8, Quirks, Status};

use crate::audio::Beeper;
use crate::keymap::{control, keymap, Control};

/// Everything the emulator needs to know before it starts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rom: PathBuf,
    pub cycles_per_frame: u32,
    pub scale: u32,
    pub quirks: Quirks,
    /// Stop executing after this many instructions
    pub limit: Option<u64>,
    pub mute: bool,
}

/// Runs up to `cycles` instructions, stopping early if the machine halts.
/// Returns how many instructions were executed.
fn run_cycles(chip8: &mut Chip8, cycles: u64) -> u64 {
    let mut executed = 0;
    while executed < cycles && chip8.cycle().is_ok() {
        executed += 1;
    }
    executed
}

/// How many instructions may still run this frame
fn frame_budget(cycles_per_frame: u32, limit: Option<u64>, executed: u64) -> u64 {
    let cycles = u64::from(cycles_per_frame);
    match limit {
        Some(limit) => cycles.min(limit.saturating_sub(executed)),
        None => cycles,
    }
}

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let rom = fs::read(&settings.rom)
        .with_context(|| format!("unable to read ROM {}", settings.rom.display()))?;
    let mut chip8 = Chip8::with_quirks(settings.quirks);
    chip8
        .load(&rom)
        .with_context(|| format!("unable to load ROM {}", settings.rom.display()))?;
    info!("loaded {} ({} bytes)", settings.rom.display(), rom.len());
    debug!("{:?}", chip8.quirks());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, settings.scale).map_err(|e| anyhow!(e))?;
    let mut beeper = if settings.mute {
        None
    } else {
        match Beeper::new(&sdl) {
            Ok(beeper) => Some(beeper),
            Err(e) => {
                warn!("continuing without sound: {}", e);
                None
            }
        }
    };
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    display.render(&chip8.snapshot()).map_err(|e| anyhow!(e))?;

    let frame_time = Duration::from_nanos(FRAME_NANOS);
    let mut last_frame = Instant::now();

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;
    let mut executed: u64 = 0;
    let mut reported = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (keymap(key), control(key)) {
                    (Some(kc), _) => chip8.set_key(kc, true)?,
                    (_, Some(Control::FastForward)) => fast_forward = true,
                    (_, Some(Control::Rewind)) => rewind = true,
                    (_, Some(Control::Reset)) => {
                        chip8.load(&rom)?;
                        executed = 0;
                        reported = false;
                        info!("reset");
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (keymap(key), control(key)) {
                    (Some(kc), _) => chip8.set_key(kc, false)?,
                    (_, Some(Control::FastForward)) => fast_forward = false,
                    (_, Some(Control::Rewind)) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            for _ in 0..settings.cycles_per_frame {
                if !chip8.reverse_cycle() {
                    break;
                }
                executed = executed.saturating_sub(1);
            }
        } else if chip8.status() == Status::Running {
            let budget = frame_budget(settings.cycles_per_frame, settings.limit, executed);
            if budget > 0 {
                executed += run_cycles(&mut chip8, budget);
                chip8.tick_timers();
            }
        }

        if !reported && (chip8.status() == Status::Halted || settings.limit == Some(executed)) {
            info!("stopped after {} instructions\n{}", executed, chip8);
            reported = true;
        }

        if let Some(beeper) = beeper.as_mut() {
            beeper.set_playing(chip8.sound_active() && !rewind);
        }

        // Rewinding restores frames that were already consumed, so redraw regardless
        if rewind || chip8.is_dirty() {
            display.render(&chip8.snapshot()).map_err(|e| anyhow!(e))?;
            chip8.clear_dirty();
        }

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    Ok(())
}
