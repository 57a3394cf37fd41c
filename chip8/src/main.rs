use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use vm8::constants::DEFAULT_CYCLES_PER_FRAME;
use vm8::Quirks;

use crate::run::{run, Settings};

mod audio;
mod keymap;
mod run;

/// Runs a Chip-8 ROM in a window.
///
/// Keypad: 1234 / QWER / ASDF / ZXCV. Hold Space to fast-forward, hold Escape to rewind,
/// press F5 to reset.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per 60Hz frame
    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME)]
    cycles: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Stop executing after this many instructions and print the machine state
    #[arg(short, long)]
    limit: Option<u64>,

    /// Behave exactly like the reference interpreter
    #[arg(long)]
    reference: bool,

    /// 3XNN/4XNN compare the register index instead of its value
    #[arg(long)]
    compare_register_index: bool,

    /// FX65 leaves I untouched
    #[arg(long)]
    keep_index_on_load: bool,

    /// 00EE resumes two bytes past the return address
    #[arg(long)]
    return_skips_slot: bool,

    /// Sprites wrap around the screen edges instead of being clipped
    #[arg(long)]
    wrap_sprites: bool,

    /// Don't play the beep
    #[arg(long)]
    mute: bool,
}

impl Args {
    fn quirks(&self) -> Quirks {
        let base = if self.reference {
            Quirks::reference()
        } else {
            Quirks::default()
        };
        Quirks {
            compare_register_index: base.compare_register_index || self.compare_register_index,
            increment_index_on_load: base.increment_index_on_load && !self.keep_index_on_load,
            return_skips_slot: base.return_skips_slot || self.return_skips_slot,
            wrap_sprites: base.wrap_sprites || self.wrap_sprites,
        }
    }

    fn into_settings(self) -> Settings {
        Settings {
            quirks: self.quirks(),
            rom: self.rom,
            cycles_per_frame: self.cycles,
            scale: self.scale,
            limit: self.limit,
            mute: self.mute,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let settings = Args::parse().into_settings();
    run(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Settings {
        Args::try_parse_from(args).unwrap().into_settings()
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&["chip8", "pong.ch8"]);
        assert_eq!(settings.rom, PathBuf::from("pong.ch8"));
        assert_eq!(settings.cycles_per_frame, 10);
        assert_eq!(settings.scale, 10);
        assert_eq!(settings.limit, None);
        assert_eq!(settings.quirks, Quirks::default());
        assert!(!settings.mute);
    }

    #[test]
    fn test_reference_preset() {
        let settings = settings(&["chip8", "--reference", "ibm.ch8"]);
        assert_eq!(settings.quirks, Quirks::reference());
    }

    #[test]
    fn test_individual_quirks() {
        let settings = settings(&[
            "chip8",
            "--wrap-sprites",
            "--keep-index-on-load",
            "--limit",
            "500",
            "-c",
            "8",
            "ibm.ch8",
        ]);
        assert!(settings.quirks.wrap_sprites);
        assert!(!settings.quirks.increment_index_on_load);
        assert!(!settings.quirks.compare_register_index);
        assert_eq!(settings.limit, Some(500));
        assert_eq!(settings.cycles_per_frame, 8);
    }

    #[test]
    fn test_rom_is_required() {
        assert!(Args::try_parse_from(&["chip8"]).is_err());
    }
}
