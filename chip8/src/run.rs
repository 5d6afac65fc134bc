use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chip8_core::{Chip8, Config, FrameBuffer};

pub struct Options {
    pub frames: Option<u64>,
    pub seed: Option<u64>,
    pub dump: bool,
}

pub fn run(rom: PathBuf, config: Config, options: Options) -> anyhow::Result<()> {
    let mut chip8 = match options.seed {
        Some(seed) => Chip8::with_rng(config, Box::new(StdRng::seed_from_u64(seed))),
        None => Chip8::with_config(config),
    };

    chip8.load_rom_file(&rom)?;

    // Each pass of the loop emulates one 60Hz frame; the remainder of it is slept off
    let frame_time = Config::default().timer_period();
    let mut frames: u64 = 0;

    while options.frames.map_or(true, |limit| frames < limit) {
        let frame_start = Instant::now();

        let report = chip8.advance(frame_time)?;
        if report.tones > 0 {
            debug!("beep ({} ticks)", report.tones);
        }
        frames += 1;

        let elapsed = frame_start.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    if options.dump {
        let mut stdout = io::stdout().lock();
        stdout.write_all(render(chip8.frame()).as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

/// Draws lit pixels as full blocks, one line per row
fn render(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .map(|row| {
            let mut line: String = row
                .iter()
                .map(|&pixel| if pixel == 1 { '█' } else { ' ' })
                .collect();
            line.push('\n');
            line
        })
        .collect()
}
