use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::time::Duration;

use log::{info, log_enabled, trace, warn, Level};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Chip8Error, LoadError};
use crate::instruction::{disassemble, from_op};
use crate::keypad::Keypad;
use crate::opcode::fetch;
use crate::operations::Inputs;
use crate::state::{FrameBuffer, State};
use crate::timing::{Scheduler, Tick};

/// What happened during a call to `Chip8::advance`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Instruction steps that ran.
    pub instructions: u32,
    /// Timer steps that emitted a tone; one per 60Hz tick while the sound timer is nonzero.
    pub tones: u32,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keypad` with public interfaces for manipulating it
///  - the random source used by `RND`
///  - a `Scheduler` deciding when instructions and timers are stepped
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU and the timers, directly or by letting time pass
/// - pausing and resuming
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    rng: Box<dyn RngCore>,
    config: Config,
    scheduler: Scheduler,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_rng(config, Box::new(StdRng::from_entropy()))
    }

    /// Uses `rng` for `RND`; seed it to make runs reproducible.
    pub fn with_rng(config: Config, rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            rng,
            config,
            scheduler: Scheduler::new(config.instruction_period(), config.timer_period()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Restores the power-on state: memory, registers, stack and keypad are cleared and the
    /// sprite sheet is reseeded.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.keypad = Keypad::new();
    }

    /// Resets, then loads a rom from `reader` at 0x200 and resumes execution.
    ///
    /// Returns the number of bytes loaded. Anything beyond `MAX_ROM_SIZE` is dropped.
    /// On failure the machine is left reset and paused.
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    pub fn load_rom(&mut self, reader: impl Read) -> Result<usize, Chip8Error> {
        self.reset();

        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        if let Err(e) = reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom) {
            return Err(self.abandon_load(LoadError::Read(e)));
        }
        if rom.len() > MAX_ROM_SIZE {
            warn!(
                "ROM is larger than {} bytes; the remainder was dropped",
                MAX_ROM_SIZE
            );
            rom.truncate(MAX_ROM_SIZE);
        }

        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        info!("loaded {} byte ROM", rom.len());

        self.resume();
        Ok(rom.len())
    }

    /// Like `load_rom`, reading the rom from a file.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<usize, Chip8Error> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => self.load_rom(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.reset();
                Err(self.abandon_load(LoadError::NotFound {
                    path: path.to_path_buf(),
                }))
            }
            Err(e) => {
                self.reset();
                Err(self.abandon_load(LoadError::Read(e)))
            }
        }
    }

    fn abandon_load(&mut self, error: LoadError) -> Chip8Error {
        warn!("{}", error);
        self.pause();
        Chip8Error::Load(error)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<(), Chip8Error> {
        if !Keypad::is_key(key) {
            return Err(Chip8Error::InvalidKey(key));
        }
        self.keypad.press(key);
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<(), Chip8Error> {
        if !Keypad::is_key(key) {
            return Err(Chip8Error::InvalidKey(key));
        }
        self.keypad.release(key);
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - gets and executes the next opcode
    /// - on a fault the state is left untouched; in strict mode the fault is returned,
    ///   otherwise it is logged and the same opcode runs again next cycle
    pub fn step_instruction(&mut self) -> Result<(), Chip8Error> {
        let op: u16 = fetch(&self.state.memory, self.state.pc);
        if log_enabled!(Level::Trace) {
            trace!(
                "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
                op,
                disassemble(&op),
                self.state.v,
                self.state.i,
                self.state.pc
            );
        }

        let mut inputs = Inputs {
            keypad: &self.keypad,
            rng: self.rng.as_mut(),
        };
        match from_op(&op).execute(&op, &self.state, &mut inputs) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(fault) if self.config.strict => Err(fault.into()),
            Err(fault) => {
                warn!("{}", fault);
                Ok(())
            }
        }
    }

    /// Decrements both timers, stopping at 0.
    ///
    /// Returns whether a tone should sound for this tick.
    pub fn step_timers(&mut self) -> bool {
        let tone = self.state.sound_timer > 0;
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
        tone
    }

    /// Lets `elapsed` pass, running every instruction and timer step that falls due.
    ///
    /// In strict mode the first fault stops the remaining steps and is returned.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Report, Chip8Error> {
        let mut report = Report::default();
        for tick in self.scheduler.advance(elapsed) {
            match tick {
                Tick::Instruction => {
                    self.step_instruction()?;
                    report.instructions += 1;
                }
                Tick::Timer => {
                    if self.step_timers() {
                        report.tones += 1;
                    }
                }
            }
        }
        Ok(report)
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn pause(&mut self) {
        if !self.is_paused() {
            info!("paused");
        }
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        if self.is_paused() {
            info!("resumed");
        }
        self.scheduler.resume();
    }

    /// Whether the frame buffer changed since it was last taken
    pub fn needs_redraw(&self) -> bool {
        self.state.draw_flag
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, and clears the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
