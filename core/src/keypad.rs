use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// Keys are identified by their hex value and start released.
/// Mapping physical keys onto these is left to whoever owns the window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `key` is a valid key code.
    pub fn is_key(key: u8) -> bool {
        (key as usize) < KEY_COUNT
    }

    /// Codes that don't name a key are ignored.
    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    fn set(&mut self, key: u8, pressed: bool) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = pressed;
        }
    }

    /// Codes that don't name a key read as released.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest key code currently held down, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|&p| p).map(|k| k as u8)
    }
}
