use hashbrown::HashMap;

use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels, the slice holds `display::HEIGHT`
    /// rows of `display::WIDTH` cells, each either `0` or `1`.
    fn display(&mut self, pixels: &[u8]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the audio based code
pub trait AudioCommands {
    /// Will be called once per tick with the sound signal of the tick.
    fn sound(&mut self, state: SoundState);
}

/// The signal for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundState {
    /// Don't stop or play sound, leave whatever is happening
    Continue,
    /// Start playing the sound
    Play,
    /// Stop playing the sound
    Stop,
}

impl Default for SoundState {
    fn default() -> Self {
        SoundState::Continue
    }
}

/// A display that does not show anything, used for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDisplay;

impl DisplayCommands for NoDisplay {
    fn display(&mut self, _pixels: &[u8]) {}
}

/// An audio device that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mute;

impl AudioCommands for Mute {
    fn sound(&mut self, _state: SoundState) {}
}

/// Will render the given pixels as text, a `#` per set cell.
pub fn render_text(pixels: &[u8]) -> String {
    let mut text = String::with_capacity(display::RESOLUTION + display::HEIGHT);
    for row in pixels.chunks(display::WIDTH) {
        text.extend(row.iter().map(|&cell| if cell != 0 { '#' } else { '.' }));
        text.push('\n');
    }
    text
}

/// Will store the last change to the given keybord
/// and represent the internal keyboard as well
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    /// Set for a single tick after any key went down.
    just_pressed: bool,
    /// The key that went down last.
    last: usize,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Will set the state of the given key, only a transition from released to
    /// pressed records the key and raises the edge.
    pub fn set_key(&mut self, key: usize, to: bool) {
        debug_assert!(key < keyboard::SIZE);
        let was = std::mem::replace(&mut self.keys[key], to);
        if to && !was {
            self.just_pressed = true;
            self.last = key;
        }
    }

    /// Clears the just pressed edge, the scheduler calls this once per tick.
    pub fn clear_edge(&mut self) {
        self.just_pressed = false;
    }

    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys[key % keyboard::SIZE]
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    pub fn last_pressed(&self) -> usize {
        self.last
    }
}

/// Maps the host key characters onto the 16 keys of the chip.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: [char; keyboard::SIZE],
    lookup: HashMap<char, usize>,
}

impl Default for Keymap {
    /// `0-9` are bound to `'0'-'9'` and `A-F` to `'A'-'F'`.
    fn default() -> Self {
        let mut bindings = ['\0'; keyboard::SIZE];
        for (binding, code) in bindings.iter_mut().zip("0123456789ABCDEF".chars()) {
            *binding = code;
        }
        Self::from_bindings(bindings)
    }
}

impl Keymap {
    pub fn new() -> Self {
        Keymap::default()
    }

    pub fn from_bindings(bindings: [char; keyboard::SIZE]) -> Self {
        let lookup = bindings
            .iter()
            .enumerate()
            .map(|(index, &code)| (code, index))
            .collect();
        Self { bindings, lookup }
    }

    /// Binds the host character to the given chip key, a previous binding
    /// of the character to another key is removed.
    pub fn bind(&mut self, key: usize, code: char) {
        if key >= keyboard::SIZE {
            log::warn!("Ignoring the binding of '{}' to the unknown key {:#X}", code, key);
            return;
        }
        if let Some(previous) = self.lookup.insert(code, key) {
            if previous != key {
                self.bindings[previous] = '\0';
            }
        }
        let old = std::mem::replace(&mut self.bindings[key], code);
        if old != code && self.lookup.get(&old) == Some(&key) {
            self.lookup.remove(&old);
        }
    }

    pub fn binding(&self, key: usize) -> char {
        self.bindings[key]
    }

    /// Will translate the host character into the chip key.
    ///
    /// Characters without a binding that are a hex digit map onto their
    /// own value, everything else is ignored.
    ///
    /// # Example
    /// ```rust
    /// # use chip::devices::Keymap;
    /// let mut keymap = Keymap::new();
    /// keymap.bind(0x5, 'W');
    /// assert_eq!(keymap.lookup('W'), Some(0x5));
    /// assert_eq!(keymap.lookup('5'), Some(0x5));
    /// assert_eq!(keymap.lookup('Z'), None);
    /// ```
    pub fn lookup(&self, code: char) -> Option<usize> {
        if let Some(&key) = self.lookup.get(&code) {
            return Some(key);
        }
        match code {
            '0'..='9' | 'A'..='F' => code.to_digit(16).map(|digit| digit as usize),
            _ => None,
        }
    }
}
