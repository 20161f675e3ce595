use {
    crate::{
        definitions::{cpu, display, keyboard, memory},
        devices::{DisplayCommands, Keyboard, Keymap, SoundState},
        opcode::{self, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        quirks::{CompatibilityMode, Quirks},
        resources::Rom,
        settings::Settings,
        timer::Timer,
        LoadError, ProcessError,
    },
    rand::RngCore,
};

/// The summary of a single scheduler tick, handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The renderer was called during this tick.
    pub redraw: bool,
    /// The signal for the audio collaborator.
    pub sound: SoundState,
    /// How many instructions were executed.
    pub executed: usize,
    /// Set if the instruction loop stopped early.
    pub fault: Option<ProcessError>,
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x04F` - The built in `4x5` pixel font set (`0-F`)
    /// - `0x050-0x1FF` - Reserved for the interpreter
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; here we are using `16`.
    pub(super) stack: [u16; cpu::stack::SIZE],
    /// Points to the next free stack entry, ranges `0-16`.
    pub(super) stack_pointer: usize,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    /// Counts down once per tick, until it reaches 0.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    /// Counts down once per tick, until it reaches 0.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row by row with a single byte `(1 or 0)` per pixel.
    pub(super) display: Vec<u8>,
    /// The state of the hex keypad.
    pub(super) keyboard: Keyboard,
    /// Translates the host characters into keypad keys.
    pub(super) keymap: Keymap,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) settings: Settings,
    /// The quirks looked up from `settings.mode`.
    pub(super) quirks: Quirks,
    /// Paused when false, the scheduler then leaves the state untouched.
    pub(super) running: bool,
    /// An instruction requested a redraw since the last frame acknowledgment.
    pub(super) redraw: bool,
    /// The sound signal of the current tick.
    pub(super) sound_state: SoundState,
    /// `FX0A` has seen a key go down and waits for it to be released.
    pub(super) awaiting_key_release: bool,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl ChipSet {
    /// will create a new chipset object, it starts paused until a program is loaded
    pub fn new(settings: Settings) -> Self {
        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        Self {
            name: String::new(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER as u16,
            stack: [0; cpu::stack::SIZE],
            stack_pointer: 0,
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display: vec![0; display::RESOLUTION],
            keyboard: Keyboard::new(),
            keymap: Keymap::new(),
            rng: Box::new(rand::rngs::OsRng),
            quirks: Quirks::for_mode(settings.mode),
            settings,
            running: false,
            redraw: false,
            sound_state: SoundState::default(),
            awaiting_key_release: false,
        }
    }

    /// Will create the chipset and load the given rom right away.
    pub fn with_rom(settings: Settings, rom: &Rom) -> Result<Self, LoadError> {
        let mut chip = Self::new(settings);
        chip.load_rom(rom)?;
        Ok(chip)
    }

    /// Will copy the program into memory and restart execution at its beginning.
    ///
    /// Only the program counter and the display are reset, registers, timers and the
    /// stack keep their values. A program that does not fit leaves the state untouched.
    pub fn load_program(&mut self, data: &[u8]) -> Result<(), LoadError> {
        if data.len() > cpu::PROGRAM_CAPACITY {
            return Err(LoadError::RomTooLarge {
                size: data.len(),
                capacity: cpu::PROGRAM_CAPACITY,
            });
        }

        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())]
            .copy_from_slice(data);
        self.program_counter = cpu::PROGRAM_COUNTER as u16;
        self.display.fill(0);
        self.running = true;

        log::info!("Loaded a program of {} bytes", data.len());
        Ok(())
    }

    /// Will load the rom data and remember its name.
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), LoadError> {
        self.load_program(rom.get_data())?;
        self.name = rom.get_name().to_string();
        log::info!("Running '{}'", self.name);
        Ok(())
    }

    /// will advance the program by a single step
    pub fn execute_one(&mut self) -> Result<Operation, ProcessError> {
        // get next opcode
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter as usize)?;
        let instruction = Instruction::decode(self.opcode);
        log::debug!("{:#06X}: {}", self.program_counter, instruction);

        let operation = self.execute(instruction);
        if operation == Operation::Draw {
            self.redraw = true;
        }
        Ok(operation)
    }

    /// Runs a single scheduler tick, the host is expected to call this
    /// `settings.ticks_per_second` times a second.
    ///
    /// The timers are decremented before the instruction quota runs, the
    /// renderer is called at most once and only after all the instructions
    /// of the tick have been executed.
    pub fn tick<D>(&mut self, display: &mut D) -> Frame
    where
        D: DisplayCommands + ?Sized,
    {
        if !self.running {
            self.sound_state = SoundState::Stop;
            if self.redraw {
                display.display(&self.display);
            }
            return Frame {
                redraw: self.redraw,
                sound: self.sound_state,
                executed: 0,
                fault: None,
            };
        }

        self.redraw = false;
        self.sound_state = SoundState::Continue;

        self.delay_timer.tick();
        if self.sound_timer.tick() {
            self.sound_state = SoundState::Stop;
        }

        let mut executed = 0;
        let mut fault = None;
        for _ in 0..self.settings.instructions_per_tick {
            match self.execute_one() {
                Ok(_) => executed += 1,
                Err(err) => {
                    log::warn!("Stopping the tick: {}", err);
                    fault = Some(err);
                    break;
                }
            }
        }

        if self.redraw {
            display.display(&self.display);
        }

        // the edge is visible to every instruction of the tick
        self.keyboard.clear_edge();

        Frame {
            redraw: self.redraw,
            sound: self.sound_state,
            executed,
            fault,
        }
    }

    /// The end of frame hook for the host, the pending redraw is dropped.
    pub fn acknowledge_frame(&mut self) {
        self.redraw = false;
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            log::info!("{}", if running { "Resuming" } else { "Pausing" });
        }
        self.running = running;
    }

    /// Will toggle between running and paused, returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.set_running(!self.running);
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        if key >= keyboard::SIZE {
            log::warn!("Ignoring the unknown key {:#X}", key);
            return;
        }
        self.keyboard.set_key(key, to)
    }

    /// Will translate the host character with the keymap and set the key,
    /// returns the key if the character is mapped.
    pub fn set_host_key(&mut self, code: char, to: bool) -> Option<usize> {
        let key = self.keymap.lookup(code)?;
        self.keyboard.set_key(key, to);
        Some(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn get_keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn get_keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Will switch the compatibility mode, takes effect with the next instruction.
    pub fn set_mode(&mut self, mode: CompatibilityMode) {
        self.settings.mode = mode;
        self.quirks = Quirks::for_mode(mode);
    }

    pub fn get_mode(&self) -> CompatibilityMode {
        self.settings.mode
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Will replace the random number generator used by `CXNN`.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    pub fn get_sound_state(&self) -> SoundState {
        self.sound_state
    }

    /// Will return a immutable slice of the current display configuration,
    /// row by row.
    pub fn get_display(&self) -> &[u8] {
        &self.display
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    /// Will push the return address to the stack, a full stack wraps around
    /// and overwrites the oldest entry.
    pub(super) fn push_stack(&mut self, pointer: u16) {
        if self.stack_pointer >= cpu::stack::SIZE {
            log::warn!("Stack overflow at {:#06X}, wrapping around", self.program_counter);
            self.stack_pointer = 0;
        }
        self.stack[self.stack_pointer] = pointer;
        self.stack_pointer += 1;
    }

    /// Will pop from the stack, an empty stack wraps around to the top entry.
    pub(super) fn pop_stack(&mut self) -> u16 {
        if self.stack_pointer == 0 {
            log::warn!("Stack underflow at {:#06X}, wrapping around", self.program_counter);
            self.stack_pointer = cpu::stack::SIZE;
        }
        self.stack_pointer -= 1;
        self.stack[self.stack_pointer]
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}
