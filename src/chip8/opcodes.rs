use crate::{
    definitions::{cpu, display, keyboard, memory},
    devices::SoundState,
    opcode::{ArithmeticOp, ChipOpcodes, KeyOp, MiscOp, Operation, ProgramCounterStep, System},
};

use super::ChipSet;

/// The highest address `I` may point to before `FX1E` raises the overflow flag.
const INDEX_LIMIT: u16 = (memory::SIZE - 1) as u16;

impl ChipSet {
    /// Will read the memory at `I + offset`, wrapping around the memory end.
    fn memory_at(&self, offset: usize) -> usize {
        (self.index_register as usize + offset) % memory::SIZE
    }
}

impl ChipOpcodes for ChipSet {
    fn system(&mut self, op: System) -> (ProgramCounterStep, Operation) {
        match op {
            System::Clear => {
                // 00E0
                // clear display
                self.display.fill(0);
                (ProgramCounterStep::Advance, Operation::Draw)
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.pop_stack();
                (ProgramCounterStep::Jump(pc), Operation::None)
            }
        }
    }

    fn jump(&mut self, nnn: u16) -> ProgramCounterStep {
        // 1NNN
        ProgramCounterStep::Jump(nnn)
    }

    fn call(&mut self, nnn: u16) -> ProgramCounterStep {
        // 2NNN
        // the return address is the instruction after the call
        let next = ProgramCounterStep::Advance.apply(self.program_counter);
        self.push_stack(next);
        ProgramCounterStep::Jump(nnn)
    }

    fn skip_if_equal(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // 3XNN
        ProgramCounterStep::cond(self.registers[x] == nn)
    }

    fn skip_if_not_equal(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // 4XNN
        ProgramCounterStep::cond(self.registers[x] != nn)
    }

    fn skip_if_registers_equal(&mut self, x: usize, y: usize) -> ProgramCounterStep {
        // 5XY0
        ProgramCounterStep::cond(self.registers[x] == self.registers[y])
    }

    fn set_register(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // 6XNN
        self.registers[x] = nn;
        ProgramCounterStep::Advance
    }

    fn add_constant(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // 7XNN
        // let VX overflow, but ignore carry
        self.registers[x] = self.registers[x].wrapping_add(nn);
        ProgramCounterStep::Advance
    }

    fn arithmetic(&mut self, op: ArithmeticOp, x: usize, y: usize) -> ProgramCounterStep {
        // VF may be one of the operands, so both are read before anything is written
        let (vx, vy) = (self.registers[x], self.registers[y]);
        let logic_flag = if self.quirks.logic_resets_flag {
            Some(0)
        } else {
            None
        };
        let shift_source = if self.quirks.shift_reads_vy { vy } else { vx };

        let (result, flag) = match op {
            // 8XY0
            ArithmeticOp::Assign => (vy, None),
            // 8XY1
            ArithmeticOp::Or => (vx | vy, logic_flag),
            // 8XY2
            ArithmeticOp::And => (vx & vy, logic_flag),
            // 8XY3
            ArithmeticOp::Xor => (vx ^ vy, logic_flag),
            ArithmeticOp::Add => {
                // 8XY4
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            // 8XY5
            ArithmeticOp::Sub => (vx.wrapping_sub(vy), Some((vx >= vy) as u8)),
            // 8XY6
            ArithmeticOp::ShiftRight => (shift_source >> 1, Some(shift_source & 0x01)),
            // 8XY7
            ArithmeticOp::SubReverse => (vy.wrapping_sub(vx), Some((vy >= vx) as u8)),
            // 8XYE
            ArithmeticOp::ShiftLeft => (shift_source << 1, Some(shift_source >> 7)),
        };

        self.registers[x] = result;
        // the flag wins if VF was the target
        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        ProgramCounterStep::Advance
    }

    fn skip_if_registers_not_equal(&mut self, x: usize, y: usize) -> ProgramCounterStep {
        // 9XY0
        ProgramCounterStep::cond(self.registers[x] != self.registers[y])
    }

    fn set_index(&mut self, nnn: u16) -> ProgramCounterStep {
        // ANNN
        self.index_register = nnn;
        ProgramCounterStep::Advance
    }

    fn jump_with_offset(&mut self, x: usize, nnn: u16) -> ProgramCounterStep {
        // BNNN
        let offset = if self.quirks.jump_offset_uses_v0 {
            self.registers[0]
        } else {
            self.registers[x]
        };
        ProgramCounterStep::Jump(nnn + offset as u16)
    }

    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // CXNN
        self.registers[x] = (self.rng.next_u32() as u8) & nn;
        ProgramCounterStep::Advance
    }

    fn draw(&mut self, x: usize, y: usize, n: usize) -> (ProgramCounterStep, Operation) {
        // DXYN
        // the origin wraps around, the sprite itself is clipped
        let origin_x = self.registers[x] as usize % display::WIDTH;
        let origin_y = self.registers[y] as usize % display::HEIGHT;
        self.registers[cpu::register::LAST] = 0;

        for row in 0..n {
            let py = origin_y + row;
            if py >= display::HEIGHT {
                break;
            }
            let sprite = self.memory[self.memory_at(row)];

            for column in 0..8 {
                if sprite & (0x80 >> column) == 0 {
                    continue;
                }
                let px = origin_x + column;
                if px >= display::WIDTH {
                    break;
                }

                let cell = &mut self.display[py * display::WIDTH + px];
                if *cell != 0 {
                    self.registers[cpu::register::LAST] = 1;
                }
                *cell ^= 1;
            }
        }

        (ProgramCounterStep::Advance, Operation::Draw)
    }

    fn key(&mut self, op: KeyOp, x: usize) -> ProgramCounterStep {
        let pressed = self.keyboard.is_pressed(self.registers[x] as usize);
        match op {
            // EX9E
            KeyOp::SkipPressed => ProgramCounterStep::cond(pressed),
            // EXA1
            KeyOp::SkipNotPressed => ProgramCounterStep::cond(!pressed),
        }
    }

    fn misc(&mut self, op: MiscOp, x: usize) -> ProgramCounterStep {
        let vx = self.registers[x];
        match op {
            MiscOp::GetDelayTimer => {
                // FX07
                self.registers[x] = self.delay_timer.get_value();
            }
            MiscOp::AwaitKeyPress => {
                // FX0A
                // first wait for a key to go down, then for the same key to be released
                if !self.awaiting_key_release {
                    if self.keyboard.just_pressed() {
                        self.awaiting_key_release = true;
                    }
                    return ProgramCounterStep::Suspend;
                }

                let key = self.keyboard.last_pressed();
                if self.keyboard.is_pressed(key) {
                    return ProgramCounterStep::Suspend;
                }
                self.registers[x] = key as u8;
                self.awaiting_key_release = false;
            }
            MiscOp::SetDelayTimer => {
                // FX15
                self.delay_timer.set_value(vx);
            }
            MiscOp::SetSoundTimer => {
                // FX18
                self.sound_timer.set_value(vx);
                self.sound_state = if vx > 0 {
                    SoundState::Play
                } else {
                    SoundState::Stop
                };
            }
            MiscOp::AddToIndex => {
                // FX1E
                self.index_register = self.index_register.wrapping_add(vx as u16);
                if self.quirks.index_overflow_sets_flag && self.index_register > INDEX_LIMIT {
                    self.registers[cpu::register::LAST] = 1;
                }
            }
            MiscOp::FontAddress => {
                // FX29
                let glyph = vx as usize % keyboard::SIZE;
                self.index_register =
                    (display::fontset::LOCATION + glyph * display::fontset::GLYPH_HEIGHT) as u16;
            }
            MiscOp::StoreBcd => {
                // FX33
                // 246 => [2, 4, 6]
                let digits = [vx / 100, vx / 10 % 10, vx % 10];
                for (offset, digit) in digits.iter().enumerate() {
                    let address = self.memory_at(offset);
                    self.memory[address] = *digit;
                }
            }
            MiscOp::StoreRegisters => {
                // FX55
                for offset in 0..=x {
                    let address = self.memory_at(offset);
                    self.memory[address] = self.registers[offset];
                }
                if self.quirks.load_store_advances_index {
                    self.index_register = self.index_register.wrapping_add(x as u16 + 1);
                }
            }
            MiscOp::LoadRegisters => {
                // FX65
                for offset in 0..=x {
                    self.registers[offset] = self.memory[self.memory_at(offset)];
                }
                if self.quirks.load_store_advances_index {
                    self.index_register = self.index_register.wrapping_add(x as u16 + 1);
                }
            }
        }
        ProgramCounterStep::Advance
    }
}
