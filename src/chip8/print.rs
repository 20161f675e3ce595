//! The pretty print implementation of the [`ChipSet`](super::ChipSet), split up into this
//! file as the formatting helpers take up a fair amount of lines.

use super::ChipSet;
use once_cell::sync::Lazy;
use std::fmt::{self, Write};

/// How many entries are printed per row, has to be bigger then 0
const PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// The width of a formatted integer, `0x` and four hex digits.
const INTSIZE: usize = 6;

/// The length of a formatted `from - to :` pointer prefix.
static POINTER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut line = String::new();
    match pointer_print::formatter(&mut line, 0, 0) {
        Ok(()) => line.len(),
        Err(_) => 2 * INTSIZE + 5,
    }
});

/// A line length estimate (a bit bigger then the actual line will be).
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + PRINT_STEP * (INTSIZE + 1) + 1 + *POINTER_LEN);

/// Will add an indent
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

/// Will drop the trailing newline of a block.
fn trim_last_line(text: &mut String) {
    if text.ends_with(END_OF_LINE) {
        text.pop();
    }
}

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    /// will format the pointers as `0x0000 - 0x0007 :`
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(line, "{:#06X} - {:#06X} :", from, to)
    }
}

/// handles printing of any and all of the unsigned integers.
mod integer_print {
    use super::{indent_helper, pointer_print, trim_last_line, END_OF_LINE, PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format a single integer
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, "{:#06X}", data)
    }

    /// will pretty print all the integer data given, the pointers are
    /// calculated from the beginning of the slice
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / PRINT_STEP + 1));
        for (row, chunk) in data.chunks(PRINT_STEP).enumerate() {
            let from = row * PRINT_STEP;
            indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            write!(res, "{}", END_OF_LINE)?;
        }
        trim_last_line(&mut res);
        Ok(res)
    }
}

/// Handles the keypad, printed in the layout of the hex keypad.
mod keyboard_print {
    use super::{indent_helper, trim_last_line, END_OF_LINE};
    use crate::definitions::keyboard;

    pub(super) fn printer(keys: &[bool], indent: usize) -> String {
        let mut res = String::new();
        for row in keyboard::LAYOUT.iter() {
            indent_helper(&mut res, indent);
            let cells: Vec<String> = row
                .iter()
                .map(|&key| {
                    if keys[key] {
                        format!("[{:X}]", key)
                    } else {
                        format!(" {:X} ", key)
                    }
                })
                .collect();
            res.push_str(&cells.join(" "));
            res.push(END_OF_LINE);
        }
        trim_last_line(&mut res);
        res
    }
}

/// Handles all the opcode prints
mod memory_print {
    use super::{indent_helper, integer_print, pointer_print, trim_last_line, END_OF_LINE, PRINT_STEP};
    use crate::{definitions::memory, opcode::Opcode};
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The amount of bytes a row covers.
    const POINTER_INCREMENT: usize = PRINT_STEP * memory::opcodes::SIZE;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used in the case that there is at least one
    /// row of only zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let mut zero = String::new();
        if integer_print::formatter(&mut zero, 0u16).is_err() {
            return FILLER_BASE.to_string();
        }
        let length = zero.len() * (PRINT_STEP - 2) + (PRINT_STEP - 1) - FILLER_BASE.len();
        let filler = " ".repeat(length / 2);
        format!("{}{}{}{}{}", zero, filler, FILLER_BASE, filler, zero)
    });

    /// a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; PRINT_STEP],
        only_null: bool,
    }

    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(&mut res, self.from, self.to)?;

            if self.only_null {
                res.push(' ');
                res.push_str(&ZERO_FILLER);
            } else {
                for entry in self.data.iter() {
                    res.push(' ');
                    integer_print::formatter(&mut res, *entry)?;
                }
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory as opcodes, consecutive
    /// rows of only zeros are collapsed into a single one
    pub(super) fn printer(data: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(data.len() / POINTER_INCREMENT + 1);

        for (index, chunk) in data.chunks(POINTER_INCREMENT).enumerate() {
            let from = index * POINTER_INCREMENT;
            let mut row = Row {
                from,
                to: from + chunk.len() - 1,
                data: [0; PRINT_STEP],
                only_null: true,
            };
            for (entry, pair) in row.data.iter_mut().zip(chunk.chunks(memory::opcodes::SIZE)) {
                *entry = match *pair {
                    [high, low] => Opcode::from_be_bytes([high, low]),
                    [high] => Opcode::from_be_bytes([high, 0]),
                    _ => 0,
                };
            }
            row.only_null = row.data.iter().all(|&entry| entry == 0);

            if row.only_null {
                if let Some(last) = rows.last() {
                    if last.only_null {
                        row.from = last.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row);
        }

        let mut res = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            indent_helper(&mut res, indent);
            write!(res, "{}{}", row, END_OF_LINE)?;
        }
        trim_last_line(&mut res);
        Ok(res)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut nam = String::with_capacity(INDENT_SIZE + self.name.len());
        indent_helper(&mut nam, INDENT_SIZE);
        nam.push_str(&self.name);

        let mut mode = String::new();
        indent_helper(&mut mode, INDENT_SIZE);
        write!(mode, "{}", self.settings.mode)?;

        let mut opc = String::with_capacity(INTSIZE + INDENT_SIZE);
        indent_helper(&mut opc, INDENT_SIZE);
        integer_print::formatter(&mut opc, self.opcode)?;

        let mut prc = String::with_capacity(INTSIZE + INDENT_SIZE);
        indent_helper(&mut prc, INDENT_SIZE);
        integer_print::formatter(&mut prc, self.program_counter)?;

        let mut idx = String::with_capacity(INTSIZE + INDENT_SIZE);
        indent_helper(&mut idx, INDENT_SIZE);
        integer_print::formatter(&mut idx, self.index_register)?;

        let mut tim = String::new();
        indent_helper(&mut tim, INDENT_SIZE);
        write!(
            tim,
            "delay {} sound {}",
            self.delay_timer.get_value(),
            self.sound_timer.get_value()
        )?;

        let mem = memory_print::printer(&self.memory, INDENT_SIZE)?;
        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;
        let sta = integer_print::printer(&self.stack, INDENT_SIZE)?;
        let key = keyboard_print::printer(self.keyboard.get_keys(), INDENT_SIZE);

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tMode :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex :\n{}\n\
                \tTimers :\n{}\n\
                \tRegister :\n{}\n\
                \tStack :\n{}\n\
                \tKeyboard :\n{}\n\
                \tMemory :\n{}\n\
                }}",
            nam, mode, opc, prc, idx, tim, reg, sta, key, mem
        )
    }
}
