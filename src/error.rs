use thiserror::Error;

/// Errors raised while the interpreter is executing.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Program counter out of range, there can not be an opcode at {pointer:#06X} if memory len is {len:#06X}")]
    ProgramCounterOutOfRange { pointer: usize, len: usize },
}

/// Errors raised while loading a program into memory.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadError {
    #[error("The rom is too large ({size} bytes), only {capacity} bytes fit into memory.")]
    RomTooLarge { size: usize, capacity: usize },
}

/// Errors raised while acquiring rom data.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Unable to read the rom '{0}'.")]
    Io(#[from] std::io::Error),
    #[error("Invalid rom archive '{0}'.")]
    Archive(#[from] zip::result::ZipError),
}

/// Errors raised while reading the configuration.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Unknown compatibility mode '{0}'.")]
    UnknownMode(String),
    #[error("Invalid value '{value}' for setting '{key}'.")]
    InvalidValue { key: &'static str, value: String },
}
