//! Error types for the FA1 codec.
//!
//! Only structural problems surface here. A slot that holds garbage decodes
//! to nothing and an unknown enum ordinal decodes to its codebook default;
//! neither is an error.

use thiserror::Error;

use crate::format::{Section, IMAGE_LEN, SECTION_CAPACITY, TEMP_MAX};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("image is {len} bytes, expected at least {}", IMAGE_LEN)]
    ImageTooShort { len: usize },

    #[error("{count} {section:?} do not fit, an image holds at most {}", SECTION_CAPACITY)]
    Capacity { section: Section, count: usize },

    #[error("{section:?}[{index}]: temperature {temperature} is above {}", TEMP_MAX)]
    TemperatureOutOfRange {
        section: Section,
        index: usize,
        temperature: u16,
    },

    /// Names are written one byte per character, so only ASCII survives a
    /// round trip.
    #[error("{section:?}[{index}]: name {name:?} contains non-ASCII characters")]
    UnsupportedName {
        section: Section,
        index: usize,
        name: String,
    },

    /// The decoder trims names and stops at the first NUL, so a name that
    /// would change or vanish on the way back is rejected up front.
    #[error("{section:?}[{index}]: name {name:?} is blank, contains NUL or has surrounding whitespace")]
    InvalidName {
        section: Section,
        index: usize,
        name: String,
    },
}

/// Failure to read a record field from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("timer {0:?} is not \"off\" or HH:MM:SS")]
    InvalidTimer(String),
}
