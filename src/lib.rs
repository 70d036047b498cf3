//! Encoder and decoder for FA1 images, the 8192-byte program/alarm file
//! read by the CMC850 cooking controller.
//!
//! ```
//! use fa1::{decode, encode, AlarmRecord, ProgramRecord};
//!
//! let image = encode(&[ProgramRecord::new("Pulled Pork", 250)], &[AlarmRecord::new("Done", 203)])?;
//! let records = decode(image.as_bytes())?;
//! assert_eq!(records.programs[0].name, "Pulled Pork");
//! assert_eq!(records.alarms[0].temperature, 203);
//! # Ok::<(), fa1::Error>(())
//! ```

pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod format;
pub mod image;
pub mod record;

pub use codebook::{AfterTimer, PowerLevel, TimerStart};
pub use decoder::{decode, inspect, SlotReport};
pub use encoder::encode;
pub use error::{Error, RecordError, Result};
pub use image::Image;
pub use record::{AlarmRecord, ProgramRecord, Records, Timer};
