use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codebook::{AfterTimer, PowerLevel, TimerStart};
use crate::error::RecordError;

/// Cooking timer of a program. A zero duration and `Off` are the same thing
/// on the device, so [`Timer::from_parts`] folds one into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timer {
    #[default]
    Off,
    Duration { hours: u8, minutes: u8, seconds: u8 },
}

impl Timer {
    pub fn from_parts(hours: u8, minutes: u8, seconds: u8) -> Self {
        if hours == 0 && minutes == 0 && seconds == 0 {
            Timer::Off
        } else {
            Timer::Duration {
                hours,
                minutes,
                seconds,
            }
        }
    }

    /// `(hours, minutes, seconds)` as stored in the entry.
    pub fn parts(&self) -> (u8, u8, u8) {
        match *self {
            Timer::Off => (0, 0, 0),
            Timer::Duration {
                hours,
                minutes,
                seconds,
            } => (hours, minutes, seconds),
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timer::Off => write!(f, "off"),
            Timer::Duration {
                hours,
                minutes,
                seconds,
            } => write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds),
        }
    }
}

impl FromStr for Timer {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "off" || s == "no timer" {
            return Ok(Timer::Off);
        }

        let invalid = || RecordError::InvalidTimer(s.to_string());
        let mut parts = s.split(':').map(|p| p.trim().parse::<u8>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(h)), Some(Ok(m)), Some(Ok(sec)), None) => Ok(Timer::from_parts(h, m, sec)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Timer {
    type Error = RecordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timer> for String {
    fn from(timer: Timer) -> Self {
        timer.to_string()
    }
}

/// Characters trimmed from both ends of a decoded name.
///
/// Only the bytes 0x00..=0xFF can show up in a decoded name, and of those
/// the controller software treats tab, LF, VT, FF, CR, space and NBSP as
/// padding. U+0085 (NEL) is not padding.
pub fn is_name_padding(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r' | ' ' | '\u{a0}')
}

/// A name survives encode then decode unchanged when it is non-empty, has
/// no NUL and no padding at either end. ASCII is checked separately.
pub fn is_stable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('\0') && name.trim_matches(is_name_padding) == name
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramRecord {
    pub name: String,
    pub temperature: u16,
    pub power_level: PowerLevel,
    pub timer: Timer,
    pub timer_start: TimerStart,
    pub after_timer: AfterTimer,
}

impl ProgramRecord {
    pub fn new(name: impl Into<String>, temperature: u16) -> Self {
        Self {
            name: name.into(),
            temperature,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmRecord {
    pub name: String,
    pub temperature: u16,
}

impl AlarmRecord {
    pub fn new(name: impl Into<String>, temperature: u16) -> Self {
        Self {
            name: name.into(),
            temperature,
        }
    }
}

/// Both record lists of one image, in slot order.
///
/// This is also the JSON document the command line reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub programs: Vec<ProgramRecord>,
    pub alarms: Vec<AlarmRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_text_forms() {
        assert_eq!("off".parse::<Timer>().unwrap(), Timer::Off);
        assert_eq!("".parse::<Timer>().unwrap(), Timer::Off);
        assert_eq!("no timer".parse::<Timer>().unwrap(), Timer::Off);
        assert_eq!("00:00:00".parse::<Timer>().unwrap(), Timer::Off);
        assert_eq!("1:02:3".parse::<Timer>().unwrap(), Timer::from_parts(1, 2, 3));
        assert_eq!(Timer::from_parts(72, 0, 5).to_string(), "72:00:05");
    }

    #[test]
    fn stable_names() {
        assert!(is_stable_name("Ribs"));
        assert!(is_stable_name("Low and slow"));
        for unstable in ["", "   ", "\0Ribs", "Ri\0bs", " Ribs", "Ribs ", "\u{0b}Ribs", "Ribs\t"] {
            assert!(!is_stable_name(unstable), "{unstable:?}");
        }
    }

    #[test]
    fn malformed_timers_are_rejected() {
        for bad in ["1:2", "aa:00:00", "01:02:03:04", "300:00:00"] {
            assert!(bad.parse::<Timer>().is_err(), "{bad}");
        }
    }

    #[test]
    fn program_json_uses_camel_case_labels() {
        let program = ProgramRecord {
            name: "Brisket".into(),
            temperature: 225,
            power_level: PowerLevel::Medium,
            timer: Timer::from_parts(12, 30, 0),
            timer_start: TimerStart::AtSetTemperature,
            after_timer: AfterTimer::KeepWarm,
        };
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["powerLevel"], "Medium");
        assert_eq!(json["timer"], "12:30:00");
        assert_eq!(json["timerStart"], "At Set Temperature");
        assert_eq!(json["afterTimer"], "Keep Warm");

        let back: ProgramRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn records_document_tolerates_missing_lists() {
        let records: Records =
            serde_json::from_str(r#"{"alarms": [{"name": "Probe", "temperature": 165}]}"#).unwrap();
        assert!(records.programs.is_empty());
        assert_eq!(records.alarms, vec![AlarmRecord::new("Probe", 165)]);
    }

    #[test]
    fn missing_program_fields_take_defaults() {
        let program: ProgramRecord =
            serde_json::from_str(r#"{"name": "Sear", "temperature": 400}"#).unwrap();
        assert_eq!(program, ProgramRecord::new("Sear", 400));
        assert_eq!(program.timer, Timer::Off);
    }
}
