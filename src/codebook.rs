//! Ordinal <-> label codebooks for the fields packed into the control byte.
//!
//! Every codebook has the same fallback rule: an unknown label or an
//! unknown ordinal resolves to the first entry. Encoding and decoding share
//! these tables, so the power level table has all four levels in both
//! directions.

use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

macro_rules! codebook {
    ($ty:ident { $($variant:ident = $ordinal:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn ordinal(self) -> u8 {
                match self {
                    $($ty::$variant => $ordinal),+
                }
            }

            pub fn from_ordinal(ordinal: u8) -> Self {
                match ordinal {
                    $($ordinal => $ty::$variant,)+
                    _ => Self::default(),
                }
            }

            /// Looks up a label, falling back to the first entry.
            pub fn from_label(label: &str) -> Self {
                label.parse().unwrap_or_default()
            }
        }

        impl From<String> for $ty {
            fn from(label: String) -> Self {
                Self::from_label(&label)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    };
}

#[derive(Display, FromStr, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PowerLevel {
    #[default]
    Slow,
    Medium,
    Fast,
    Max,
}

codebook!(PowerLevel {
    Slow = 0,
    Medium = 1,
    Fast = 2,
    Max = 3,
});

#[derive(Display, FromStr, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimerStart {
    #[default]
    #[display("At Beginning")]
    AtBeginning,
    #[display("At Set Temperature")]
    AtSetTemperature,
    #[display("At Prompt")]
    AtPrompt,
}

codebook!(TimerStart {
    AtBeginning = 0,
    AtSetTemperature = 1,
    AtPrompt = 2,
});

#[derive(Display, FromStr, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AfterTimer {
    #[default]
    #[display("Continue Cooking")]
    ContinueCooking,
    #[display("Stop Cooking")]
    StopCooking,
    #[display("Keep Warm")]
    KeepWarm,
    #[display("Repeat Timer")]
    RepeatTimer,
}

codebook!(AfterTimer {
    ContinueCooking = 0,
    StopCooking = 1,
    KeepWarm = 2,
    RepeatTimer = 3,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_device_wording() {
        assert_eq!(TimerStart::AtSetTemperature.to_string(), "At Set Temperature");
        assert_eq!(AfterTimer::RepeatTimer.to_string(), "Repeat Timer");
        assert_eq!(PowerLevel::Max.to_string(), "Max");
        assert_eq!(AfterTimer::from_label("Keep Warm"), AfterTimer::KeepWarm);
    }

    #[test]
    fn ordinals_are_symmetric() {
        for level in PowerLevel::ALL {
            assert_eq!(PowerLevel::from_ordinal(level.ordinal()), *level);
        }
        for start in TimerStart::ALL {
            assert_eq!(TimerStart::from_ordinal(start.ordinal()), *start);
        }
        for after in AfterTimer::ALL {
            assert_eq!(AfterTimer::from_ordinal(after.ordinal()), *after);
        }
    }

    #[test]
    fn unknown_values_fall_back_to_first_entry() {
        assert_eq!(TimerStart::from_ordinal(3), TimerStart::AtBeginning);
        assert_eq!(PowerLevel::from_ordinal(200), PowerLevel::Slow);
        assert_eq!(PowerLevel::from_label("Turbo"), PowerLevel::Slow);
        assert_eq!(AfterTimer::from_label(""), AfterTimer::ContinueCooking);
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&TimerStart::AtPrompt).unwrap();
        assert_eq!(json, "\"At Prompt\"");
        let parsed: AfterTimer = serde_json::from_str("\"Stop Cooking\"").unwrap();
        assert_eq!(parsed, AfterTimer::StopCooking);
        let unknown: PowerLevel = serde_json::from_str("\"Nuclear\"").unwrap();
        assert_eq!(unknown, PowerLevel::Slow);
    }
}
