//! Checksum and bit-packing helpers shared by the encoder and decoder.

use crate::codebook::{AfterTimer, PowerLevel, TimerStart};
use crate::format::{CHECKSUM_OFFSET, TEMP_MOD};

/// Bit 7 of the control byte: the stored temperature is offset by 255.
pub const EXTENSION_FLAG: u8 = 0x80;

const AFTER_TIMER_SHIFT: u8 = 5;
const POWER_LEVEL_SHIFT: u8 = 2;
const TIMER_START_SHIFT: u8 = 0;
const TWO_BITS: u8 = 0x03;

/// Unsigned sum, modulo 256, of the bytes preceding the checksum byte.
///
/// A slice shorter than an entry sums what it has.
pub fn checksum(entry: &[u8]) -> u8 {
    entry
        .iter()
        .take(CHECKSUM_OFFSET)
        .fold(0u8, |sum, b| sum.wrapping_add(*b))
}

/// Splits a temperature into its stored byte and the extension flag.
///
/// Values above 255 are stored as `t - 255` with the flag set. The caller
/// guarantees `t <= TEMP_MAX`.
pub fn split_temperature(t: u16) -> (u8, bool) {
    if t > TEMP_MOD {
        ((t - TEMP_MOD) as u8, true)
    } else {
        (t as u8, false)
    }
}

pub fn join_temperature(low: u8, extended: bool) -> u16 {
    if extended {
        low as u16 + TEMP_MOD
    } else {
        low as u16
    }
}

/// Control byte without the extension flag.
pub fn pack_control(after: AfterTimer, power: PowerLevel, start: TimerStart) -> u8 {
    ((after.ordinal() & TWO_BITS) << AFTER_TIMER_SHIFT)
        | ((power.ordinal() & TWO_BITS) << POWER_LEVEL_SHIFT)
        | ((start.ordinal() & TWO_BITS) << TIMER_START_SHIFT)
}

pub fn unpack_control(control: u8) -> (AfterTimer, PowerLevel, TimerStart) {
    (
        AfterTimer::from_ordinal((control >> AFTER_TIMER_SHIFT) & TWO_BITS),
        PowerLevel::from_ordinal((control >> POWER_LEVEL_SHIFT) & TWO_BITS),
        TimerStart::from_ordinal((control >> TIMER_START_SHIFT) & TWO_BITS),
    )
}

pub fn is_extended(control: u8) -> bool {
    control & EXTENSION_FLAG != 0
}
