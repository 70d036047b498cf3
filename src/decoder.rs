//! FA1 image to record lists.
//!
//! Slots are read independently. A slot whose first byte is the terminator
//! is empty, and a slot whose name trims to nothing is treated the same way.
//!
//! The checksum byte is *not* verified here. The device validates it; the
//! decoder trusts the other 35 bytes so that decoding stays total on images
//! with damaged checksums. Use [`inspect`] to look at checksums explicitly.

use tracing::{debug, info, trace};

use crate::error::Result;
use crate::fields;
use crate::format::{
    alarm_entry, program_entry, slots, Section, Slot, ALARM_NAME_LEN, CHECKSUM_OFFSET, ENTRY_LEN,
    PROGRAM_NAME_LEN, TERMINATOR,
};
use crate::image;
use crate::record::{is_name_padding, AlarmRecord, ProgramRecord, Records, Timer};

/// Decodes every occupied slot of `bytes`. Input longer than an image is
/// accepted and only its first 8192 bytes are read.
pub fn decode(bytes: &[u8]) -> Result<Records> {
    let image = image::prefix(bytes)?;

    let programs: Vec<ProgramRecord> = occupied(image, Section::Programs)
        .filter_map(|(slot, entry)| {
            let program = decode_program(entry);
            match &program {
                Some(p) => debug!(offset = slot.offset(), name = %p.name, "Found program"),
                None => trace!(offset = slot.offset(), "Skipping nameless program slot"),
            }
            program
        })
        .collect();

    let alarms: Vec<AlarmRecord> = occupied(image, Section::Alarms)
        .filter_map(|(slot, entry)| {
            let alarm = decode_alarm(entry);
            match &alarm {
                Some(a) => debug!(offset = slot.offset(), name = %a.name, "Found alarm"),
                None => trace!(offset = slot.offset(), "Skipping nameless alarm slot"),
            }
            alarm
        })
        .collect();

    info!(
        programs = programs.len(),
        alarms = alarms.len(),
        "Decoded FA1 image"
    );
    Ok(Records { programs, alarms })
}

/// One occupied slot as found in an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReport {
    pub slot: Slot,
    /// Decoded name, empty when the slot would decode to nothing.
    pub name: String,
    pub stored_checksum: u8,
    pub computed_checksum: u8,
}

impl SlotReport {
    pub fn offset(&self) -> usize {
        self.slot.offset()
    }

    pub fn checksum_ok(&self) -> bool {
        self.stored_checksum == self.computed_checksum
    }
}

/// Lists every slot whose first byte is not the terminator, with its stored
/// and recomputed checksum. This never changes what [`decode`] returns.
pub fn inspect(bytes: &[u8]) -> Result<Vec<SlotReport>> {
    let image = image::prefix(bytes)?;
    let reports = [Section::Programs, Section::Alarms]
        .into_iter()
        .flat_map(|section| occupied(image, section))
        .map(|(slot, entry)| {
            let width = match slot.section {
                Section::Programs => PROGRAM_NAME_LEN,
                Section::Alarms => ALARM_NAME_LEN,
            };
            SlotReport {
                slot,
                name: read_name(&entry[..width]),
                stored_checksum: entry[CHECKSUM_OFFSET],
                computed_checksum: fields::checksum(entry),
            }
        })
        .collect();
    Ok(reports)
}

fn occupied<'a>(image: &'a [u8], section: Section) -> impl Iterator<Item = (Slot, &'a [u8])> + 'a {
    slots(section)
        .map(move |slot| {
            let offset = slot.offset();
            (slot, &image[offset..offset + ENTRY_LEN])
        })
        .filter(|(_, entry)| entry[0] != TERMINATOR)
}

/// Bytes up to the first NUL, one character per byte, trimmed.
fn read_name(field: &[u8]) -> String {
    let name: String = field
        .iter()
        .take_while(|b| **b != 0)
        .map(|b| *b as char)
        .collect();
    name.trim_matches(is_name_padding).to_string()
}

fn decode_program(entry: &[u8]) -> Option<ProgramRecord> {
    let view = program_entry::View::new(entry);
    let name = read_name(&view.name()[..]);
    if name.is_empty() {
        return None;
    }

    let control = view.control().read();
    let (after_timer, power_level, timer_start) = fields::unpack_control(control);
    let temperature =
        fields::join_temperature(view.temperature().read(), fields::is_extended(control));
    let timer = Timer::from_parts(
        view.timer_hours().read(),
        view.timer_minutes().read(),
        view.timer_seconds().read(),
    );

    Some(ProgramRecord {
        name,
        temperature,
        power_level,
        timer,
        timer_start,
        after_timer,
    })
}

fn decode_alarm(entry: &[u8]) -> Option<AlarmRecord> {
    let view = alarm_entry::View::new(entry);
    let name = read_name(&view.name()[..]);
    if name.is_empty() {
        return None;
    }

    let control = view.control().read();
    let temperature =
        fields::join_temperature(view.temperature().read(), fields::is_extended(control));
    Some(AlarmRecord { name, temperature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::{AfterTimer, PowerLevel, TimerStart};
    use crate::error::Error;
    use crate::format::{ALARM_OFFSET, IMAGE_LEN};

    fn blank() -> Vec<u8> {
        vec![TERMINATOR; IMAGE_LEN]
    }

    #[test]
    fn reads_hand_built_program() {
        let mut image = blank();
        let entry = &mut image[..ENTRY_LEN];
        entry.fill(0);
        entry[..5].copy_from_slice(b" Stew");
        entry[30] = 10;
        entry[31] = 0x80 | (1 << 5) | (2 << 2) | 2;
        entry[32..35].copy_from_slice(&[1, 2, 3]);

        let records = decode(&image).unwrap();
        assert_eq!(
            records.programs,
            vec![ProgramRecord {
                name: "Stew".into(),
                temperature: 265,
                power_level: PowerLevel::Fast,
                timer: Timer::from_parts(1, 2, 3),
                timer_start: TimerStart::AtPrompt,
                after_timer: AfterTimer::StopCooking,
            }]
        );
        assert!(records.alarms.is_empty());
    }

    #[test]
    fn nameless_slots_decode_to_nothing() {
        let mut image = blank();
        image[..ENTRY_LEN].fill(0);
        image[ALARM_OFFSET..ALARM_OFFSET + ENTRY_LEN].fill(b' ');
        let records = decode(&image).unwrap();
        assert_eq!(records, Records::default());
    }

    #[test]
    fn name_stops_at_first_nul() {
        let mut image = blank();
        let entry = &mut image[ALARM_OFFSET..ALARM_OFFSET + ENTRY_LEN];
        entry.fill(0);
        entry[..9].copy_from_slice(b"Beep\0Junk");
        entry[30] = 100;
        let records = decode(&image).unwrap();
        assert_eq!(records.alarms, vec![AlarmRecord::new("Beep", 100)]);
    }

    #[test]
    fn high_bytes_map_one_to_one() {
        let mut image = blank();
        let entry = &mut image[..ENTRY_LEN];
        entry.fill(0);
        entry[0] = b'A';
        entry[1] = 0xE9;
        let records = decode(&image).unwrap();
        assert_eq!(records.programs[0].name, "A\u{e9}");
    }

    #[test]
    fn names_trim_only_controller_padding() {
        let mut image = blank();
        let entry = &mut image[ALARM_OFFSET..ALARM_OFFSET + ENTRY_LEN];
        entry.fill(0);
        entry[0] = 0x85;
        let entry = &mut image[ALARM_OFFSET + ENTRY_LEN..ALARM_OFFSET + 2 * ENTRY_LEN];
        entry.fill(0);
        entry[..7].copy_from_slice(b"\x0bBell\xa0\t");

        let names: Vec<_> = decode(&image).unwrap().alarms.into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["\u{85}", "Bell"]);
    }

    #[test]
    fn short_image_is_an_error() {
        assert_eq!(decode(&[0u8; 100]), Err(Error::ImageTooShort { len: 100 }));
        assert!(inspect(&[]).is_err());
    }

    #[test]
    fn inspect_flags_bad_checksums() {
        let mut image = blank();
        let entry = &mut image[ALARM_OFFSET..ALARM_OFFSET + ENTRY_LEN];
        entry.fill(0);
        entry[..3].copy_from_slice(b"Hot");
        entry[35] = 0x12;

        let reports = inspect(&image).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].offset(), ALARM_OFFSET);
        assert_eq!(reports[0].name, "Hot");
        assert_eq!(reports[0].computed_checksum, b'H'.wrapping_add(b'o').wrapping_add(b't'));
        assert!(!reports[0].checksum_ok());
    }
}
