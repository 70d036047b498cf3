//! Record lists to FA1 image.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::fields::{self, EXTENSION_FLAG};
use crate::format::{
    alarm_entry, program_entry, slot_offset, Section, ENTRY_LEN, SECTION_CAPACITY, TEMP_MAX,
};
use crate::image::Image;
use crate::record::{is_stable_name, AlarmRecord, ProgramRecord, Records};

/// Builds the image for `programs` and `alarms`, each packed from the start
/// of its section in input order.
///
/// Everything is validated before the first byte is written, so an error
/// never leaves a half-built image behind.
pub fn encode(programs: &[ProgramRecord], alarms: &[AlarmRecord]) -> Result<Image> {
    check_capacity(Section::Programs, programs.len())?;
    check_capacity(Section::Alarms, alarms.len())?;
    for (index, program) in programs.iter().enumerate() {
        check_record(Section::Programs, index, &program.name, program.temperature)?;
    }
    for (index, alarm) in alarms.iter().enumerate() {
        check_record(Section::Alarms, index, &alarm.name, alarm.temperature)?;
    }

    let mut image = Image::blank();

    for (index, program) in programs.iter().enumerate() {
        let offset = section_offset(Section::Programs, index)?;
        image.entry_mut(offset).copy_from_slice(&program_entry_bytes(program));
        debug!(index, offset, name = %program.name, "Wrote program");
    }

    for (index, alarm) in alarms.iter().enumerate() {
        let offset = section_offset(Section::Alarms, index)?;
        image.entry_mut(offset).copy_from_slice(&alarm_entry_bytes(alarm));
        debug!(index, offset, name = %alarm.name, "Wrote alarm");
    }

    info!(
        programs = programs.len(),
        alarms = alarms.len(),
        "Encoded FA1 image"
    );
    Ok(image)
}

impl Records {
    pub fn encode(&self) -> Result<Image> {
        encode(&self.programs, &self.alarms)
    }
}

fn check_capacity(section: Section, count: usize) -> Result<()> {
    if count > SECTION_CAPACITY {
        return Err(Error::Capacity { section, count });
    }
    Ok(())
}

fn check_record(section: Section, index: usize, name: &str, temperature: u16) -> Result<()> {
    if temperature > TEMP_MAX {
        return Err(Error::TemperatureOutOfRange {
            section,
            index,
            temperature,
        });
    }
    // ASCII also rules out a leading 0xFF, which would read back as an empty slot.
    if !name.is_ascii() {
        return Err(Error::UnsupportedName {
            section,
            index,
            name: name.to_string(),
        });
    }
    if !is_stable_name(name) {
        return Err(Error::InvalidName {
            section,
            index,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn section_offset(section: Section, index: usize) -> Result<usize> {
    slot_offset(section, index).ok_or(Error::Capacity {
        section,
        count: index + 1,
    })
}

/// Left-justified, zero padded, silently truncated to the field width.
fn write_name(field: &mut [u8], name: &str) {
    let bytes = name.as_bytes();
    let len = bytes.len().min(field.len());
    field[..len].copy_from_slice(&bytes[..len]);
    field[len..].fill(0);
}

fn program_entry_bytes(program: &ProgramRecord) -> [u8; ENTRY_LEN] {
    let mut buf = [0u8; ENTRY_LEN];
    let (low, extended) = fields::split_temperature(program.temperature);
    let mut control = fields::pack_control(
        program.after_timer,
        program.power_level,
        program.timer_start,
    );
    if extended {
        control |= EXTENSION_FLAG;
    }
    let (hours, minutes, seconds) = program.timer.parts();

    let mut view = program_entry::View::new(&mut buf[..]);
    write_name(view.name_mut(), &program.name);
    view.temperature_mut().write(low);
    view.control_mut().write(control);
    view.timer_hours_mut().write(hours);
    view.timer_minutes_mut().write(minutes);
    view.timer_seconds_mut().write(seconds);

    let storage = view.into_storage();
    let sum = fields::checksum(storage);
    program_entry::View::new(storage).checksum_mut().write(sum);
    buf
}

fn alarm_entry_bytes(alarm: &AlarmRecord) -> [u8; ENTRY_LEN] {
    let mut buf = [0u8; ENTRY_LEN];
    let (low, extended) = fields::split_temperature(alarm.temperature);

    let mut view = alarm_entry::View::new(&mut buf[..]);
    write_name(view.name_mut(), &alarm.name);
    view.temperature_mut().write(low);
    view.control_mut().write(if extended { EXTENSION_FLAG } else { 0 });

    let storage = view.into_storage();
    let sum = fields::checksum(storage);
    alarm_entry::View::new(storage).checksum_mut().write(sum);
    buf
}
