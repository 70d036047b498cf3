//! Byte layout of an FA1 image.
//!
//! The image is 8192 bytes: 16 blocks of programs followed by 16 blocks
//! of alarms. Each 256-byte block holds 7 entries of 36 bytes, the last 4
//! bytes of a block are filler. All multi-byte concerns are absent, every
//! field is a single byte, so the endianness below is nominal.

use binary_layout::define_layout;

pub const IMAGE_LEN: usize = 8192;
pub const ALARM_OFFSET: usize = 4096;
pub const BLOCK_LEN: usize = 256;
pub const ENTRY_LEN: usize = 36;
pub const ENTRIES_PER_BLOCK: usize = 7;
pub const BLOCKS_PER_SECTION: usize = ALARM_OFFSET / BLOCK_LEN;
/// Maximum number of records of one kind an image can hold.
pub const SECTION_CAPACITY: usize = BLOCKS_PER_SECTION * ENTRIES_PER_BLOCK;

pub const PROGRAM_NAME_LEN: usize = 26;
pub const ALARM_NAME_LEN: usize = 20;

pub const TEMP_MIN: u16 = 0;
pub const TEMP_MAX: u16 = 482;
pub const TEMP_MOD: u16 = 255;

/// Background fill of the image and first byte of an empty slot.
pub const TERMINATOR: u8 = 0xFF;
/// The checksum covers every byte of an entry before this offset.
pub const CHECKSUM_OFFSET: usize = ENTRY_LEN - 1;

/// File name the controller looks for on its storage card.
pub const DEFAULT_FILE_NAME: &str = "CMC850.FA1";

define_layout!(program_entry, LittleEndian, {
    name: [u8; 26],
    reserved: [u8; 4],
    temperature: u8,
    control: u8,
    timer_hours: u8,
    timer_minutes: u8,
    timer_seconds: u8,
    checksum: u8,
});

define_layout!(alarm_entry, LittleEndian, {
    name: [u8; 20],
    reserved: [u8; 10],
    temperature: u8,
    control: u8,
    reserved_tail: [u8; 3],
    checksum: u8,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Programs,
    Alarms,
}

impl Section {
    fn first_block(self) -> usize {
        match self {
            Section::Programs => 0,
            Section::Alarms => BLOCKS_PER_SECTION,
        }
    }
}

/// Position of one entry slot inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub section: Section,
    /// Absolute block index, 0..32.
    pub block: usize,
    /// Entry index within the block, 0..7.
    pub entry: usize,
}

impl Slot {
    pub fn offset(&self) -> usize {
        self.block * BLOCK_LEN + self.entry * ENTRY_LEN
    }
}

/// Slot for the `index`-th record of a section, `None` once the section is full.
pub fn slot(section: Section, index: usize) -> Option<Slot> {
    if index >= SECTION_CAPACITY {
        return None;
    }
    Some(Slot {
        section,
        block: section.first_block() + index / ENTRIES_PER_BLOCK,
        entry: index % ENTRIES_PER_BLOCK,
    })
}

pub fn slot_offset(section: Section, index: usize) -> Option<usize> {
    slot(section, index).map(|s| s.offset())
}

/// Every slot of a section in visiting order: block ascending, then entry.
pub fn slots(section: Section) -> impl Iterator<Item = Slot> {
    (0..SECTION_CAPACITY).filter_map(move |i| slot(section, i))
}
