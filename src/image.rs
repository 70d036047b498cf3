use crate::error::{Error, Result};
use crate::format::{ENTRY_LEN, IMAGE_LEN, TERMINATOR};

/// A complete 8192-byte FA1 image.
#[derive(Clone, PartialEq, Eq)]
pub struct Image(Vec<u8>);

impl Image {
    /// An image with no entries: every byte is the terminator.
    pub fn blank() -> Self {
        Self(vec![TERMINATOR; IMAGE_LEN])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub(crate) fn entry_mut(&mut self, offset: usize) -> &mut [u8] {
        &mut self.0[offset..offset + ENTRY_LEN]
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::blank()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.0.iter().filter(|b| **b != TERMINATOR).count();
        f.debug_struct("Image")
            .field("len", &self.0.len())
            .field("non_terminator_bytes", &used)
            .finish()
    }
}

impl AsRef<[u8]> for Image {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The first 8192 bytes of `bytes`; anything after that is not part of the image.
pub(crate) fn prefix(bytes: &[u8]) -> Result<&[u8]> {
    bytes
        .get(..IMAGE_LEN)
        .ok_or(Error::ImageTooShort { len: bytes.len() })
}

impl TryFrom<&[u8]> for Image {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        prefix(bytes).map(|image| Self(image.to_vec()))
    }
}
