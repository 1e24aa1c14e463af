//! 128-button state store.
//!
//! Layout (two little-endian `u64` words):
//! ```text
//! Word 0: buttons 1..64   (bit 0 = button 1,  bit 63 = button 64)
//! Word 1: buttons 65..128 (bit 0 = button 65, bit 63 = button 128)
//! ```

use crate::error::Error;

/// Lowest valid button number.
pub const MIN_BUTTON: u8 = 1;

/// Highest valid button number.
pub const MAX_BUTTON: u8 = 128;

/// Serialized size of the button field in bytes.
pub const BUTTON_BYTES: usize = 16;

/// Pressed/released state of buttons 1..=128.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet {
    words: [u64; 2],
}

impl ButtonSet {
    /// All buttons released.
    pub const fn new() -> Self {
        Self { words: [0; 2] }
    }

    /// Build from raw words (word 0 = buttons 1..64).
    pub const fn from_words(words: [u64; 2]) -> Self {
        Self { words }
    }

    /// Raw words (word 0 = buttons 1..64).
    pub const fn words(&self) -> [u64; 2] {
        self.words
    }

    /// Set the bit for `button`. Returns `true` if it was previously clear.
    pub fn press(&mut self, button: u8) -> Result<bool, Error> {
        let (word, mask) = locate(button)?;
        let before = self.words[word];
        self.words[word] = before | mask;
        Ok(self.words[word] != before)
    }

    /// Clear the bit for `button`. Returns `true` if it was previously set.
    pub fn release(&mut self, button: u8) -> Result<bool, Error> {
        let (word, mask) = locate(button)?;
        let before = self.words[word];
        self.words[word] = before & !mask;
        Ok(self.words[word] != before)
    }

    /// Whether `button` is currently pressed.
    pub fn is_pressed(&self, button: u8) -> Result<bool, Error> {
        let (word, mask) = locate(button)?;
        Ok(self.words[word] & mask != 0)
    }

    /// Release every button. Returns `true` if anything was pressed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.words = [0; 2];
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.words == [0; 2]
    }

    pub fn pressed_count(&self) -> u32 {
        self.words[0].count_ones() + self.words[1].count_ones()
    }

    /// Serialise into a byte slice, word 0 first, each word little-endian.
    /// Returns the number of bytes written (always 16).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < BUTTON_BYTES {
            return 0;
        }
        buf[0..8].copy_from_slice(&self.words[0].to_le_bytes());
        buf[8..16].copy_from_slice(&self.words[1].to_le_bytes());
        BUTTON_BYTES
    }
}

/// Word index and bit mask for a 1-based button number.
///
/// Buttons up to and including 64 live in word 0.
fn locate(button: u8) -> Result<(usize, u64), Error> {
    if !(MIN_BUTTON..=MAX_BUTTON).contains(&button) {
        return Err(Error::InvalidButton(button));
    }
    let bit = button - 1;
    let word = usize::from(button > 64);
    Ok((word, 1u64 << (bit % 64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_splits_after_button_64() {
        assert_eq!(locate(1), Ok((0, 1)));
        assert_eq!(locate(64), Ok((0, 1 << 63)));
        assert_eq!(locate(65), Ok((1, 1)));
        assert_eq!(locate(128), Ok((1, 1 << 63)));
    }

    #[test]
    fn locate_rejects_out_of_range() {
        assert_eq!(locate(0), Err(Error::InvalidButton(0)));
        assert_eq!(locate(129), Err(Error::InvalidButton(129)));
        assert_eq!(locate(255), Err(Error::InvalidButton(255)));
    }

    #[test]
    fn serialize_buffer_too_small() {
        let set = ButtonSet::new();
        let mut buf = [0u8; 8];
        assert_eq!(set.serialize(&mut buf), 0);
    }
}
