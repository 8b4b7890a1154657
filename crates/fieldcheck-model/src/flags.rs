//! Error state: a 32-bit flag word plus per-field errors.
//!
//! Bit 0 is the primary flag, set when a validation pass is meant to surface
//! its field errors. Bits 1-31 belong to the host for its own conditions
//! ("server rejected", "dirty", ...).

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

/// Bit index of the primary flag.
pub const PRIMARY_FLAG: u8 = 0;

/// Field name → error map.
pub type FieldErrors = BTreeMap<String, FieldError>;

/// Why a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Failed with no message attached.
    Invalid,
    /// Failed with a resolved message.
    Message(String),
}

impl FieldError {
    /// The message text, or an empty string for [`FieldError::Invalid`].
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid => "",
            Self::Message(message) => message,
        }
    }
}

/// A 32-bit word of boolean error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ErrorFlags(u32);

impl ErrorFlags {
    /// No bits set.
    pub const EMPTY: Self = Self(0);
    /// Only the primary bit set.
    pub const PRIMARY: Self = Self(1);

    /// Wrap a raw flag word.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw flag word.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the primary bit is set.
    pub const fn is_primary(self) -> bool {
        self.0 & 1 != 0
    }

    /// Whether `bit` is set.
    pub fn contains(self, bit: u8) -> Result<bool> {
        Ok(self.0 & mask(bit)? != 0)
    }

    /// Copy with `bit` set.
    pub fn with(self, bit: u8) -> Result<Self> {
        Ok(Self(self.0 | mask(bit)?))
    }

    /// Copy with `bit` cleared.
    pub fn without(self, bit: u8) -> Result<Self> {
        Ok(Self(self.0 & !mask(bit)?))
    }
}

fn mask(bit: u8) -> Result<u32> {
    1u32.checked_shl(u32::from(bit))
        .ok_or(ConfigError::FlagBitOutOfRange { bit })
}

/// Everything stored in the host's error slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorState {
    pub flags: ErrorFlags,
    pub fields: FieldErrors,
}

impl ErrorState {
    /// Fresh state: flag word cleared, no field errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary flag set and at least one field error recorded.
    pub fn has_errors(&self) -> bool {
        self.flags.is_primary() && !self.fields.is_empty()
    }

    /// Error recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bits_round_trip() {
        let flags = ErrorFlags::EMPTY.with(3).unwrap().with(0).unwrap();
        assert_eq!(flags.bits(), 0b1001);
        assert!(flags.is_primary());
        assert!(flags.contains(3).unwrap());
        assert!(!flags.contains(2).unwrap());
        let cleared = flags.without(0).unwrap();
        assert!(!cleared.is_primary());
        assert_eq!(cleared.bits(), 0b1000);
    }

    #[test]
    fn bit_31_is_the_last_valid_bit() {
        assert!(ErrorFlags::EMPTY.with(31).is_ok());
        assert!(matches!(
            ErrorFlags::EMPTY.with(32),
            Err(ConfigError::FlagBitOutOfRange { bit: 32 })
        ));
    }

    #[test]
    fn has_errors_needs_primary_and_fields() {
        let mut state = ErrorState::new();
        assert!(!state.has_errors());

        state.flags = ErrorFlags::PRIMARY;
        assert!(!state.has_errors());

        state.fields.insert("age".into(), FieldError::Invalid);
        assert!(state.has_errors());

        state.flags = ErrorFlags::EMPTY;
        assert!(!state.has_errors());
    }
}
