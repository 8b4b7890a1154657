//! Configuration errors.
//!
//! These signal mistakes in rule declarations or codec options, never bad user
//! input. Bad input is reported through parse outcomes and field errors.

use thiserror::Error;

/// Fatal configuration error raised to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A `format` option names a variant the codec does not provide.
    #[error("unknown {codec} format variant '{variant}'")]
    UnknownFormat {
        /// Codec that rejected the variant.
        codec: &'static str,
        /// The unrecognized variant name.
        variant: String,
    },

    /// Boolean `values` format without exactly two entries.
    #[error("boolean 'values' format requires exactly 2 entries, found {found}")]
    InvalidBooleanValues {
        /// Number of entries supplied.
        found: usize,
    },

    /// `pattern` variant selected without a `pattern` option.
    #[error("{codec} format 'pattern' requires a 'pattern' option")]
    MissingPattern {
        /// Codec missing the pattern.
        codec: &'static str,
    },

    /// A bound option could not be read as the codec's type.
    #[error("invalid {option} bound '{value}'")]
    InvalidBound {
        /// Option name (`minValue` or `maxValue`).
        option: &'static str,
        /// The offending text.
        value: String,
    },

    /// A rule node is both a field and a group, or neither.
    #[error("rule node '{name}' must be either a field (kind) or a group (children)")]
    MixedRuleNode {
        /// Node name, or `<group>` for unnamed nodes.
        name: String,
    },

    /// A field node without a `name`.
    #[error("{kind} field has no name")]
    UnnamedField {
        /// Codec kind of the nameless node.
        kind: String,
    },

    /// Two sibling fields share a name.
    #[error("duplicate field name: {name}")]
    DuplicateField {
        /// The repeated name.
        name: String,
    },

    /// Error flag bit outside the 32-bit word.
    #[error("error flag bit {bit} out of range (0-31)")]
    FlagBitOutOfRange {
        /// The requested bit.
        bit: u8,
    },

    /// Malformed rule document.
    #[error("invalid rule document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Result type for configuration-checked operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
