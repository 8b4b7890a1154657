//! Shared model types for fieldcheck.
//!
//! - **value**: field values and host state
//! - **flags**: error flag word and per-field errors
//! - **message**: lazily resolved failure messages
//! - **error**: configuration errors

pub mod error;
pub mod flags;
pub mod message;
pub mod value;

pub use error::{ConfigError, Result};
pub use flags::{ErrorFlags, ErrorState, FieldError, FieldErrors, PRIMARY_FLAG};
pub use message::Message;
pub use value::{NO_VALUE, State, Value};
