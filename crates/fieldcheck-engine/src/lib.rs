//! Declarative rule engine for fieldcheck.
//!
//! A host declares its fields as a [`RuleSet`]. The engine flattens the
//! rule tree against the current state, then validates or formats the
//! applicable fields through the codec registry. [`Validator`] ties this to a
//! host through a [`Binding`].
//!
//! - **rule** / **condition**: the rule tree and its gating conditions
//! - **definition**: JSON rule and state documents
//! - **flatten**: tree → applicable leaves
//! - **execute**: validate and format passes
//! - **binding** / **validator**: host adapter and facade

pub mod binding;
pub mod condition;
pub mod definition;
pub mod execute;
pub mod flatten;
pub mod options;
pub mod rule;
pub mod validator;

pub use binding::{Binding, MemoryBinding};
pub use condition::{Condition, FieldKinds};
pub use definition::{state_from_json, value_from_json};
pub use execute::{DisplayMap, format, validate};
pub use flatten::{find, flatten};
pub use options::RunOptions;
pub use rule::{DEFAULT_LABEL, FieldRule, GroupRule, Predicate, Rule, RuleSet};
pub use validator::Validator;

pub use fieldcheck_codec::FieldKind;
pub use fieldcheck_model::{ConfigError, ErrorFlags, ErrorState, FieldError, FieldErrors, Message, State, Value};
