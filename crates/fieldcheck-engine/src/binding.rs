//! Host storage adapter.
//!
//! The engine never holds host state. Every operation reads through a
//! [`Binding`] and writes its results back through it.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use fieldcheck_model::{ErrorState, State};

use crate::options::RunOptions;

/// Access to a host's field state and error slot.
pub trait Binding {
    /// Current state for the scope in `options`.
    fn state(&self, options: &RunOptions) -> State;

    /// Merge `values` into the state for the scope in `options`.
    fn set_state(&self, options: &RunOptions, values: State);

    fn errors(&self) -> ErrorState;

    fn set_errors(&self, errors: ErrorState);
}

impl<B: Binding + ?Sized> Binding for &B {
    fn state(&self, options: &RunOptions) -> State {
        (**self).state(options)
    }

    fn set_state(&self, options: &RunOptions, values: State) {
        (**self).set_state(options, values);
    }

    fn errors(&self) -> ErrorState {
        (**self).errors()
    }

    fn set_errors(&self, errors: ErrorState) {
        (**self).set_errors(errors);
    }
}

#[derive(Debug, Default)]
struct Slots {
    states: BTreeMap<Option<String>, State>,
    errors: ErrorState,
}

/// An in-memory binding, one state map per scope.
#[derive(Debug, Default)]
pub struct MemoryBinding {
    slots: Mutex<Slots>,
}

impl MemoryBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// A binding whose default scope starts with `state`.
    pub fn with_state(state: State) -> Self {
        let binding = Self::new();
        binding.lock().states.insert(None, state);
        binding
    }

    /// Replace the state of a scope outright.
    pub fn replace_state(&self, scope: Option<&str>, state: State) {
        self.lock().states.insert(scope.map(str::to_string), state);
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Binding for MemoryBinding {
    fn state(&self, options: &RunOptions) -> State {
        self.lock()
            .states
            .get(&options.scope)
            .cloned()
            .unwrap_or_default()
    }

    fn set_state(&self, options: &RunOptions, values: State) {
        self.lock()
            .states
            .entry(options.scope.clone())
            .or_default()
            .extend(values);
    }

    fn errors(&self) -> ErrorState {
        self.lock().errors.clone()
    }

    fn set_errors(&self, errors: ErrorState) {
        self.lock().errors = errors;
    }
}
