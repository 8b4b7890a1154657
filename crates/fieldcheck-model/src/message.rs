//! Lazily resolved failure messages.

use std::fmt;
use std::sync::Arc;

/// A zero-argument message producer.
///
/// Codecs pass it through untouched; it is only invoked once a failure is
/// confirmed, so callers can defer building localized text.
#[derive(Clone)]
pub struct Message(Arc<dyn Fn() -> String + Send + Sync>);

impl Message {
    /// Wrap a producer closure.
    pub fn new(producer: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(producer))
    }

    /// A producer returning fixed text.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move || text.clone())
    }

    /// Invoke the producer.
    pub fn resolve(&self) -> String {
        (self.0)()
    }

    /// Whether two handles share the same producer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Message(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn resolve_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let message = Message::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "required".to_string()
        });
        let copy = message.clone();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(copy.resolve(), "required");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(copy.ptr_eq(&message));
    }
}
