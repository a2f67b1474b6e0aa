//! Utility functions.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Global set of warned messages (for warn_once).
static WARNED_MESSAGES: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Emit a warning through `log` only once per process.
///
/// Returns `true` if the message was logged by this call.
pub fn warn_once(message: &str) -> bool {
    let warned = WARNED_MESSAGES.get_or_init(|| Mutex::new(HashSet::new()));
    let mut guard = warned.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.insert(message.to_string()) {
        log::warn!("{}", message);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once() {
        let message = "utils::tests::test_warn_once";
        assert!(warn_once(message));
        assert!(!warn_once(message));
    }
}
