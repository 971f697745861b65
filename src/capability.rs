//! Process-wide "can we send at all" flag.
//!
//! Resolved once, either explicitly by the host through [`init`] or
//! lazily on first use by checking whether an HTTP transport was
//! compiled in. The value never changes afterwards, so every
//! dispatcher in the process sees the same answer without locking.

use std::sync::OnceLock;

static AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Whether the `transport` feature is compiled into this build.
#[must_use]
pub const fn transport_compiled_in() -> bool {
    cfg!(feature = "transport")
}

/// Set the flag. The first call wins; the stored value is returned.
pub fn init(available: bool) -> bool {
    *AVAILABLE.get_or_init(|| announce(available))
}

/// Read the flag, detecting it on first use.
#[must_use]
pub fn is_available() -> bool {
    *AVAILABLE.get_or_init(|| announce(transport_compiled_in()))
}

fn announce(available: bool) -> bool {
    if !available {
        tracing::warn!("sentry client unavailable, notifications are disabled for this process");
    }
    available
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let first = is_available();
        assert_eq!(init(!first), first);
        assert_eq!(is_available(), first);
    }
}
