use tracing::debug;

/// Bridge to the embedding mini-app host. Injected at construction so the
/// player and the purchase flow stay testable without a real host present.
pub trait HostAdapter {
    fn is_available(&self) -> bool;
    fn expand(&self) {}
    fn enable_closing_confirmation(&self) {}
    fn set_header_color(&self, _token: &str) {}
}

/// Plain-browser stand-in: no host, no payments, chrome calls are no-ops.
pub struct NullHost;

impl HostAdapter for NullHost {
    fn is_available(&self) -> bool {
        false
    }
}

/// Host chrome is applied once at startup. Failures are non-fatal, so
/// adapters are expected to swallow them; an unavailable host is skipped
/// entirely.
pub fn apply_host_chrome(host: &dyn HostAdapter) {
    if !host.is_available() {
        debug!("no mini-app host detected, skipping chrome setup");
        return;
    }

    host.expand();
    host.enable_closing_confirmation();
    host.set_header_color("secondary_bg_color");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        calls: RefCell<Vec<String>>,
    }

    impl HostAdapter for RecordingHost {
        fn is_available(&self) -> bool {
            true
        }

        fn expand(&self) {
            self.calls.borrow_mut().push("expand".into());
        }

        fn enable_closing_confirmation(&self) {
            self.calls.borrow_mut().push("closing_confirmation".into());
        }

        fn set_header_color(&self, token: &str) {
            self.calls.borrow_mut().push(format!("header:{token}"));
        }
    }

    #[test]
    fn chrome_applied_when_host_is_available() {
        let host = RecordingHost::default();
        apply_host_chrome(&host);
        assert_eq!(
            *host.calls.borrow(),
            vec!["expand", "closing_confirmation", "header:secondary_bg_color"]
        );
    }

    #[test]
    fn chrome_skipped_without_host() {
        // NullHost has no side effects to observe; this just pins down that
        // the call is safe outside a host.
        apply_host_chrome(&NullHost);
    }
}
