//! Terminal size probing with a fixed fallback.

use sbxctl_common::TermSize;

use crate::local::LocalTerminal;

/// Measure the local terminal, falling back to `fallback` when the probe
/// fails or reports a zero dimension. Never fails.
pub fn probe_size(terminal: &dyn LocalTerminal, fallback: TermSize) -> TermSize {
    match terminal.size() {
        Ok(size) if size.is_valid() => size,
        Ok(size) => {
            tracing::debug!(%size, "terminal reported a zero dimension; using {fallback}");
            fallback
        }
        Err(e) => {
            tracing::debug!(error = %e, "terminal size unavailable; using {fallback}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FixedSize(Option<TermSize>);

    impl LocalTerminal for FixedSize {
        fn size(&self) -> io::Result<TermSize> {
            self.0
                .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "not a tty"))
        }
        fn is_tty(&self) -> bool {
            false
        }
        fn enter_raw_mode(&self) -> io::Result<()> {
            Ok(())
        }
        fn restore_mode(&self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn probe_returns_measured_size() {
        let size = probe_size(&FixedSize(Some(TermSize::new(40, 120))), TermSize::default());
        assert_eq!(size, TermSize::new(40, 120));
    }

    #[test]
    fn probe_error_uses_fallback() {
        let size = probe_size(&FixedSize(None), TermSize::default());
        assert_eq!(size, TermSize::new(24, 80));
    }

    #[test]
    fn zero_size_uses_fallback() {
        let size = probe_size(&FixedSize(Some(TermSize::new(0, 0))), TermSize::new(30, 100));
        assert_eq!(size, TermSize::new(30, 100));
    }
}
