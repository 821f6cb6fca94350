//! Ordered terminal output writer
//!
//! Styled text and control sequences share one buffer, so bytes reach the
//! terminal in call order. The buffer drains to the sink when it grows
//! past a threshold, on [`flush`](TermWriter::flush), and on drop.

use std::io::Write;

use tracing::debug;

use super::caps::{CapName, CapabilitySet};
use super::Result;

/// Buffered bytes are spilled to the sink beyond this size.
const SPILL_BYTES: usize = 8 * 1024;

/// Writer binding one output sink to a resolved capability set.
///
/// The sink is injected at construction and owned for the writer's
/// lifetime. The writer keeps no cursor state and performs no diffing;
/// every call appends bytes and nothing else.
pub struct TermWriter<W: Write> {
    sink: W,
    caps: CapabilitySet,
    buf: Vec<u8>,
}

impl<W: Write> TermWriter<W> {
    pub fn new(sink: W, caps: CapabilitySet) -> Self {
        Self {
            sink,
            caps,
            buf: Vec::with_capacity(4096),
        }
    }

    /// Append plain text. Bytes pass through verbatim, no escaping.
    pub fn write_text(&mut self, s: &str) -> Result<()> {
        self.buf.extend_from_slice(s.as_bytes());
        self.spill_if_full()
    }

    /// Append the control sequence for a capability.
    ///
    /// Parametric capabilities expand against `params`; padding markers are
    /// stripped during expansion. An unresolved capability appends nothing
    /// and succeeds, so missing styling degrades silently.
    pub fn emit(&mut self, name: CapName, params: &[i32]) -> Result<()> {
        match self.caps.get(name) {
            Some(cap) => {
                let seq = cap.expand(params);
                self.buf.extend_from_slice(&seq);
                self.spill_if_full()
            }
            None => {
                debug!(capability = name.terminfo_name(), "capability unsupported, skipped");
                Ok(())
            }
        }
    }

    /// Move the cursor to `(row, column)`, both 0-based.
    pub fn goto(&mut self, row: u16, column: u16) -> Result<()> {
        self.emit(CapName::CursorAddress, &[i32::from(row), i32::from(column)])
    }

    /// Clear the screen and home the cursor.
    pub fn clear_screen(&mut self) -> Result<()> {
        self.emit(CapName::Clear, &[])
    }

    /// Switch to bold text.
    pub fn bold(&mut self) -> Result<()> {
        self.emit(CapName::Bold, &[])
    }

    /// Reset all text attributes.
    pub fn normal(&mut self) -> Result<()> {
        self.emit(CapName::Normal, &[])
    }

    /// Drain the buffer to the sink and flush the sink itself.
    ///
    /// Callers invoke this before blocking reads and before exit.
    pub fn flush(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.sink.write_all(&self.buf)?;
            self.buf.clear();
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Borrow the underlying sink.
    #[allow(dead_code)]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    fn spill_if_full(&mut self) -> Result<()> {
        if self.buf.len() >= SPILL_BYTES {
            self.sink.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> Drop for TermWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::caps::Capability;
    use crate::term::Error;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    fn test_caps() -> CapabilitySet {
        CapabilitySet::from_parts(
            Some(Capability::new("bold", &b"\x1b[1m"[..])),
            Some(Capability::new("sgr0", &b"\x1b[0m"[..])),
            Some(Capability::new("clear", &b"\x1b[2J"[..])),
            Capability::new("cup", &b"\x1b[%d;%dH"[..]),
        )
    }

    #[test]
    fn test_golden_scenario() {
        let mut w = TermWriter::new(Vec::new(), test_caps());
        w.clear_screen().unwrap();
        w.goto(3, 8).unwrap();
        w.bold().unwrap();
        w.write_text("Hi there Ann").unwrap();
        w.normal().unwrap();
        w.goto(4, 9).unwrap();
        w.write_text("Hi there Ann").unwrap();
        w.flush().unwrap();

        assert_eq!(
            w.get_ref(),
            b"\x1b[2J\x1b[3;8H\x1b[1mHi there Ann\x1b[0m\x1b[4;9HHi there Ann"
        );
    }

    #[test]
    fn test_ordering_across_paths() {
        // Alternating text and control writes stay in call order
        let mut w = TermWriter::new(Vec::new(), test_caps());
        w.write_text("a").unwrap();
        w.bold().unwrap();
        w.write_text("b").unwrap();
        w.goto(1, 2).unwrap();
        w.write_text("c").unwrap();
        w.normal().unwrap();
        w.flush().unwrap();

        assert_eq!(w.get_ref(), b"a\x1b[1mb\x1b[1;2Hc\x1b[0m");
    }

    #[test]
    fn test_unsupported_capability_is_noop() {
        let caps = CapabilitySet::from_parts(
            None,
            None,
            None,
            Capability::new("cup", &b"\x1b[%d;%dH"[..]),
        );
        let mut w = TermWriter::new(Vec::new(), caps);
        w.bold().unwrap();
        w.clear_screen().unwrap();
        w.write_text("plain").unwrap();
        w.normal().unwrap();
        w.goto(2, 4).unwrap();
        w.flush().unwrap();

        assert_eq!(w.get_ref(), b"plain\x1b[2;4H");
    }

    #[test]
    fn test_padding_never_reaches_sink() {
        let caps = CapabilitySet::from_parts(
            Some(Capability::new("bold", &b"\x1b[1m$<2>"[..])),
            None,
            None,
            Capability::new("cup", &b"\x1b[%i%p1%d;%p2%dH$<5>"[..]),
        );
        let mut w = TermWriter::new(Vec::new(), caps);
        w.bold().unwrap();
        w.goto(0, 0).unwrap();
        w.flush().unwrap();

        assert_eq!(w.get_ref(), b"\x1b[1m\x1b[1;1H");
    }

    #[test]
    fn test_flush_before_read_points() {
        // Nothing reaches the sink until flush; everything does after
        let mut w = TermWriter::new(Vec::new(), test_caps());
        w.write_text("Enter your name: ").unwrap();
        assert!(w.get_ref().is_empty());
        w.flush().unwrap();
        assert_eq!(w.get_ref(), b"Enter your name: ");
    }

    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_two_writers_preserve_per_instance_order() {
        let sink = SharedSink::default();
        let mut a = TermWriter::new(sink.clone(), test_caps());
        let mut b = TermWriter::new(sink.clone(), test_caps());

        // Round-robin into both instances
        a.write_text("a1").unwrap();
        b.write_text("b1").unwrap();
        a.goto(1, 1).unwrap();
        b.goto(2, 2).unwrap();
        a.write_text("a2").unwrap();
        b.write_text("b2").unwrap();
        a.flush().unwrap();
        b.flush().unwrap();

        let bytes = sink.0.borrow().clone();
        let a_expected = b"a1\x1b[1;1Ha2".to_vec();
        let b_expected = b"b1\x1b[2;2Hb2".to_vec();

        // Each instance's bytes appear as a contiguous run in its own order
        let a_pos = find(&bytes, &a_expected).expect("writer a output missing");
        let b_pos = find(&bytes, &b_expected).expect("writer b output missing");
        assert_ne!(a_pos, b_pos);
        assert_eq!(bytes.len(), a_expected.len() + b_expected.len());
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut w = TermWriter::new(FailingSink, test_caps());
        w.write_text("x").unwrap();
        assert!(matches!(w.flush(), Err(Error::Sink(_))));
    }
}
