//! Terminal capability resolution and ordered output.
//!
//! This module contains the core output machinery:
//!
//! - **caps**: terminfo database lookup for the named capabilities
//! - **params**: terminfo `%`-language expansion and padding removal
//! - **writer**: ordered text + control-sequence writer over one sink
//!
//! # Architecture
//!
//! ```text
//! TermWriter
//! ├── CapabilitySet (bold / sgr0 / clear / cup, resolved once)
//! │   └── Capability (raw database string, expanded per emit)
//! └── buffer (single FIFO byte buffer, flushed to the sink)
//! ```
//!
//! Every write operation, whether plain text or a control sequence, appends
//! to the same buffer. Bytes therefore reach the terminal in call order;
//! there is no second channel that could interleave out of order.

pub mod caps;
pub mod params;
pub mod writer;

pub use caps::{CapName, Capability, CapabilitySet};
pub use writer::TermWriter;

use thiserror::Error;

/// Errors from capability resolution and terminal output.
#[derive(Debug, Error)]
pub enum Error {
    /// The terminfo database could not be loaded for the terminal type.
    #[error("terminal type could not be determined: {0}")]
    UnknownTerminal(String),

    /// The terminal has no cursor-addressing capability. Positioning is
    /// essential, so this is fatal rather than a degraded no-op.
    #[error("terminal does not support cursor addressing (cup)")]
    UnsupportedTerminal,

    /// The output device rejected a write or flush.
    #[error("terminal write failed: {0}")]
    Sink(#[from] std::io::Error),
}

/// Convenience alias used throughout the module.
pub type Result<T> = std::result::Result<T, Error>;
