//! Terminal capability lookup.
//!
//! Resolves the capability strings used by the writer from the terminfo
//! database. Resolution happens once; the resulting set is immutable.

use terminfo::{Database, Value};
use tracing::debug;

use super::params;
use super::{Error, Result};

/// Symbolic names of the capabilities the writer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapName {
    /// `bold` - enter bold mode
    Bold,
    /// `sgr0` - reset all attributes
    Normal,
    /// `clear` - clear screen and home cursor
    Clear,
    /// `cup` - move cursor to (row, column)
    CursorAddress,
}

impl CapName {
    /// The terminfo variable name for this capability.
    pub fn terminfo_name(self) -> &'static str {
        match self {
            CapName::Bold => "bold",
            CapName::Normal => "sgr0",
            CapName::Clear => "clear",
            CapName::CursorAddress => "cup",
        }
    }
}

/// A capability string as stored in the terminfo database.
///
/// The template is kept byte-identical to the database entry; parameter
/// expansion and padding removal happen per [`expand`](Capability::expand)
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    name: &'static str,
    template: Vec<u8>,
}

impl Capability {
    /// Build a capability from an explicit template.
    pub fn new(name: &'static str, template: impl Into<Vec<u8>>) -> Self {
        Self {
            name,
            template: template.into(),
        }
    }

    /// Terminfo variable name this capability was resolved from.
    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Produce the concrete control sequence for the given parameters.
    ///
    /// Delay-padding markers never survive expansion; they would print as
    /// literal characters on a modern terminal.
    pub fn expand(&self, params: &[i32]) -> Vec<u8> {
        params::strip_padding(&params::expand(&self.template, params))
    }
}

/// The resolved capability set shared by all writer operations.
///
/// `cup` is mandatory: a terminal that cannot address the cursor cannot run
/// anything this crate is for, so resolution fails instead of degrading.
/// The styling capabilities are optional and emit nothing when absent.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    bold: Option<Capability>,
    normal: Option<Capability>,
    clear: Option<Capability>,
    cursor: Capability,
}

impl CapabilitySet {
    /// Resolve from the terminal type in the environment (`$TERM`).
    pub fn from_env() -> Result<Self> {
        let db = Database::from_env().map_err(|e| Error::UnknownTerminal(e.to_string()))?;
        Self::from_database(&db)
    }

    /// Resolve for an explicit terminal type, ignoring the environment.
    pub fn from_name(term: &str) -> Result<Self> {
        let db = Database::from_name(term).map_err(|e| Error::UnknownTerminal(e.to_string()))?;
        Self::from_database(&db)
    }

    /// Resolve from an already-loaded database.
    pub fn from_database(db: &Database) -> Result<Self> {
        let cursor = lookup(db, CapName::CursorAddress).ok_or(Error::UnsupportedTerminal)?;

        let set = Self {
            bold: lookup(db, CapName::Bold),
            normal: lookup(db, CapName::Normal),
            clear: lookup(db, CapName::Clear),
            cursor,
        };

        debug!(
            bold = set.bold.is_some(),
            normal = set.normal.is_some(),
            clear = set.clear.is_some(),
            "capabilities resolved"
        );

        Ok(set)
    }

    /// Build a set from explicit capability strings.
    ///
    /// Used by tests and by callers that already know their sequences;
    /// `None` for a styling capability makes the matching emit a no-op.
    #[allow(dead_code)]
    pub fn from_parts(
        bold: Option<Capability>,
        normal: Option<Capability>,
        clear: Option<Capability>,
        cursor: Capability,
    ) -> Self {
        Self {
            bold,
            normal,
            clear,
            cursor,
        }
    }

    /// Look up a capability by symbolic name.
    ///
    /// `CursorAddress` always resolves; the rest may be absent.
    pub fn get(&self, name: CapName) -> Option<&Capability> {
        match name {
            CapName::Bold => self.bold.as_ref(),
            CapName::Normal => self.normal.as_ref(),
            CapName::Clear => self.clear.as_ref(),
            CapName::CursorAddress => Some(&self.cursor),
        }
    }
}

/// Fetch a string capability from the database.
fn lookup(db: &Database, name: CapName) -> Option<Capability> {
    let tname = name.terminfo_name();
    match db.raw(tname) {
        Some(Value::String(seq)) => Some(Capability::new(tname, seq.clone())),
        _ => None,
    }
}
