//! Marker value types

use std::path::PathBuf;

/// Kind of a source marker
///
/// The registry never interprets the kind; it is stored and echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Error,
    Warning,
    Box,
    Info,
}

impl MarkerKind {
    /// Integer used for this kind on the wire
    pub fn wire_value(self) -> i64 {
        match self {
            MarkerKind::Error => 0,
            MarkerKind::Warning => 1,
            MarkerKind::Box => 2,
            MarkerKind::Info => 3,
        }
    }

    /// Decodes a wire integer, returning `None` for values outside 0..=3
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(MarkerKind::Error),
            1 => Some(MarkerKind::Warning),
            2 => Some(MarkerKind::Box),
            3 => Some(MarkerKind::Info),
            _ => None,
        }
    }
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Absolute, resolved path of the file the marker points into
    pub path: PathBuf,
    /// 1-based line; not range checked
    pub line: i32,
    /// 1-based column; not range checked
    pub column: i32,
    pub message: String,
    /// Whether the marker should also populate the client's error list
    pub show_error_list: bool,
}

impl Marker {
    pub fn new(
        kind: MarkerKind,
        path: impl Into<PathBuf>,
        line: i32,
        column: i32,
        message: impl Into<String>,
        show_error_list: bool,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            line,
            column,
            message: message.into(),
            show_error_list,
        }
    }
}

/// Named, ordered group of markers produced by one run of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    /// Unique key within a registry
    pub name: String,
    /// Used by clients to shorten displayed paths
    pub base_path: Option<PathBuf>,
    /// Display order
    pub markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(name: impl Into<String>, base_path: Option<PathBuf>, markers: Vec<Marker>) -> Self {
        Self {
            name: name.into(),
            base_path,
            markers,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
