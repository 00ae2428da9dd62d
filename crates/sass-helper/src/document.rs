//! Document snapshots and positions.
//!
//! Every operation receives an explicit [`EditorState`] (or `None` when no
//! document is open) instead of reading ambient editor state. Positions are
//! zero-based; columns count characters, not bytes.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A contiguous range. `start` never comes after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// Builds a selection from two ends in either order.
    pub fn new(anchor: Position, active: Position) -> Self {
        if anchor <= active {
            Self {
                start: anchor,
                end: active,
            }
        } else {
            Self {
                start: active,
                end: anchor,
            }
        }
    }

    pub fn caret(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// An open stylesheet: where it lives on disk, its text, and whether the
/// text differs from what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    text: String,
    dirty: bool,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            dirty: false,
        }
    }

    pub fn with_unsaved_changes(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the file name ends with `.<extension>`. A bare `.scss` counts.
    pub fn has_extension(&self, extension: &str) -> bool {
        has_suffix(&self.path, extension)
    }

    pub(crate) fn replace_text(&mut self, text: String) {
        self.text = text;
        self.dirty = true;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Byte offset of `position`.
    ///
    /// Columns past the end of a line clamp to the line end (before any
    /// `\r\n`), lines past the end clamp to the end of the text.
    pub fn offset_at(&self, position: Position) -> usize {
        let mut line_start = 0;
        for _ in 0..position.line {
            match self.text[line_start..].find('\n') {
                Some(newline) => line_start += newline + 1,
                None => return self.text.len(),
            }
        }

        let rest = &self.text[line_start..];
        let line = match rest.find('\n') {
            Some(newline) => rest[..newline].strip_suffix('\r').unwrap_or(&rest[..newline]),
            None => rest,
        };

        let column = line
            .char_indices()
            .nth(position.column)
            .map_or(line.len(), |(offset, _)| offset);
        line_start + column
    }

    /// Position of the character at byte `offset`.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Position::new(line, before[line_start..].chars().count())
    }

    pub fn text_in(&self, selection: &Selection) -> &str {
        let start = self.offset_at(selection.start);
        let end = self.offset_at(selection.end);
        &self.text[start..end.max(start)]
    }

    /// Text from the beginning of `position`'s line up to `position`.
    pub fn line_prefix(&self, position: Position) -> &str {
        let start = self.offset_at(Position::new(position.line, 0));
        let end = self.offset_at(position);
        &self.text[start..end]
    }

    /// Selection covering the whole text.
    pub fn full_range(&self) -> Selection {
        Selection::new(Position::default(), self.position_at(self.text.len()))
    }
}

/// What an editor shows: one document and the active selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub document: Document,
    pub selections: Vec<Selection>,
}

impl EditorState {
    pub fn new(document: Document, selections: Vec<Selection>) -> Self {
        Self {
            document,
            selections,
        }
    }

    /// An editor with a single selection.
    pub fn with_selection(document: Document, selection: Selection) -> Self {
        Self::new(document, vec![selection])
    }

    /// The primary selection; an editor without one behaves as a caret at
    /// the start of the document.
    pub fn selection(&self) -> Selection {
        self.selections.first().copied().unwrap_or_default()
    }
}

/// Whether the file name of `path` ends with `.<extension>`.
pub(crate) fn has_suffix(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(extension))
        .is_some_and(|rest| rest.ends_with('.'))
}
