//! Atomic document edits.
//!
//! Operations describe their changes as an [`EditBatch`] and hand it to an
//! [`EditHost`], which applies every edit in the batch or none of them.

use crate::document::{Document, EditorState, Position, Selection};
use crate::error::HelperError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Replace { range: Selection, text: String },
    Insert { at: Position, text: String },
}

impl TextEdit {
    fn resolve<'a>(&'a self, document: &Document) -> (usize, usize, &'a str) {
        match self {
            Self::Replace { range, text } => {
                let start = document.offset_at(range.start);
                let end = document.offset_at(range.end).max(start);
                (start, end, text.as_str())
            }
            Self::Insert { at, text } => {
                let offset = document.offset_at(*at);
                (offset, offset, text.as_str())
            }
        }
    }

    fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }
}

/// Edits that must land together.
///
/// Positions refer to the document as it was before any edit in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    edits: Vec<TextEdit>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, range: Selection, text: impl Into<String>) -> Self {
        self.edits.push(TextEdit::Replace {
            range,
            text: text.into(),
        });
        self
    }

    pub fn insert(mut self, at: Position, text: impl Into<String>) -> Self {
        self.edits.push(TextEdit::Insert {
            at,
            text: text.into(),
        });
        self
    }

    pub fn delete(self, range: Selection) -> Self {
        self.replace(range, "")
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The text `document` would have after the batch, or `None` if two
    /// edits overlap.
    ///
    /// An insertion at the offset where a replacement starts lands in front
    /// of the replacement text.
    pub fn apply_to(&self, document: &Document) -> Option<String> {
        let mut resolved: Vec<_> = self
            .edits
            .iter()
            .enumerate()
            .map(|(index, edit)| {
                let (start, end, text) = edit.resolve(document);
                (start, !edit.is_insert(), index, end, text)
            })
            .collect();
        resolved.sort_unstable_by_key(|&(start, is_replace, index, _, _)| {
            (start, is_replace, index)
        });

        let source = document.text();
        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for (start, _, _, end, text) in resolved {
            if start < cursor {
                return None;
            }
            out.push_str(&source[cursor..start]);
            out.push_str(text);
            cursor = end;
        }
        out.push_str(&source[cursor..]);
        Some(out)
    }
}

/// Something that owns a document and can change it.
pub trait EditHost {
    /// Applies the whole batch, or nothing. Returns whether it was applied.
    fn apply_edits(&mut self, batch: &EditBatch) -> bool;
}

/// Applies `batch`, turning a refusal into [`HelperError::EditApplication`].
pub fn apply(host: &mut dyn EditHost, batch: &EditBatch) -> Result<(), HelperError> {
    if host.apply_edits(batch) {
        Ok(())
    } else {
        log::debug!("edit host rejected a batch of {} edits", batch.edits().len());
        Err(HelperError::EditApplication)
    }
}

/// An in-memory document that accepts edit batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    document: Document,
}

impl Buffer {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// A snapshot of the buffer with the given selections active.
    pub fn snapshot(&self, selections: Vec<Selection>) -> EditorState {
        EditorState::new(self.document.clone(), selections)
    }

    /// Record that the current text has been written to disk.
    pub fn mark_saved(&mut self) {
        self.document.mark_saved();
    }
}

impl EditHost for Buffer {
    fn apply_edits(&mut self, batch: &EditBatch) -> bool {
        if batch.is_empty() {
            return true;
        }
        match batch.apply_to(&self.document) {
            Some(text) => {
                self.document.replace_text(text);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sel(sl: usize, sc: usize, el: usize, ec: usize) -> Selection {
        Selection::new(Position::new(sl, sc), Position::new(el, ec))
    }

    fn buffer(text: &str) -> Buffer {
        Buffer::new(Document::new("styles.scss", text))
    }

    #[test]
    fn test_replace_and_insert_together() {
        let mut b = buffer(".a {\n  color: red;\n}\n");
        let batch = EditBatch::new()
            .replace(sel(1, 2, 1, 13), "@include tint();")
            .insert(Position::new(0, 0), "@mixin tint {\n\tcolor: red;\n}\n");

        assert!(b.apply_edits(&batch));
        assert_eq!(
            b.document().text(),
            "@mixin tint {\n\tcolor: red;\n}\n.a {\n  @include tint();\n}\n"
        );
        assert!(b.document().is_dirty());
    }

    #[test]
    fn test_insert_lands_before_replacement_at_same_offset() {
        let mut b = buffer("color: red;");
        let batch = EditBatch::new()
            .replace(sel(0, 0, 0, 11), "@include x();")
            .insert(Position::new(0, 0), "@mixin x {}\n");

        assert!(b.apply_edits(&batch));
        assert_eq!(b.document().text(), "@mixin x {}\n@include x();");
    }

    #[test]
    fn test_overlapping_edits_are_rejected_whole() {
        let mut b = buffer("margin-top: 1px;");
        let batch = EditBatch::new()
            .replace(sel(0, 0, 0, 10), "top")
            .replace(sel(0, 5, 0, 15), "x");

        assert!(!b.apply_edits(&batch));
        assert_eq!(b.document().text(), "margin-top: 1px;");
        assert!(!b.document().is_dirty());
    }

    #[test]
    fn test_insert_inside_replacement_is_rejected() {
        let b = buffer("abcdef");
        let batch = EditBatch::new()
            .replace(sel(0, 1, 0, 5), "X")
            .insert(Position::new(0, 3), "Y");
        assert_eq!(batch.apply_to(b.document()), None);
    }

    #[test]
    fn test_delete() {
        let mut b = buffer("a;\nb;\n");
        assert!(b.apply_edits(&EditBatch::new().delete(sel(0, 0, 1, 0))));
        assert_eq!(b.document().text(), "b;\n");
    }

    #[test]
    fn test_empty_batch_leaves_buffer_clean() {
        let mut b = buffer("a;");
        assert!(b.apply_edits(&EditBatch::new()));
        assert!(!b.document().is_dirty());
    }

    struct Refusing;

    impl EditHost for Refusing {
        fn apply_edits(&mut self, _batch: &EditBatch) -> bool {
            false
        }
    }

    #[test]
    fn test_apply_reports_refusal() {
        let batch = EditBatch::new().insert(Position::default(), "x");
        let err = apply(&mut Refusing, &batch).unwrap_err();
        assert!(matches!(err, HelperError::EditApplication));
        assert_eq!(err.to_string(), "Failed to apply edits to the document");
    }

    proptest! {
        #[test]
        fn prop_replace_plus_insert_matches_string_splice(
            text in "[a-z;: \n]{0,60}",
            a in 0usize..60,
            b in 0usize..60,
            replacement in "[A-Z]{0,5}",
        ) {
            let (a, b) = (a.min(text.len()), b.min(text.len()));
            let (a, b) = (a.min(b), a.max(b));
            let doc = Document::new("p.scss", text.clone());
            let range = Selection::new(doc.position_at(a), doc.position_at(b));
            let batch = EditBatch::new()
                .replace(range, replacement.clone())
                .insert(Position::default(), "@");

            let expected = format!("@{}{}{}", &text[..a], replacement, &text[b..]);
            prop_assert_eq!(batch.apply_to(&doc), Some(expected));
        }

        #[test]
        fn prop_overlapping_batches_change_nothing(
            text in "[a-z\n]{4,40}",
            split in 1usize..3,
        ) {
            let doc = Document::new("p.scss", text.clone());
            let first = Selection::new(doc.position_at(0), doc.position_at(split + 1));
            let second = Selection::new(doc.position_at(split), doc.position_at(text.len()));
            let mut buffer = Buffer::new(doc);
            let batch = EditBatch::new().replace(first, "x").replace(second, "y");

            prop_assert!(!buffer.apply_edits(&batch));
            prop_assert_eq!(buffer.document().text(), text.as_str());
        }
    }
}
