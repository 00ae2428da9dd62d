//! Reading the text under a selection and the indentation in front of it.

use crate::document::{Document, Selection};

/// The raw text covered by `selection`.
pub fn selected_text<'a>(document: &'a Document, selection: &Selection) -> &'a str {
    document.text_in(selection)
}

/// Leading whitespace on the selection's first line, up to where the
/// selection starts.
///
/// Generated blocks are re-indented with this prefix. When anything other
/// than whitespace precedes the selection on that line, the prefix is empty.
pub fn indentation_before<'a>(document: &'a Document, selection: &Selection) -> &'a str {
    let prefix = document.line_prefix(selection.start);
    if prefix.trim().is_empty() {
        prefix
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;

    fn doc(text: &str) -> Document {
        Document::new("styles.scss", text)
    }

    #[test]
    fn test_selected_text() {
        let d = doc(".a {\n  color: red;\n}\n");
        let sel = Selection::new(Position::new(1, 2), Position::new(1, 13));
        assert_eq!(selected_text(&d, &sel), "color: red;");
    }

    #[test]
    fn test_indentation_is_leading_whitespace() {
        let d = doc(".a {\n\t  font-size: 1em;\n}\n");
        let sel = Selection::new(Position::new(1, 3), Position::new(1, 18));
        assert_eq!(indentation_before(&d, &sel), "\t  ");
    }

    #[test]
    fn test_indentation_stops_at_selection_start() {
        let d = doc("        font-size: 1em;\n");
        let sel = Selection::new(Position::new(0, 4), Position::new(0, 23));
        assert_eq!(indentation_before(&d, &sel), "    ");
    }

    #[test]
    fn test_indentation_empty_after_other_text() {
        let d = doc(".a { font-size: 1em; }\n");
        let sel = Selection::new(Position::new(0, 5), Position::new(0, 20));
        assert_eq!(indentation_before(&d, &sel), "");
    }

    #[test]
    fn test_indentation_empty_at_column_zero() {
        let d = doc("font-size: 1em;\n");
        let sel = Selection::new(Position::new(0, 0), Position::new(0, 15));
        assert_eq!(indentation_before(&d, &sel), "");
    }
}
