//! Splitting selected text into `name: value` declarations.
//!
//! This is deliberately not a css parser. Statements are split on `;` and
//! declarations on `:` with no notion of quoting, escaping, or nesting, so a
//! value that itself contains `:` or `;` (a `url(http://...)`, a data URI,
//! an aspect ratio written `16:9`) is rejected as unparseable rather than
//! split incorrectly.

/// One `name: value` statement. `name` and `value` are the untrimmed text
/// on either side of the colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The whole statement, trimmed, without its `;`.
    pub statement: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> Declaration<'a> {
    /// The shared prefix of the property name; see [`namespace_of`].
    pub fn namespace(&self) -> Option<&'a str> {
        namespace_of(self.name)
    }
}

/// Non-empty, trimmed statements separated by `;`.
pub fn statements(text: &str) -> impl Iterator<Item = &str> {
    text.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// Splits a statement on its colon. Zero or several colons yield `None`.
pub fn split_declaration(statement: &str) -> Option<Declaration<'_>> {
    let (name, value) = statement.split_once(':')?;
    if value.contains(':') {
        return None;
    }
    Some(Declaration {
        statement,
        name,
        value,
    })
}

/// All declarations in `text`, or `None` if any statement is malformed.
pub fn declarations(text: &str) -> Option<Vec<Declaration<'_>>> {
    statements(text).map(split_declaration).collect()
}

/// The part of a property name before its first `-`.
///
/// `font-size` has the namespace `font`. Names without a `-`, and names
/// starting with one such as `-webkit-transition`, have none.
pub fn namespace_of(name: &str) -> Option<&str> {
    match name.split_once('-') {
        Some((prefix, _)) if !prefix.is_empty() => Some(prefix),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_skip_blank_fragments() {
        let parts: Vec<_> = statements(" color: red;\n\n ;font-size: 12px; \n").collect();
        assert_eq!(parts, vec!["color: red", "font-size: 12px"]);
    }

    #[test]
    fn test_statements_keep_trailing_fragment() {
        let parts: Vec<_> = statements("color: red; margin: 0").collect();
        assert_eq!(parts, vec!["color: red", "margin: 0"]);
    }

    #[test]
    fn test_split_declaration_keeps_raw_sides() {
        let decl = split_declaration("margin-top : 1px").unwrap();
        assert_eq!(decl.name, "margin-top ");
        assert_eq!(decl.value, " 1px");
        assert_eq!(decl.statement, "margin-top : 1px");
    }

    #[test]
    fn test_split_declaration_requires_one_colon() {
        assert_eq!(split_declaration("color red"), None);
        assert_eq!(
            split_declaration("background: url(http://example.com/a.png)"),
            None
        );
    }

    #[test]
    fn test_declarations_reject_whole_batch() {
        assert!(declarations("color: red; oops; margin: 0;").is_none());
        assert_eq!(declarations("color: red; margin: 0;").unwrap().len(), 2);
        assert_eq!(declarations(" ; ;").unwrap().len(), 0);
    }

    #[test]
    fn test_namespace_of() {
        assert_eq!(namespace_of("font-size"), Some("font"));
        assert_eq!(namespace_of("border-top-width"), Some("border"));
        assert_eq!(namespace_of("color"), None);
        assert_eq!(namespace_of("-webkit-transition"), None);
        assert_eq!(
            split_declaration("margin-left: 2px").unwrap().namespace(),
            Some("margin")
        );
    }
}
