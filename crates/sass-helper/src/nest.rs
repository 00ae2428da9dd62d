//! Nesting namespaced properties.
//!
//! ```text
//! margin-top: 1px;          margin: {
//! margin-left: 2px;   →         top: 1px;
//!                               left: 2px;
//!                           }
//! ```

use crate::declaration::{split_declaration, statements};
use crate::document::EditorState;
use crate::edit::{self, EditBatch, EditHost};
use crate::error::{HelperError, CANNOT_NEST_PROPERTIES, CANNOT_PARSE};
use crate::precondition::PROPERTY_NESTING;
use crate::selection::{indentation_before, selected_text};

/// Rewrites `text` as one nested property block.
///
/// Every statement must be a `name: value` pair whose name shares the same
/// namespace. Each line of the block is indented with `indent` plus a tab,
/// the closing brace with `indent` alone. Nothing is produced unless every
/// statement qualifies.
pub fn nest_declarations(text: &str, indent: &str) -> Result<String, HelperError> {
    if text.contains(['{', '}']) || text.trim().is_empty() {
        return Err(HelperError::CannotNest(CANNOT_NEST_PROPERTIES));
    }

    let mut namespace = None;
    let mut lines = String::new();
    for statement in statements(text) {
        let declaration =
            split_declaration(statement).ok_or(HelperError::ParseError(CANNOT_PARSE))?;
        let current = declaration
            .namespace()
            .ok_or(HelperError::ParseError(CANNOT_PARSE))?;

        match namespace {
            None => namespace = Some(current),
            Some(shared) if shared != current => {
                log::debug!("namespace `{}` differs from `{}`", current, shared);
                return Err(HelperError::NamespaceMismatch);
            }
            Some(_) => {}
        }

        // Keeps the author's spacing around the colon.
        let remainder = &statement[current.len() + 1..];
        lines.push_str(indent);
        lines.push('\t');
        lines.push_str(remainder);
        lines.push_str(";\n");
    }

    let namespace = namespace.ok_or(HelperError::ParseError(CANNOT_PARSE))?;
    Ok(format!("{}: {{\n{}{}}}\n", namespace, lines, indent))
}

/// Replaces the selected declarations with their nested form.
///
/// Unlike editors that silently drop a refused edit, a batch the host
/// rejects is reported as [`HelperError::EditApplication`].
pub fn nest_properties(
    editor: Option<&EditorState>,
    host: &mut dyn EditHost,
) -> Result<(), HelperError> {
    let (editor, selection) = PROPERTY_NESTING.check(editor)?;
    let document = &editor.document;

    let nested = nest_declarations(
        selected_text(document, &selection),
        indentation_before(document, &selection),
    )?;

    log::debug!("nesting properties at {}", selection);
    edit::apply(host, &EditBatch::new().replace(selection, nested))
}
