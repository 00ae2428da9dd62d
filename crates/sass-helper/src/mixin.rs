//! Extracting a run of declarations into a named mixin.

use sass_helper_input::InputError;

use crate::declaration::{split_declaration, statements};
use crate::document::{EditorState, Position};
use crate::edit::{self, EditBatch, EditHost};
use crate::error::{HelperError, BRACES_IN_SELECTION, CANNOT_EXTRACT};
use crate::precondition::MIXIN_EXTRACTION;
use crate::selection::selected_text;

/// Where the name of a new mixin comes from.
///
/// `Ok(None)` and [`InputError::PromptCancelled`] mean the user declined to
/// give one. Any other error, such as having no way to ask, fails the
/// extraction.
pub trait MixinNameSource {
    fn mixin_name(&self) -> Result<Option<String>, InputError>;
}

impl MixinNameSource for &str {
    fn mixin_name(&self) -> Result<Option<String>, InputError> {
        Ok(Some(self.to_string()))
    }
}

impl MixinNameSource for String {
    fn mixin_name(&self) -> Result<Option<String>, InputError> {
        Ok(Some(self.clone()))
    }
}

impl MixinNameSource for Option<String> {
    fn mixin_name(&self) -> Result<Option<String>, InputError> {
        Ok(self.clone())
    }
}

/// Outcome of [`extract_mixin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Applied { name: String },
    /// No name was given; the document is untouched.
    Cancelled,
}

/// Validates `text` and formats it as the body of a mixin.
///
/// Each `name: value` pair becomes one tab-indented line. Pairs with an
/// empty side are dropped; a statement without exactly one `:` rejects the
/// whole selection.
pub fn mixin_body(text: &str) -> Result<String, HelperError> {
    if text.contains(['{', '}']) || text.trim().is_empty() {
        return Err(HelperError::CannotNest(BRACES_IN_SELECTION));
    }
    if text.contains("\\\\") || text.contains("/*") || text.contains("*/") {
        return Err(HelperError::ContainsComments);
    }
    if !text.trim_end().ends_with(';') {
        return Err(HelperError::MissingTrailingSemicolon);
    }

    let mut properties = Vec::new();
    for statement in statements(text) {
        let declaration =
            split_declaration(statement).ok_or(HelperError::ParseError(CANNOT_EXTRACT))?;
        let (name, value) = (declaration.name.trim(), declaration.value.trim());
        if name.is_empty() || value.is_empty() {
            log::debug!("skipping incomplete declaration `{}`", statement);
            continue;
        }
        properties.push(format!("{}: {};", name, value));
    }

    Ok(format!("\t{}\n", properties.join("\n\t")))
}

/// Moves the selected declarations into `@mixin <name>` at the top of the
/// document and leaves `@include <name>();` in their place.
///
/// The name is only requested once the selection has been validated.
pub fn extract_mixin(
    editor: Option<&EditorState>,
    host: &mut dyn EditHost,
    names: &dyn MixinNameSource,
) -> Result<Extraction, HelperError> {
    let (editor, selection) = MIXIN_EXTRACTION.check(editor)?;
    let body = mixin_body(selected_text(&editor.document, &selection))?;

    let name = match names.mixin_name() {
        Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => return Ok(Extraction::Cancelled),
        Err(InputError::PromptCancelled) => {
            log::debug!("mixin name prompt dismissed");
            return Ok(Extraction::Cancelled);
        }
        Err(err) => return Err(err.into()),
    };

    let batch = EditBatch::new()
        .replace(selection, format!("@include {}();", name))
        .insert(
            Position::new(0, 0),
            format!("@mixin {} {{\n{}}}\n", name, body),
        );
    edit::apply(host, &batch)?;

    log::info!("extracted mixin `{}`", name);
    Ok(Extraction::Applied { name })
}
