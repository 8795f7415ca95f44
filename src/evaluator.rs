//! Directive evaluation: turns a parsed directive and its resolved value into
//! the text that replaces the span.

use crate::directive::{Directive, DirectiveKind, DirectiveSyntax, Span};
use crate::error::{Error, Result};
use crate::value::{format_number, SettingValue};

/// Produces the replacement text for one directive span.
pub fn evaluate(
    syntax: &dyn DirectiveSyntax,
    span: &Span<'_>,
    directive: &Directive<'_>,
    value: SettingValue<'_>,
) -> Result<String> {
    match directive.kind {
        DirectiveKind::Render => render_literal(directive.variable, value),
        DirectiveKind::If => evaluate_if(syntax, span, directive.variable, value),
        // No case grammar exists for switch yet, it substitutes like render.
        DirectiveKind::Switch => render_literal(directive.variable, value),
    }
}

/// Converts a value to its textual form.
///
/// # Errors
/// * `Error::UnsupportedRenderType` for absent and non-scalar values
pub fn render_literal(variable: &str, value: SettingValue<'_>) -> Result<String> {
    match value {
        SettingValue::Str(s) => Ok(s.to_string()),
        SettingValue::Bool(b) => Ok(b.to_string()),
        SettingValue::Number(n) => Ok(format_number(n)),
        SettingValue::Absent | SettingValue::Unsupported(_) => {
            Err(Error::UnsupportedRenderType {
                variable: variable.to_string(),
                found: value.type_name(),
            })
        }
    }
}

/// Picks one of the span's quoted alternatives based on a boolean value.
///
/// # Errors
/// * `Error::TypeMismatch` if the value is not a boolean
/// * `Error::MalformedDirective` if the span has no alternatives
pub fn evaluate_if(
    syntax: &dyn DirectiveSyntax,
    span: &Span<'_>,
    variable: &str,
    value: SettingValue<'_>,
) -> Result<String> {
    let condition = match value {
        SettingValue::Bool(b) => b,
        other => {
            return Err(Error::TypeMismatch {
                variable: variable.to_string(),
                expected: "boolean",
                found: other.type_name(),
            })
        }
    };

    let (when_true, when_false) = syntax.alternatives(span)?;
    Ok(if condition { when_true } else { when_false })
}
