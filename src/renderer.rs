//! Template renderer for tacklebox's directive language.
//! Locates `{% ... %}` directives, evaluates each one against the settings
//! and splices the results back into the untouched literal text.
use crate::assembler::assemble;
use crate::directive::{DirectiveSyntax, RegexSyntax};
use crate::error::Result;
use crate::evaluator::evaluate;
use crate::value::{resolve, Settings};
use log::debug;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given settings.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `settings` - Variable bindings for the directives
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, settings: &Settings) -> Result<String>;
}

/// Directive-based template rendering engine.
///
/// Stateless between calls: the only thing it holds is the compiled grammar.
pub struct DirectiveRenderer<S: DirectiveSyntax = RegexSyntax> {
    /// Grammar used to find and parse directives
    syntax: S,
}

impl DirectiveRenderer<RegexSyntax> {
    /// Creates a new renderer with the default directive grammar.
    pub fn new() -> Result<Self> {
        Ok(Self { syntax: RegexSyntax::new()? })
    }
}

impl<S: DirectiveSyntax> DirectiveRenderer<S> {
    /// Creates a renderer over a custom grammar.
    pub fn with_syntax(syntax: S) -> Self {
        Self { syntax }
    }
}

impl<S: DirectiveSyntax> TemplateRenderer for DirectiveRenderer<S> {
    /// Renders a template string.
    ///
    /// # Errors
    /// Fails on the first directive that cannot be rendered, in which case
    /// no output is produced:
    /// * `Error::MalformedDirective` if a span does not follow the grammar
    /// * `Error::TypeMismatch` if `if` is bound to a non-boolean
    /// * `Error::UnsupportedRenderType` if `render`/`switch` has nothing to print
    fn render(&self, template: &str, settings: &Settings) -> Result<String> {
        let spans = self.syntax.locate(template);
        if spans.is_empty() {
            return Ok(template.to_string());
        }

        let fragments = spans
            .iter()
            .map(|span| {
                let directive = self.syntax.parse(span)?;
                debug!("Evaluating {}({}) at {:?}.", directive.kind, directive.variable, span.range);
                let value = resolve(settings, directive.variable);
                evaluate(&self.syntax, span, &directive, value)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(assemble(template, &spans, &fragments))
    }
}
