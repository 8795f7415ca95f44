//! Directive locating and parsing.
//!
//! A directive is written inline as `{% keyword(variable) ... %}`. The
//! [`DirectiveSyntax`] trait covers everything the renderer needs to know
//! about the surface grammar, so the regex based [`RegexSyntax`] can be
//! replaced without touching the evaluators.
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// Matches a whole directive span. The first `%}` always closes the span.
pub const SPAN_PATTERN: &str = r#"\{%[\s\w():?",\\-]*?%\}"#;

/// Matches `keyword(variable)` anywhere inside a span.
pub const DIRECTIVE_PATTERN: &str =
    r"(?P<keyword>if|switch|render)\((?P<variable>[A-Za-z0-9_-]+)\)";

/// Matches the `"when true" ? "when false"` pair used by `if`.
pub const ALTERNATIVES_PATTERN: &str =
    r#""(?P<when_true>(?:[^"\\]|\\.)*)"\s*\?\s*"(?P<when_false>(?:[^"\\]|\\.)*)""#;

/// One directive occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'t> {
    /// Half-open byte range of the span in the template text
    pub range: Range<usize>,
    /// The span's text, delimiters included
    pub text: &'t str,
}

/// The closed set of directive keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    If,
    Switch,
    Render,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveKind::If => write!(f, "if"),
            DirectiveKind::Switch => write!(f, "switch"),
            DirectiveKind::Render => write!(f, "render"),
        }
    }
}

/// A span reduced to its keyword and the variable it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'t> {
    pub kind: DirectiveKind,
    pub variable: &'t str,
}

/// Surface grammar of the directive language.
pub trait DirectiveSyntax {
    /// Returns every directive span in `template`, in source order.
    fn locate<'t>(&self, template: &'t str) -> Vec<Span<'t>>;

    /// Extracts the keyword and variable name from a span.
    ///
    /// # Errors
    /// * `Error::MalformedDirective` if the span has no `keyword(variable)` part
    fn parse<'t>(&self, span: &Span<'t>) -> Result<Directive<'t>>;

    /// Extracts the two quoted alternatives of an `if` span, unescaped.
    ///
    /// # Errors
    /// * `Error::MalformedDirective` if the span has no `"a" ? "b"` pair
    fn alternatives(&self, span: &Span<'_>) -> Result<(String, String)>;
}

/// Regex implementation of [`DirectiveSyntax`].
///
/// Patterns are compiled once per instance, so differently configured
/// instances can coexist.
#[derive(Debug, Clone)]
pub struct RegexSyntax {
    span: Regex,
    directive: Regex,
    alternatives: Regex,
}

impl RegexSyntax {
    /// Compiles the default grammar.
    pub fn new() -> Result<Self> {
        Self::with_patterns(SPAN_PATTERN, DIRECTIVE_PATTERN, ALTERNATIVES_PATTERN)
    }

    /// Compiles a custom grammar.
    ///
    /// `directive` must define the `keyword` and `variable` capture groups,
    /// `alternatives` must define `when_true` and `when_false`.
    ///
    /// # Errors
    /// * `Error::PatternError` if a pattern does not compile
    /// * `Error::ConfigError` if a required capture group is missing
    pub fn with_patterns(span: &str, directive: &str, alternatives: &str) -> Result<Self> {
        let span = Regex::new(span)?;
        let directive = Regex::new(directive)?;
        let alternatives = Regex::new(alternatives)?;

        require_groups(&directive, &["keyword", "variable"])?;
        require_groups(&alternatives, &["when_true", "when_false"])?;

        Ok(Self { span, directive, alternatives })
    }
}

fn require_groups(regex: &Regex, groups: &[&str]) -> Result<()> {
    for group in groups {
        if !regex.capture_names().flatten().any(|name| name == *group) {
            return Err(Error::ConfigError(format!(
                "pattern '{}' has no '{}' capture group",
                regex.as_str(),
                group
            )));
        }
    }
    Ok(())
}

fn malformed(span: &Span<'_>, reason: impl Into<String>) -> Error {
    Error::MalformedDirective { directive: span.text.to_string(), reason: reason.into() }
}

/// Turns `\"` back into `"`.
fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"")
}

impl DirectiveSyntax for RegexSyntax {
    fn locate<'t>(&self, template: &'t str) -> Vec<Span<'t>> {
        let spans: Vec<Span<'t>> = self
            .span
            .find_iter(template)
            .map(|m| Span { range: m.range(), text: m.as_str() })
            .collect();
        debug!("Located {} directive span(s).", spans.len());
        spans
    }

    fn parse<'t>(&self, span: &Span<'t>) -> Result<Directive<'t>> {
        let captures = self
            .directive
            .captures(span.text)
            .ok_or_else(|| malformed(span, "expected 'if(name)', 'switch(name)' or 'render(name)'"))?;

        let keyword = captures.name("keyword").map(|m| m.as_str()).unwrap_or_default();
        let kind = match keyword {
            "if" => DirectiveKind::If,
            "switch" => DirectiveKind::Switch,
            "render" => DirectiveKind::Render,
            other => return Err(malformed(span, format!("unknown directive '{other}'"))),
        };

        let variable = captures
            .name("variable")
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| malformed(span, "missing variable name"))?;

        Ok(Directive { kind, variable })
    }

    fn alternatives(&self, span: &Span<'_>) -> Result<(String, String)> {
        let captures = self
            .alternatives
            .captures(span.text)
            .ok_or_else(|| malformed(span, "expected a '\"when true\" ? \"when false\"' pair"))?;

        let when_true = captures.name("when_true").map(|m| m.as_str()).unwrap_or_default();
        let when_false = captures.name("when_false").map(|m| m.as_str()).unwrap_or_default();

        Ok((unescape_quotes(when_true), unescape_quotes(when_false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax() -> RegexSyntax {
        RegexSyntax::new().unwrap()
    }

    fn span(text: &str) -> Span<'_> {
        Span { range: 0..text.len(), text }
    }

    #[test]
    fn test_locate_in_source_order() {
        let template = "A {% render(x) %} B {% if(y) \"1\" ? \"2\" %} C";
        let spans = syntax().locate(template);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "{% render(x) %}");
        assert_eq!(spans[0].range, 2..17);
        assert_eq!(spans[1].text, "{% if(y) \"1\" ? \"2\" %}");
        assert_eq!(&template[spans[1].range.clone()], spans[1].text);
    }

    #[test]
    fn test_locate_closes_on_first_delimiter() {
        let spans = syntax().locate("{% render(a) %}%}");

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "{% render(a) %}");
    }

    #[test]
    fn test_locate_ignores_disallowed_characters() {
        assert!(syntax().locate("{% render(a); %}").is_empty());
        assert!(syntax().locate("{{ render(a) }}").is_empty());
        assert!(syntax().locate("plain text").is_empty());
    }

    #[test]
    fn test_parse_keywords() {
        let syntax = syntax();

        let directive = syntax.parse(&span("{% render(project_name) %}")).unwrap();
        assert_eq!(directive, Directive { kind: DirectiveKind::Render, variable: "project_name" });

        let directive = syntax.parse(&span("{% if(use-ci) \"a\" ? \"b\" %}")).unwrap();
        assert_eq!(directive, Directive { kind: DirectiveKind::If, variable: "use-ci" });

        let directive = syntax.parse(&span("{%switch(Lang2)%}")).unwrap();
        assert_eq!(directive, Directive { kind: DirectiveKind::Switch, variable: "Lang2" });
    }

    #[test]
    fn test_parse_finds_keyword_anywhere_in_span() {
        let syntax = syntax();

        let directive = syntax.parse(&span("{% xif(flag) \"Y\" ? \"N\" %}")).unwrap();
        assert_eq!(directive, Directive { kind: DirectiveKind::If, variable: "flag" });

        let directive = syntax.parse(&span("{% my_render(v) %}")).unwrap();
        assert_eq!(directive, Directive { kind: DirectiveKind::Render, variable: "v" });
    }

    #[test]
    fn test_parse_rejects_unknown_keyword() {
        let result = syntax().parse(&span("{% foo(bar) %}"));
        assert!(matches!(result, Err(Error::MalformedDirective { .. })));

        let result = syntax().parse(&span("{% iff(bar) %}"));
        assert!(matches!(result, Err(Error::MalformedDirective { .. })));

        let result = syntax().parse(&span("{% render() %}"));
        assert!(matches!(result, Err(Error::MalformedDirective { .. })));
    }

    #[test]
    fn test_alternatives_with_escaped_quotes() {
        let (yes, no) =
            syntax().alternatives(&span(r#"{% if(flag) "say \"hi\"" ? "" %}"#)).unwrap();

        assert_eq!(yes, "say \"hi\"");
        assert_eq!(no, "");
    }

    #[test]
    fn test_alternatives_missing() {
        let result = syntax().alternatives(&span("{% if(flag) %}"));
        assert!(matches!(result, Err(Error::MalformedDirective { .. })));
    }

    #[test]
    fn test_custom_patterns_require_groups() {
        let result = RegexSyntax::with_patterns(SPAN_PATTERN, r"(if)\((\w+)\)", ALTERNATIVES_PATTERN);
        assert!(matches!(result, Err(Error::ConfigError(_))));

        let result = RegexSyntax::with_patterns("(", DIRECTIVE_PATTERN, ALTERNATIVES_PATTERN);
        assert!(matches!(result, Err(Error::PatternError(_))));
    }
}
