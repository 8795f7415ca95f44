//! Splices rendered fragments back into the literal text of a template.

use crate::directive::Span;

/// Interleaves the literal gaps of `template` with `fragments`.
///
/// `spans` must be in source order and `fragments[i]` replaces `spans[i]`.
/// Everything outside the spans is copied unchanged.
///
/// # Panics
/// If the number of fragments differs from the number of spans. The renderer
/// produces exactly one fragment per span, so this is a bug, not bad input.
pub fn assemble<S: AsRef<str>>(template: &str, spans: &[Span<'_>], fragments: &[S]) -> String {
    assert_eq!(
        spans.len(),
        fragments.len(),
        "every directive span needs exactly one rendered fragment"
    );

    if spans.is_empty() {
        return template.to_string();
    }

    let fragments_len: usize = fragments.iter().map(|f| f.as_ref().len()).sum();
    let spans_len: usize = spans.iter().map(|s| s.range.len()).sum();
    let mut output = String::with_capacity(template.len() - spans_len + fragments_len);

    let mut cursor = 0;
    for (span, fragment) in spans.iter().zip(fragments) {
        output.push_str(&template[cursor..span.range.start]);
        output.push_str(fragment.as_ref());
        cursor = span.range.end;
    }
    output.push_str(&template[cursor..]);

    output
}
