use crate::error::{kind::RewriteFailure, Error};
use std::ops::Range;

/// Substitutes `replacement` for the region `span` of `expr`.
///
/// If the characters immediately around the span are a matching `(` and `)`, the span is widened
/// by one character on each side first, so the now redundant pair of parentheses disappears
/// along with the sub-expression. Nothing else in the expression is touched.
///
/// Returns a [`RewriteFailure`] if the span is inverted, extends past the end of the
/// expression, or does not fall on character boundaries.
pub fn rewrite(expr: &str, span: Range<usize>, replacement: &str) -> Result<String, Error> {
    let Range { mut start, mut end } = span;
    let fail = |reason: String| {
        let len = expr.len();
        let highlight = start.min(end).min(len)..start.max(end).min(len);
        Error::new(vec![highlight], RewriteFailure { reason })
    };

    if start > end {
        return Err(fail(format!("span {}..{} is inverted", start, end)));
    }
    if end > expr.len() {
        return Err(fail(format!(
            "span {}..{} is out of bounds for an expression of length {}",
            start,
            end,
            expr.len(),
        )));
    }
    if !expr.is_char_boundary(start) || !expr.is_char_boundary(end) {
        return Err(fail(format!("span {}..{} splits a character", start, end)));
    }

    let bytes = expr.as_bytes();
    if start > 0 && end < bytes.len() && bytes[start - 1] == b'(' && bytes[end] == b')' {
        start -= 1;
        end += 1;
    }

    let mut out = String::with_capacity(expr.len() - (end - start) + replacement.len());
    out.push_str(&expr[..start]);
    out.push_str(replacement);
    out.push_str(&expr[end..]);
    Ok(out)
}
