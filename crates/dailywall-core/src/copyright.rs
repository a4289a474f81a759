//! Caption parsing: split a feed caption into title and attribution.
//!
//! Captions look like `Title (© Attribution)`; East Asian markets use
//! full-width parentheses and some captions drop the opening paren entirely.
//! Attempts run in order and the first one that splits cleanly wins. A marker
//! that occurs more than once makes its attempt fall through instead of
//! guessing which occurrence separates title from attribution.

use crate::error::{PipelineError, PipelineResult};

const SYMBOL: &str = "©";
const FULLWIDTH_OPEN: &str = "（©";
const FULLWIDTH_OPEN_SPACED: &str = "（ ©";
const FULLWIDTH_CLOSE: &str = "）";
const ASCII_OPEN: &str = "(©";
const ASCII_CLOSE: &str = ")";

/// Split a caption into `(title, attribution)`.
///
/// The attribution is returned as `"© <text>"`. A non-empty caption without
/// any marker becomes the title with an empty attribution; an empty caption
/// is a parse error.
pub fn parse_caption(caption: &str) -> PipelineResult<(String, String)> {
    let normalized = caption.replace(FULLWIDTH_OPEN_SPACED, FULLWIDTH_OPEN);

    let attempts = [
        (FULLWIDTH_OPEN, FULLWIDTH_CLOSE),
        (ASCII_OPEN, ASCII_CLOSE),
        (SYMBOL, ASCII_CLOSE),
    ];

    for (marker, close) in attempts {
        if let Some((title, attribution)) = split_exactly_once(&normalized, marker) {
            return Ok((title.trim().to_string(), format_attribution(attribution, close)));
        }
    }

    if caption.is_empty() {
        return Err(PipelineError::Parse {
            input: caption.to_string(),
            message: "caption is empty".to_string(),
        });
    }

    Ok((caption.to_string(), String::new()))
}

/// Split on `marker` only when it occurs exactly once.
fn split_exactly_once<'a>(s: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let (head, tail) = s.split_once(marker)?;
    if tail.contains(marker) {
        return None;
    }
    Some((head, tail))
}

fn format_attribution(raw: &str, close: &str) -> String {
    let raw = raw.trim();
    let text = raw.strip_suffix(close).unwrap_or(raw).trim();
    format!("{SYMBOL} {text}")
}
