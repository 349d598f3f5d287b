//! Escape pass
//!
//! Runs once over the evaluated text: `\{%` becomes `{%` and `\%}` becomes `%}`.

use crate::scanner::{CLOSE_MARKER, ESCAPE, OPEN_MARKER};

pub fn unescape_markers(text: &str) -> String {
    let escaped_open = format!("{}{}", ESCAPE, OPEN_MARKER);
    let escaped_close = format!("{}{}", ESCAPE, CLOSE_MARKER);

    text.replace(&escaped_open, OPEN_MARKER)
        .replace(&escaped_close, CLOSE_MARKER)
}
