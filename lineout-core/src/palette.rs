//! ANSI coloring for HTTP methods and status codes.
//!
//! The escape sequences are wire-stable: downstream golden output
//! depends on the exact bytes, so they are written literally rather
//! than through a styling crate.

/// Lower-cases the method and, when coloring is on, wraps it in a bold
/// color. Four well-known methods get dedicated colors; the rest share
/// blue.
pub fn method(method: &str, color: bool) -> String {
    let lowered = method.to_lowercase();
    if !color {
        return lowered;
    }

    let code = match lowered.as_str() {
        "get" => 32,
        "delete" => 31,
        "put" => 36,
        "post" => 33,
        _ => 34,
    };

    format!("\x1b[1;{code}m{lowered}\x1b[0m")
}

/// Absent codes render empty; with coloring off, bare digits.
pub fn status(code: Option<i64>, color: bool) -> String {
    let Some(code) = code else {
        return String::new();
    };

    if !color {
        return code.to_string();
    }

    let color_code = if code >= 500 {
        31
    } else if code >= 400 {
        33
    } else if code >= 300 {
        36
    } else {
        32
    };

    format!("\x1b[{color_code}m{code}\x1b[0m")
}
