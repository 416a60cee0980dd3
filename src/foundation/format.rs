//! Number formatting for emitted CSS/SVG text.
//!
//! Every number that reaches the output goes through here, so non-finite values
//! can never leak into a stylesheet.

/// Format with at most two decimals, trailing zeros trimmed. Non-finite → `0`.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        return "0".to_string();
    }
    s.to_string()
}

/// Normalized time `t` as a keyframe selector, clamped to `[0%, 100%]`.
pub fn fmt_percent(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    format!("{}%", fmt_num(t * 100.0))
}

/// Milliseconds rounded to whole numbers, e.g. `-300ms`.
pub fn fmt_ms(ms: f64) -> String {
    if !ms.is_finite() {
        return "0ms".to_string();
    }
    let r = ms.round();
    if r == 0.0 {
        return "0ms".to_string();
    }
    format!("{}ms", r as i64)
}

/// Pixel length with at most two decimals, e.g. `12.25px`.
pub fn fmt_px(v: f64) -> String {
    format!("{}px", fmt_num(v))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;
