//! Time-expression mini-grammar used by `when` and duration attributes.
//!
//! Tokens are whitespace separated and case-insensitive:
//!
//! - `second <f>` / `seconds <f>`: `f * 1000` ms, rounded to the nearest millisecond
//! - `bpm <f> [steps]`: `round(60000 / f) * steps` ms, `steps` defaults to 1
//! - anything else (including an empty expression): 0 ms

use crate::foundation::core::TimeOffset;
use crate::foundation::error::{JaoError, JaoResult};

/// Convert a time expression into a [`TimeOffset`].
pub fn parse_time_expr(expr: &str) -> JaoResult<TimeOffset> {
    let mut tokens = expr.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(TimeOffset::ZERO);
    };

    match head.to_ascii_uppercase().as_str() {
        "SECOND" | "SECONDS" => {
            let secs = parse_number(tokens.next(), expr)?;
            Ok(TimeOffset(seconds(secs)))
        }
        "BPM" => {
            let bpm = parse_number(tokens.next(), expr)?;
            if bpm <= 0.0 {
                return Err(JaoError::time_expression(format!(
                    "bpm must be > 0 in '{expr}'"
                )));
            }
            let steps = match tokens.next() {
                Some(tok) => tok.parse::<u64>().map_err(|_| {
                    JaoError::time_expression(format!("invalid step count '{tok}' in '{expr}'"))
                })?,
                None => 1,
            };
            let beat = (60_000.0 / bpm).round() as u64;
            Ok(TimeOffset(beat.saturating_mul(steps)))
        }
        _ => Ok(TimeOffset::ZERO),
    }
}

/// Parse an optional expression, treating `None` as 0 ms.
pub fn parse_optional_time_expr(expr: Option<&str>) -> JaoResult<TimeOffset> {
    expr.map_or(Ok(TimeOffset::ZERO), parse_time_expr)
}

/// Seconds to whole milliseconds.
pub fn seconds(secs: f64) -> u64 {
    (secs * 1000.0).round() as u64
}

fn parse_number(tok: Option<&str>, expr: &str) -> JaoResult<f64> {
    let tok = tok.ok_or_else(|| JaoError::time_expression(format!("missing value in '{expr}'")))?;
    let v = tok
        .parse::<f64>()
        .map_err(|_| JaoError::time_expression(format!("invalid number '{tok}' in '{expr}'")))?;
    if !v.is_finite() || v < 0.0 {
        return Err(JaoError::time_expression(format!(
            "value must be a finite, non-negative number in '{expr}'"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/time/expr.rs"]
mod tests;
