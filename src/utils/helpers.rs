//! Field parsing helpers shared by the log reader.

/// Parse a frame time field in milliseconds.
///
/// Accepts plain decimal values such as `"33.41"` or `" 16.70 "`. The value
/// must be a finite number greater than zero, since frame rates are derived
/// by dividing by it.
pub fn parse_frame_time_ms(field: &str) -> Result<f64, String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Err("empty frame time field".to_string());
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("frame time {:?} is not a number", trimmed))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("frame time {} must be a positive, finite value", value));
    }
    Ok(value)
}
