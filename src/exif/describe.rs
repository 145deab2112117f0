//! Human-readable descriptions for the tags a report shows.

use serde_json::Value;

/// Describe a raw tag value, keyed by canonical tag name.
///
/// Returns `None` when the tag has no special rendering or the value does not
/// have the expected shape; the report then falls back to the raw value.
pub fn describe(name: &str, value: &Value) -> Option<String> {
    match name {
        "Make" | "Model" | "DateTime" => text(value),
        "ExposureTime" => number(value).map(exposure_time),
        "FNumber" => number(value).map(|v| format!("f/{}", trim_float(v, 1))),
        "FocalLength" => number(value).map(|v| format!("{} mm", trim_float(v, 1))),
        "ISO" => integer(value).map(|v| v.to_string()),
        "Flash" => integer(value).map(flash),
        "WhiteBalance" => integer(value).and_then(white_balance).map(str::to_string),
        "ColorSpace" => integer(value).and_then(color_space).map(str::to_string),
        "Orientation" => integer(value).and_then(orientation).map(str::to_string),
        "ExifImageWidth" | "ExifImageHeight" => integer(value).map(|v| format!("{v} px")),
        _ => None,
    }
}

/// Text with NUL padding and surrounding whitespace removed.
fn text(value: &Value) -> Option<String> {
    let s = value
        .as_str()?
        .trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// A number, or a `[numerator, denominator]` rational.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Array(parts) if parts.len() == 2 => {
            let num = parts[0].as_f64()?;
            let den = parts[1].as_f64()?;
            if den == 0.0 { None } else { Some(num / den) }
        }
        _ => None,
    }
}

/// An integer, or the first element of an integer array.
fn integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::Array(parts) => parts.first()?.as_u64(),
        _ => None,
    }
}

fn exposure_time(seconds: f64) -> String {
    if seconds > 0.0 && seconds < 1.0 {
        format!("1/{}", (1.0 / seconds).round() as u64)
    } else {
        trim_float(seconds, 1)
    }
}

/// Format with at most `precision` decimals, dropping trailing zeros.
fn trim_float(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn flash(code: u64) -> String {
    let known = match code {
        0x00 => "No flash",
        0x01 => "Flash fired",
        0x05 => "Flash fired, return light not detected",
        0x07 => "Flash fired, return light detected",
        0x08 => "Flash on, did not fire",
        0x09 => "Flash fired, compulsory flash mode",
        0x0d => "Flash fired, compulsory flash mode, return light not detected",
        0x0f => "Flash fired, compulsory flash mode, return light detected",
        0x10 => "Flash did not fire, compulsory flash mode",
        0x18 => "Flash did not fire, auto mode",
        0x19 => "Flash fired, auto mode",
        0x1d => "Flash fired, auto mode, return light not detected",
        0x1f => "Flash fired, auto mode, return light detected",
        0x20 => "No flash function",
        0x41 => "Flash fired, red-eye reduction mode",
        0x45 => "Flash fired, red-eye reduction mode, return light not detected",
        0x47 => "Flash fired, red-eye reduction mode, return light detected",
        0x49 => "Flash fired, compulsory flash mode, red-eye reduction mode",
        0x59 => "Flash fired, auto mode, red-eye reduction mode",
        // Bit 0 is "flash fired" in every combination.
        _ if code & 1 == 1 => "Flash fired",
        _ => "Flash did not fire",
    };
    known.to_string()
}

fn white_balance(code: u64) -> Option<&'static str> {
    match code {
        0 => Some("Auto white balance"),
        1 => Some("Manual white balance"),
        _ => None,
    }
}

fn color_space(code: u64) -> Option<&'static str> {
    match code {
        1 => Some("sRGB"),
        2 => Some("Adobe RGB"),
        0xffff => Some("Uncalibrated"),
        _ => None,
    }
}

fn orientation(code: u64) -> Option<&'static str> {
    match code {
        1 => Some("top-left"),
        2 => Some("top-right"),
        3 => Some("bottom-right"),
        4 => Some("bottom-left"),
        5 => Some("left-top"),
        6 => Some("right-top"),
        7 => Some("right-bottom"),
        8 => Some("left-bottom"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exposure_time_fractions() {
        assert_eq!(describe("ExposureTime", &json!([1, 125])).as_deref(), Some("1/125"));
        assert_eq!(describe("ExposureTime", &json!([9997, 1000000])).as_deref(), Some("1/100"));
        assert_eq!(describe("ExposureTime", &json!([2, 1])).as_deref(), Some("2"));
        assert_eq!(describe("ExposureTime", &json!([5, 2])).as_deref(), Some("2.5"));
    }

    #[test]
    fn aperture_and_focal_length() {
        assert_eq!(describe("FNumber", &json!([28, 10])).as_deref(), Some("f/2.8"));
        assert_eq!(describe("FNumber", &json!([8, 1])).as_deref(), Some("f/8"));
        assert_eq!(describe("FocalLength", &json!([8670, 1000])).as_deref(), Some("8.7 mm"));
        assert_eq!(describe("FocalLength", &json!(50)).as_deref(), Some("50 mm"));
    }

    #[test]
    fn zero_denominator_is_not_described() {
        assert_eq!(describe("FNumber", &json!([28, 0])), None);
    }

    #[test]
    fn enumerations() {
        assert_eq!(describe("Flash", &json!(16)).as_deref(), Some("Flash did not fire, compulsory flash mode"));
        assert_eq!(describe("Flash", &json!(0x4f)).as_deref(), Some("Flash fired"));
        assert_eq!(describe("Flash", &json!(0x50)).as_deref(), Some("Flash did not fire"));
        assert_eq!(describe("WhiteBalance", &json!(0)).as_deref(), Some("Auto white balance"));
        assert_eq!(describe("ColorSpace", &json!(65535)).as_deref(), Some("Uncalibrated"));
        assert_eq!(describe("Orientation", &json!(6)).as_deref(), Some("right-top"));
        assert_eq!(describe("Orientation", &json!(9)), None);
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(describe("Make", &json!("Canon\0\0 ")).as_deref(), Some("Canon"));
        assert_eq!(describe("Model", &json!("\0")), None);
        assert_eq!(describe("Model", &json!(" \0EOS R5 \0\0")).as_deref(), Some("EOS R5"));
    }

    #[test]
    fn dimensions_and_iso() {
        assert_eq!(describe("ExifImageWidth", &json!(4032)).as_deref(), Some("4032 px"));
        assert_eq!(describe("ISO", &json!([400, 0])).as_deref(), Some("400"));
    }

    #[test]
    fn unknown_tags_have_no_description() {
        assert_eq!(describe("Software", &json!("GIMP")), None);
        assert_eq!(describe("ISO", &json!("fast")), None);
    }
}
