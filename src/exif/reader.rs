use nom_exif::{EntryValue, ExifIter, LatLng, MediaParser, MediaSource};
use serde_json::{Value, json};
use std::io::Cursor;

use super::describe::describe;
use super::tags::{DecodeError, ExifDecoder, Tag, TagSet};

/// Names for the tag codes reports care about, overriding the decoder's own
/// naming so the formatter's allow-list can match them.
fn canonical_name(code: u16) -> Option<&'static str> {
    match code {
        0x010F => Some("Make"),
        0x0110 => Some("Model"),
        0x0112 => Some("Orientation"),
        0x0132 => Some("DateTime"),
        0x829A => Some("ExposureTime"),
        0x829D => Some("FNumber"),
        0x8827 => Some("ISO"),
        0x9209 => Some("Flash"),
        0x920A => Some("FocalLength"),
        0xA001 => Some("ColorSpace"),
        0xA002 => Some("ExifImageWidth"),
        0xA003 => Some("ExifImageHeight"),
        0xA403 => Some("WhiteBalance"),
        _ => None,
    }
}

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// [`ExifDecoder`] backed by `nom-exif`.
///
/// Unrecognized containers are decode errors. A recognized container without
/// an EXIF block decodes to an empty [`TagSet`]; one whose EXIF block is
/// present but unreadable is a decode error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NomExifDecoder;

impl NomExifDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ExifDecoder for NomExifDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<TagSet, DecodeError> {
        let ms = MediaSource::seekable(Cursor::new(bytes.to_vec()))
            .map_err(|e| DecodeError::new(e.to_string()))?;

        let mut tags = TagSet::new();
        if !ms.has_exif() {
            log::debug!("Container has no EXIF support, nothing to decode");
            return Ok(tags);
        }

        let mut parser = MediaParser::new();
        let iter: ExifIter = match parser.parse(ms) {
            Ok(iter) => iter,
            // nom-exif reports a missing APP1 and a broken one the same way,
            // so look at the container to tell them apart.
            Err(e) => match exif_segment_present(bytes) {
                Some(false) => {
                    log::debug!("No EXIF data found: {e}");
                    return Ok(tags);
                }
                _ => return Err(DecodeError::new(format!("EXIF block is unreadable: {e}"))),
            },
        };

        // Parse GPS info before draining the iterator
        let gps_info = iter.parse_gps_info().ok().flatten();

        for mut entry in iter {
            let code = entry.tag_code();
            let name = canonical_name(code)
                .map(str::to_string)
                .or_else(|| entry.tag().map(|t| format!("{t:?}")))
                .unwrap_or_else(|| format!("0x{code:04x}"));

            let Some(value) = entry.take_value() else {
                continue;
            };

            let raw = entry_to_json(&value);
            let mut tag = Tag::new(raw.clone());
            if let Some(desc) = describe(&name, &raw) {
                tag = tag.with_description(desc);
            }
            // The primary IFD comes first; later IFDs (thumbnail) never override it.
            tags.insert_first(name, tag);
        }

        if let Some(gps) = gps_info {
            tags.insert("GPSLatitudeRef", ref_tag(gps.latitude_ref));
            tags.insert("GPSLatitude", coordinate_tag(&gps.latitude, gps.latitude_ref));
            tags.insert("GPSLongitudeRef", ref_tag(gps.longitude_ref));
            tags.insert("GPSLongitude", coordinate_tag(&gps.longitude, gps.longitude_ref));
        }

        log::debug!("Decoded {} EXIF tags", tags.len());
        Ok(tags)
    }
}

/// Convert an EntryValue into the uniform JSON shape used by [`Tag::value`].
///
/// Rationals become `[numerator, denominator]`; anything without a natural
/// JSON form is kept as its display string.
fn entry_to_json(value: &EntryValue) -> Value {
    match value {
        EntryValue::Text(s) => Value::String(
            s.trim_matches(|c: char| c == '\0' || c.is_whitespace())
                .to_string(),
        ),
        EntryValue::URational(r) => json!([r.0, r.1]),
        EntryValue::IRational(r) => json!([r.0, r.1]),
        EntryValue::U8(v) => json!(v),
        EntryValue::U16(v) => json!(v),
        EntryValue::U32(v) => json!(v),
        other => Value::String(other.to_string()),
    }
}

/// Whether the container carries an EXIF block at all.
///
/// TIFF is always EXIF. JPEG markers are walked up to the scan data looking
/// for an APP1 `Exif` segment. `None` for anything else.
fn exif_segment_present(bytes: &[u8]) -> Option<bool> {
    if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        return Some(true);
    }
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return Some(false);
        }
        let marker = bytes[pos + 1];
        match marker {
            // fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            // EOI, SOS
            0xD9 | 0xDA => return Some(false),
            // standalone markers carry no length
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        if marker == 0xE1 && bytes[pos + 4..].starts_with(EXIF_HEADER) {
            return Some(true);
        }
        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        pos += 2 + len;
    }
    Some(false)
}

fn ref_tag(reference: char) -> Tag {
    let desc = match reference {
        'N' => "North",
        'S' => "South",
        'E' => "East",
        'W' => "West",
        _ => "",
    };
    Tag::new(reference.to_string()).with_description(desc)
}

/// Raw `[deg, min, sec]`, described as signed decimal degrees.
fn coordinate_tag(latlng: &LatLng, reference: char) -> Tag {
    let parts = [
        rational_to_f64(latlng.0.0, latlng.0.1),
        rational_to_f64(latlng.1.0, latlng.1.1),
        rational_to_f64(latlng.2.0, latlng.2.1),
    ];
    let decimal = latlng_to_decimal(latlng, reference);
    Tag::new(json!(parts)).with_description(format!("{decimal:.6}"))
}

fn rational_to_f64(num: u32, den: u32) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to decimal degrees.
fn latlng_to_decimal(latlng: &LatLng, reference: char) -> f64 {
    let degrees = rational_to_f64(latlng.0.0, latlng.0.1);
    let minutes = rational_to_f64(latlng.1.0, latlng.1.1);
    let seconds = rational_to_f64(latlng.2.0, latlng.2.1);

    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;

    if reference == 'S' || reference == 'W' {
        coord = -coord;
    }

    coord
}
