use crate::exif::TagSet;

/// Tags a report shows, in display order. Everything else is left out.
pub const REPORT_TAGS: &[&str] = &[
    "Make",
    "Model",
    "DateTime",
    "ExposureTime",
    "FNumber",
    "ISO",
    "Flash",
    "FocalLength",
    "WhiteBalance",
    "ColorSpace",
    "ExifImageWidth",
    "ExifImageHeight",
    "Orientation",
];

pub const GPS_LATITUDE: &str = "GPSLatitude";
pub const GPS_LONGITUDE: &str = "GPSLongitude";

/// Render one attachment's block of the report.
///
/// The first line is the attachment name, followed by `Tag: value` for each
/// allow-listed tag present, then `GPS: lat, lon` when both coordinates are
/// present. Pure: the same input always yields the same text.
///
/// ```rust
/// use exif_report::exif::{Tag, TagSet};
/// use exif_report::format::format_entry;
///
/// let mut tags = TagSet::new();
/// tags.insert("Make", Tag::new("Canon"));
/// tags.insert("Software", Tag::new("GIMP"));
/// assert_eq!(format_entry("a.jpg", &tags), "a.jpg\nMake: Canon");
/// ```
pub fn format_entry(name: &str, tags: &TagSet) -> String {
    let mut out = format!("{name}\n");

    for tag_name in REPORT_TAGS {
        if let Some(tag) = tags.get(tag_name) {
            out.push_str(&format!("{tag_name}: {}\n", tag.display_value()));
        }
    }

    if let (Some(lat), Some(lon)) = (tags.get(GPS_LATITUDE), tags.get(GPS_LONGITUDE)) {
        out.push_str(&format!("GPS: {}, {}\n", lat.display_value(), lon.display_value()));
    }

    out.trim_end().to_string()
}
