//! Best-effort capture-timestamp extraction.
//!
//! This is deliberately *not* an EXIF parser. It scans the raw file bytes
//! for the ASCII marker `DateTimeOriginal`, then looks in a fixed window
//! around the marker (20 bytes before to 50 after) for a timestamp shaped
//! like `YYYY:MM:DD HH:MM:SS`, and reformats the date separators to dashes.
//!
//! Being a text scan over binary data, it can miss real timestamps and can
//! in principle match garbage that happens to contain the marker string.
//! That trade-off is accepted: any failure — missing marker, malformed
//! window, anything — yields `None`, never an error.

const MARKER: &[u8] = b"DateTimeOriginal";
const WINDOW_BEFORE: usize = 20;
const WINDOW_AFTER: usize = 50;

/// Scan raw image bytes for an EXIF-style capture timestamp.
///
/// Returns `YYYY-MM-DD HH:MM:SS` on a hit, `None` otherwise.
pub fn extract_capture_timestamp(bytes: &[u8]) -> Option<String> {
    let marker_pos = find_marker(bytes)?;
    let start = marker_pos.saturating_sub(WINDOW_BEFORE);
    let end = (marker_pos + WINDOW_AFTER).min(bytes.len());

    let window = &bytes[start..end];
    let raw = find_timestamp(window)?;
    Some(reformat(raw))
}

fn find_marker(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(MARKER.len())
        .position(|window| window == MARKER)
}

/// Find the first `DDDD:DD:DD DD:DD:DD` run in the window.
fn find_timestamp(window: &[u8]) -> Option<&[u8]> {
    const LEN: usize = 19;
    if window.len() < LEN {
        return None;
    }
    (0..=window.len() - LEN)
        .map(|i| &window[i..i + LEN])
        .find(|c| matches_shape(c))
}

/// Byte-shape check for `\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}`.
fn matches_shape(candidate: &[u8]) -> bool {
    candidate.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 | 13 | 16 => b == b':',
        10 => b == b' ',
        _ => b.is_ascii_digit(),
    })
}

/// `2024:01:15 10:30:00` → `2024-01-15 10:30:00` — only the date portion's
/// separators change.
fn reformat(raw: &[u8]) -> String {
    let mut out: Vec<u8> = raw.to_vec();
    out[4] = b'-';
    out[7] = b'-';
    // Shape is all-ASCII by construction.
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_with_timestamp_after_it() {
        let bytes = b"xxxxDateTimeOriginal\x00\x012024:01:15 10:30:00yyy";
        assert_eq!(
            extract_capture_timestamp(bytes),
            Some("2024-01-15 10:30:00".to_string())
        );
    }

    #[test]
    fn timestamp_before_the_marker_is_found() {
        // EXIF layouts sometimes place the value ahead of the tag name; the
        // window reaches 20 bytes back.
        let bytes = b"2024:06:01 08:00:00\x00DateTimeOriginal tail";
        assert_eq!(
            extract_capture_timestamp(bytes),
            Some("2024-06-01 08:00:00".to_string())
        );
    }

    #[test]
    fn no_marker_returns_none() {
        let bytes = b"plain bytes with a date 2024:01:15 10:30:00 but no tag";
        assert_eq!(extract_capture_timestamp(bytes), None);
    }

    #[test]
    fn marker_without_timestamp_returns_none() {
        let bytes = b"DateTimeOriginal but nothing date-shaped nearby......";
        assert_eq!(extract_capture_timestamp(bytes), None);
    }

    #[test]
    fn timestamp_outside_the_window_is_ignored() {
        let mut bytes = b"DateTimeOriginal".to_vec();
        bytes.extend_from_slice(&[b'.'; 60]);
        bytes.extend_from_slice(b"2024:01:15 10:30:00");
        assert_eq!(extract_capture_timestamp(&bytes), None);
    }

    #[test]
    fn malformed_timestamp_shapes_are_rejected() {
        for bad in [
            "2024:1:15 10:30:00",  // short month
            "2024-01-15 10:30:00", // wrong date separators
            "2024:01:15T10:30:00", // no space
        ] {
            let bytes = format!("DateTimeOriginal..{bad}");
            assert_eq!(extract_capture_timestamp(bytes.as_bytes()), None, "{bad}");
        }
    }

    #[test]
    fn binary_surroundings_are_fine() {
        let mut bytes = vec![0xFF, 0xD8, 0x00, 0x9B];
        bytes.extend_from_slice(b"DateTimeOriginal");
        bytes.extend_from_slice(&[0x00, 0x02]);
        bytes.extend_from_slice(b"2023:12:24 23:59:59");
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        assert_eq!(
            extract_capture_timestamp(&bytes),
            Some("2023-12-24 23:59:59".to_string())
        );
    }

    #[test]
    fn empty_input_returns_none() {
        assert_eq!(extract_capture_timestamp(&[]), None);
    }
}
