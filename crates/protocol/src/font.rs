/// Pixel size from a CSS font shorthand such as `"bold 20px system-ui"`.
///
/// Hosts that cannot hand the shorthand to a native text API (egui, SVG)
/// need the numeric size. Falls back to 16px when no `<n>px` token exists.
pub fn font_size_px(font: &str) -> f64 {
    font.split_whitespace()
        .filter_map(|token| token.strip_suffix("px"))
        .find_map(|n| n.parse::<f64>().ok())
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(16.0)
}

/// Family part of a CSS font shorthand (everything after the size token).
pub fn font_family(font: &str) -> &str {
    let mut rest = font.trim();
    while let Some((token, tail)) = rest.split_once(char::is_whitespace) {
        rest = tail.trim_start();
        if token.ends_with("px") {
            return rest;
        }
    }
    "sans-serif"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_token() {
        assert!((font_size_px("16px system-ui, sans-serif") - 16.0).abs() < f64::EPSILON);
        assert!((font_size_px("bold 28.5px serif") - 28.5).abs() < f64::EPSILON);
    }

    #[test]
    fn falls_back_without_size() {
        assert!((font_size_px("serif") - 16.0).abs() < f64::EPSILON);
        assert!((font_size_px("-3px serif") - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn extracts_family() {
        assert_eq!(font_family("20px system-ui, sans-serif"), "system-ui, sans-serif");
        assert_eq!(font_family("italic 10px serif"), "serif");
        assert_eq!(font_family("serif"), "sans-serif");
    }
}
