use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Bare `&`, optionally followed by one of the predefined XML entities
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(amp;|quot;|lt;|gt;|apos;)?").expect("static ampersand pattern")
});

/// Fix GPX text by escaping every `&` that does not start a predefined entity.
///
/// Already valid entities are left untouched, so the transform is idempotent.
///
/// Only the five predefined entities are recognized: a character reference
/// such as the `&#xA;` the XML writer emits for a newline inside an attribute
/// (`creator`, `link href`) becomes `&amp;#xA;`.
pub fn sanitize_gpx_text(data: &str) -> String {
    AMPERSAND
        .replace_all(data, |caps: &Captures| match caps.get(1) {
            Some(_) => caps[0].to_string(),
            None => "&amp;".to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_ampersand_escaped() {
        assert_eq!(
            sanitize_gpx_text("<name>Fish & Chips</name>"),
            "<name>Fish &amp; Chips</name>"
        );
        assert_eq!(sanitize_gpx_text("&"), "&amp;");
        assert_eq!(sanitize_gpx_text("a&&b"), "a&amp;&amp;b");
    }

    #[test]
    fn test_valid_entities_untouched() {
        let text = "&amp; &quot; &lt; &gt; &apos;";
        assert_eq!(sanitize_gpx_text(text), text);
    }

    #[test]
    fn test_other_entities_escaped() {
        // Numeric and unknown named entities are not in the allowed set
        assert_eq!(sanitize_gpx_text("&#38;"), "&amp;#38;");
        assert_eq!(sanitize_gpx_text("&nbsp;"), "&amp;nbsp;");
        assert_eq!(sanitize_gpx_text("&amp"), "&amp;amp");
    }

    #[test]
    fn test_attribute_newline_reference_escaped() {
        assert_eq!(
            sanitize_gpx_text(r#"<gpx creator="line one&#xA;line two">"#),
            r#"<gpx creator="line one&amp;#xA;line two">"#
        );
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "",
            "plain",
            "R&D &amp; co &lt;x&gt;",
            "&&amp;&quot&apos;",
            "<desc>Source: OSM & contributors</desc>",
        ] {
            let once = sanitize_gpx_text(text);
            assert_eq!(sanitize_gpx_text(&once), once, "input {:?}", text);
        }
    }
}
