use std::borrow::Cow;

/// Decoded in this order; `&amp;` goes last so `&amp;lt;` becomes `&lt;`, not `<`.
const ENTITIES: [(&str, &str); 5] = [
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Decodes the handful of HTML entities sample sources are stored with.
/// Borrows `input` when there's nothing to decode.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if memchr::memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }

    let mut output = Cow::Borrowed(input);
    for (entity, replacement) in ENTITIES {
        if output.contains(entity) {
            output = Cow::Owned(output.replace(entity, replacement));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::decode_entities;

    #[test]
    fn decodes_each_entity() {
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("it&#39;s"), "it's");
        assert_eq!(decode_entities("&lt;T&gt;"), "<T>");
        assert_eq!(decode_entities("a &amp; b"), "a & b");
    }

    #[test]
    fn ampersand_is_decoded_last() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;quot;&lt;"), "&quot;<");
    }

    #[test]
    fn unknown_entities_are_left_alone() {
        assert_eq!(decode_entities("&nbsp;&copy; & &"), "&nbsp;&copy; & &");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(decode_entities("List<string> x = new();"), Cow::Borrowed(_)));
    }

    #[test]
    fn decoding_decoded_text_is_a_no_op() {
        let once = decode_entities("var s = &quot;a&quot; + b &gt; c ? &#39;x&#39; : &lt;y&gt;;");
        let twice = decode_entities(&once);
        assert_eq!(once, twice);
        assert_eq!(twice, "var s = \"a\" + b > c ? 'x' : <y>;");
    }
}
