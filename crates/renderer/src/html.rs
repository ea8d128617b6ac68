//! Small helpers for emitting HTML fragments.

/// Escape text for use in HTML element content or quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a value as JSON that is safe to inline in a `<script>` block.
pub fn script_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Fill `{{name}}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so a value that itself contains
/// `{{...}}` comes out verbatim. Unknown placeholders are left in place.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("0.0 – 0.1"), "0.0 – 0.1");
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_script_json_breaks_closing_tags() {
        let json = script_json(&"</script>").unwrap();
        assert_eq!(json, "\"<\\/script>\"");
    }

    #[test]
    fn test_fill_template() {
        let out = fill_template("<h1>{{title}}</h1>{{body}}", &[("title", "T"), ("body", "B")]);
        assert_eq!(out, "<h1>T</h1>B");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("{{a}}|{{b}}", &[("a", "{{b}}"), ("b", "second")]);
        assert_eq!(out, "{{b}}|second");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed() {
        assert_eq!(fill_template("x {{nope}} y", &[]), "x {{nope}} y");
        assert_eq!(fill_template("x {{open", &[("open", "v")]), "x {{open");
    }
}
