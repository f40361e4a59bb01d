#![forbid(unsafe_code)]

//! Entity escaping for C14N output.
//!
//! Text nodes: `&` `<` `>` and carriage return are replaced.
//! Attribute values additionally replace `"`, tab and line feed, but keep `>`.
//! Processing instruction data only replaces carriage return.

/// Append `s` to `out` escaped as text node content.
pub fn escape_text_into(out: &mut Vec<u8>, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.extend_from_slice(b"&amp;"),
            '<' => out.extend_from_slice(b"&lt;"),
            '>' => out.extend_from_slice(b"&gt;"),
            '\r' => out.extend_from_slice(b"&#xD;"),
            _ => push_char(out, ch),
        }
    }
}

/// Append `s` to `out` escaped as an attribute value.
pub fn escape_attr_into(out: &mut Vec<u8>, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.extend_from_slice(b"&amp;"),
            '<' => out.extend_from_slice(b"&lt;"),
            '"' => out.extend_from_slice(b"&quot;"),
            '\t' => out.extend_from_slice(b"&#x9;"),
            '\n' => out.extend_from_slice(b"&#xA;"),
            '\r' => out.extend_from_slice(b"&#xD;"),
            _ => push_char(out, ch),
        }
    }
}

/// Append processing instruction data to `out`.
pub fn escape_pi_into(out: &mut Vec<u8>, s: &str) {
    for ch in s.chars() {
        if ch == '\r' {
            out.extend_from_slice(b"&#xD;");
        } else {
            push_char(out, ch);
        }
    }
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}
