use log::warn;
use regex::Regex;

use crate::gatherer_quirks::{is_passthrough_symbol, mapped_icon_symbol, NON_ASCII_REPLACEMENTS};

pub const LINE_BREAK: &str = "<br>";

lazy_static::lazy_static! {
    static ref WHITESPACE_AROUND_BREAK: Regex = Regex::new(r"[ \t]*<br>[ \t]*").unwrap();
    static ref SPACES_AND_TABS: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref SPACE_BETWEEN_SYMBOLS: Regex = Regex::new(r"\}\s+\{").unwrap();
}

/// Turns a fragment of card markup into patch text.
///
/// `<div>` (and `<br>`) boundaries become [`LINE_BREAK`] unless
/// `remove_newlines` is set, embedded symbol images become `{SYMBOL}`
/// tokens and every other tag is dropped. Afterwards entities are decoded,
/// whitespace is condensed and typographic dashes become `-`.
///
/// Escaped angle brackets stay escaped, so cleaned text never grows new tags.
pub fn clean_html(html: &str, remove_newlines: bool) -> String {
    let mut in_tag = false;
    let mut tag = String::new();
    let mut output = String::with_capacity(html.len());

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
                tag.push(c);
            }
            '>' if in_tag => {
                tag.push(c);
                match tag_name(&tag).as_str() {
                    "div" | "br" => {
                        if !remove_newlines && !output.trim().is_empty() {
                            output.push_str(LINE_BREAK);
                        }
                    }
                    "img" => {
                        if let Some(icon) = icon_name(&tag) {
                            output.push('{');
                            output.push_str(&translate_icon(icon));
                            output.push('}');
                        }
                    }
                    _ => {}
                }
                in_tag = false;
                tag.clear();
            }
            '\r' | '\n' => {}
            _ if in_tag => tag.push(c),
            _ => output.push(c),
        }
    }

    let decoded = decode(&output, true);
    let cleaned = WHITESPACE_AROUND_BREAK.replace_all(decoded.trim(), LINE_BREAK);
    let cleaned = SPACES_AND_TABS.replace_all(&cleaned, " ");
    let cleaned = SPACE_BETWEEN_SYMBOLS.replace_all(&cleaned, "}{");

    cleaned
        .replace('—', "-")
        .replace('–', "-")
        .replace('−', "-")
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// `<img src="/Handlers/Image.ashx?size=small&amp;name=tap&amp;type=symbol">` -> `tap`
fn icon_name(tag: &str) -> Option<&str> {
    let start = tag.find("name=")? + "name=".len();
    let rest = &tag[start..];
    let end = rest.find(['&', '"', '\'', ' ']).unwrap_or(rest.len());
    let icon = &rest[..end];
    (!icon.is_empty()).then_some(icon)
}

fn translate_icon(icon: &str) -> String {
    match mapped_icon_symbol(icon) {
        Some(symbol) => symbol.to_string(),
        None => {
            if !is_passthrough_symbol(icon) {
                warn!("Unknown symbol: {}", icon);
            }
            icon.to_string()
        }
    }
}

/// Decodes the entities the DOM serializer emits plus numeric references
fn decode(s: &str, keep_markup: bool) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match candidate.find(';').filter(|end| *end <= 10) {
            Some(end) => match decode_entity(&candidate[1..end]) {
                Some('<' | '>') if keep_markup => {
                    out.push_str(&candidate[..=end]);
                    rest = &candidate[end + 1..];
                }
                Some(c) => {
                    out.push(c);
                    rest = &candidate[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &candidate[1..];
                }
            },
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        "minus" => Some('−'),
        "rsquo" => Some('’'),
        "lsquo" => Some('‘'),
        "rdquo" => Some('”'),
        "ldquo" => Some('“'),
        "hellip" => Some('…'),
        "bull" => Some('•'),
        _ => {
            let numeric = entity.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Replaces known typographic characters with plain ASCII equivalents
pub fn remove_non_ascii(line: &str) -> String {
    NON_ASCII_REPLACEMENTS
        .iter()
        .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_clean_html_translates_symbols() {
        init();
        let html = r#"<div class="cardtextbox"><img src="/Handlers/Image.ashx?size=small&amp;name=tap&amp;type=symbol" alt="Tap" align="absbottom">: Add <img src="/Handlers/Image.ashx?size=small&amp;name=G&amp;type=symbol" alt="Green" align="absbottom">.</div>"#;
        assert_eq!(clean_html(html, false), "{T}: Add {G}.");
    }

    #[test]
    fn test_clean_html_special_icons() {
        init();
        let icon = |name: &str| {
            format!(
                r#"<img src="/Handlers/Image.ashx?size=small&amp;name={}&amp;type=symbol">"#,
                name
            )
        };
        let html = format!(
            "{} {} {} {} {} {} {}",
            icon("untap"),
            icon("snow"),
            icon("halfr"),
            icon("500"),
            icon("infinity"),
            icon("2W"),
            icon("10")
        );
        assert_eq!(clean_html(&html, true), "{Q}{S}{HR}{HW}{+oo}{2W}{10}");
    }

    #[test]
    fn test_clean_html_unknown_icon_is_kept() {
        init();
        let html = r#"<img src="/Handlers/Image.ashx?name=mystery&amp;type=symbol">"#;
        assert_eq!(clean_html(html, true), "{mystery}");
    }

    #[test]
    fn test_clean_html_divs_become_line_breaks() {
        let html = "<div class=\"value\">\r\n  <div class=\"cardtextbox\">Flying</div>\n  <div class=\"cardtextbox\">When this   enters,\tdraw a card.</div></div>";
        assert_eq!(
            clean_html(html, false),
            "Flying<br>When this enters, draw a card."
        );
        assert_eq!(
            clean_html(html, true),
            "Flying When this enters, draw a card."
        );
    }

    #[test]
    fn test_clean_html_dashes_and_entities() {
        let html = "<div class=\"value\">Creature  — Elf&nbsp;Druid</div><div>&quot;Bolas &amp; co.&quot; −3: x – y</div>";
        assert_eq!(
            clean_html(html, false),
            "Creature - Elf Druid<br>\"Bolas & co.\" -3: x - y"
        );
    }

    #[test]
    fn test_clean_html_is_idempotent() {
        let inputs = [
            "<div class=\"cardtextbox\">Flying</div><div class=\"cardtextbox\"><img src=\"x?name=tap&amp;t=1\"> :  Add <img src=\"x?name=R&amp;t=1\"> <img src=\"x?name=R&amp;t=1\">.</div>",
            "  <div>—Llanowar   penalty</div>  ",
            "Plain text with\ttabs and  spaces",
            "<div>Draw &lt;card&gt; or &#60;two&#62;</div>",
        ];
        for input in inputs {
            let once = clean_html(input, false);
            assert_eq!(clean_html(&once, false), once);
            let once = clean_html(input, true);
            assert_eq!(clean_html(&once, true), once);
        }
    }

    #[test]
    fn test_escaped_brackets_are_not_tags() {
        let once = clean_html("<div>Name a &lt;color&gt; &amp; &lt;type&gt;.</div>", false);
        assert_eq!(once, "Name a &lt;color&gt; & &lt;type&gt;.");
        assert_eq!(clean_html(&once, false), once);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode("a &amp; b", false), "a & b");
        assert_eq!(decode("&#39;quoted&#x27;", false), "'quoted'");
        assert_eq!(decode("AT&T", false), "AT&T");
        assert_eq!(decode("&unknown; &", false), "&unknown; &");
        assert_eq!(decode("&lt;b&gt;", false), "<b>");
        assert_eq!(decode("&lt;b&gt;", true), "&lt;b&gt;");
    }

    #[test]
    fn test_remove_non_ascii() {
        assert_eq!(
            remove_non_ascii("Æther Vial’s “text” — Lim-Dûl™ … • ©"),
            "Aether Vial's \"text\" - Lim-Dul(TM) ... * (C)"
        );
        assert_eq!(remove_non_ascii("Junún Efreet"), "Junun Efreet");
    }
}
