// Result accessor and output conversion. A lookup result is an opaque JSON
// payload of unpredictable shape, so the accessors are total: first element
// or a default. The converters are pure functions over the payload; the
// color flags only add styling, never structure.

use crate::countries::{self, CountryDetails};
use crossterm::style::Stylize;
use serde_json::Value;
use std::fmt::Write as _;

// Placeholder strings applied at the presentation boundary. Existing
// consumers match on these literals, so they must not change.
pub const UNKNOWN_NAME: &str = "unknown name";
pub const NO_ALTERNATE_NAME: &str = "no alternate name";
pub const UNKNOWN_EMAIL: &str = "unknown email";
const UNKNOWN_COUNTRY: &str = "UNKNOWN";

/// Read-only view over a lookup result.
#[derive(Debug, Clone)]
pub struct Format {
    payload: Value,
}

impl Format {
    pub fn new(payload: Value) -> Self {
        Format { payload }
    }

    /// The wrapped payload, untouched.
    pub fn json_value(&self) -> &Value {
        &self.payload
    }

    fn first_record(&self) -> Option<&Value> {
        self.payload.get("data")?.get(0)
    }

    /// Display name of the first record, if the payload has one.
    pub fn display_name(&self) -> Option<&str> {
        self.first_record()?.get("name")?.as_str()
    }

    /// Display name with the compatibility placeholder applied.
    pub fn name(&self) -> &str {
        self.display_name().unwrap_or(UNKNOWN_NAME)
    }

    pub fn alt_name(&self) -> Option<&str> {
        self.first_record()?.get("altName")?.as_str()
    }

    pub fn alternate_name(&self) -> &str {
        self.alt_name().unwrap_or(NO_ALTERNATE_NAME)
    }

    /// First entry of the address list, if any.
    pub fn first_address(&self) -> Option<&Value> {
        self.first_record()?.get("addresses")?.get(0)
    }

    /// First address entry, or an empty sequence when the payload has none.
    pub fn addresses(&self) -> Value {
        self.first_address()
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    pub fn email(&self) -> Option<&str> {
        self.first_record()?
            .get("internetAddresses")?
            .get(0)?
            .get("id")?
            .as_str()
    }

    pub fn email_id(&self) -> &str {
        self.email().unwrap_or(UNKNOWN_EMAIL)
    }

    /// Country metadata for the first address's country code. Codes outside
    /// the static table (including the sentinel) yield `None`.
    pub fn country_details(&self) -> Option<CountryDetails> {
        let code = self
            .first_address()
            .and_then(|address| address.get("countryCode"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_COUNTRY);
        countries::by_iso(code)
    }

    pub fn json(&self, color: bool, pretty: bool) -> String {
        to_json(&self.payload, color, pretty)
    }

    // The color flag exists for signature uniformity; XML carries no styling.
    pub fn xml(&self, _color: bool) -> String {
        to_xml(&self.payload)
    }

    pub fn yaml(&self, color: bool) -> String {
        to_yaml(&self.payload, color)
    }

    pub fn html(&self, color: bool) -> String {
        to_html(&self.payload, color)
    }

    pub fn text(&self, color: bool, space: bool) -> String {
        to_plain_text(&self.payload, color, space)
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn paint_key(text: &str, color: bool) -> String {
    if color {
        text.blue().to_string()
    } else {
        text.to_string()
    }
}

fn paint_string(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

fn paint_number(text: &str, color: bool) -> String {
    if color {
        text.magenta().to_string()
    } else {
        text.to_string()
    }
}

/// JSON rendering with the key/string/number palette; compact or pretty.
pub fn to_json(value: &Value, color: bool, pretty: bool) -> String {
    if !color {
        let rendered = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        return rendered.unwrap_or_default();
    }
    let mut out = String::new();
    json_node(&mut out, value, 0, pretty);
    out
}

fn json_node(out: &mut String, value: &Value, indent: usize, pretty: bool) {
    match value {
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if pretty {
                    out.push('\n');
                    out.push_str(&"  ".repeat(indent + 1));
                }
                // quoting via the serializer keeps escapes correct
                let quoted = serde_json::to_string(key).unwrap_or_default();
                out.push_str(&paint_key(&quoted, true));
                out.push_str(if pretty { ": " } else { ":" });
                json_node(out, item, indent + 1, pretty);
            }
            if pretty {
                out.push('\n');
                out.push_str(&"  ".repeat(indent));
            }
            out.push('}');
        }
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if pretty {
                    out.push('\n');
                    out.push_str(&"  ".repeat(indent + 1));
                }
                json_node(out, item, indent + 1, pretty);
            }
            if pretty {
                out.push('\n');
                out.push_str(&"  ".repeat(indent));
            }
            out.push(']');
        }
        Value::String(_) => out.push_str(&paint_string(&value.to_string(), true)),
        Value::Number(number) => out.push_str(&paint_number(&number.to_string(), true)),
        other => out.push_str(&other.to_string()),
    }
}

/// Structural JSON-to-XML translation: one `root` element, element per key,
/// array entries repeated as siblings under their key name, no attributes.
pub fn to_xml(value: &Value) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml_element(&mut out, "root", value, 0);
    out
}

fn xml_element(out: &mut String, key: &str, value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Array(items) => {
            for item in items {
                xml_element(out, key, item, depth);
            }
        }
        Value::Object(map) if map.is_empty() => {
            let _ = writeln!(out, "{pad}<{key}/>");
        }
        Value::Object(map) => {
            let _ = writeln!(out, "{pad}<{key}>");
            for (k, v) in map {
                xml_element(out, k, v, depth + 1);
            }
            let _ = writeln!(out, "{pad}</{key}>");
        }
        Value::Null => {
            let _ = writeln!(out, "{pad}<{key}/>");
        }
        scalar => {
            let _ = writeln!(out, "{pad}<{key}>{}</{key}>", xml_escape(&scalar_text(scalar)));
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// YAML rendering preserving key order and nesting; plain scalars.
pub fn to_yaml(value: &Value, color: bool) -> String {
    let mut out = String::new();
    yaml_block(&mut out, value, 0, color);
    out
}

fn yaml_block(out: &mut String, value: &Value, indent: usize, color: bool) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                if is_nested(item) {
                    let _ = writeln!(out, "{pad}{}:", paint_key(key, color));
                    yaml_block(out, item, indent + 1, color);
                } else {
                    let _ = writeln!(
                        out,
                        "{pad}{}: {}",
                        paint_key(key, color),
                        yaml_scalar(item, color)
                    );
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_nested(item) {
                    let _ = writeln!(out, "{pad}-");
                    yaml_block(out, item, indent + 1, color);
                } else {
                    let _ = writeln!(out, "{pad}- {}", yaml_scalar(item, color));
                }
            }
        }
        scalar => {
            let _ = writeln!(out, "{pad}{}", yaml_scalar(scalar, color));
        }
    }
}

fn yaml_scalar(value: &Value, color: bool) -> String {
    match value {
        Value::String(text) => paint_string(text, color),
        Value::Number(number) => paint_number(&number.to_string(), color),
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
        other => other.to_string(),
    }
}

/// HTML rendering as a table, nested tables for nested structures.
pub fn to_html(value: &Value, color: bool) -> String {
    html_node(value, color)
}

const TABLE_STYLE: &str = " border=\"1\" cellspacing=\"0\" cellpadding=\"4\"";
const HTML_KEY_STYLE: &str = " style=\"color:#2563eb;font-weight:bold\"";
const HTML_STRING_COLOR: &str = "#16a34a";
const HTML_NUMBER_COLOR: &str = "#c026d3";

fn html_node(value: &Value, color: bool) -> String {
    match value {
        Value::Object(map) => {
            let mut rows = String::new();
            for (key, item) in map {
                let key_style = if color { HTML_KEY_STYLE } else { "" };
                let _ = write!(
                    rows,
                    "<tr><td{key_style}>{}</td><td>{}</td></tr>",
                    html_escape(key),
                    html_node(item, color)
                );
            }
            format!("<table{TABLE_STYLE}>{rows}</table>")
        }
        Value::Array(items) => {
            let mut rows = String::new();
            for item in items {
                let _ = write!(rows, "<tr><td>{}</td></tr>", html_node(item, color));
            }
            format!("<table{TABLE_STYLE}>{rows}</table>")
        }
        Value::String(text) => html_span(&html_escape(text), color, HTML_STRING_COLOR),
        Value::Number(number) => html_span(&number.to_string(), color, HTML_NUMBER_COLOR),
        other => html_escape(&other.to_string()),
    }
}

fn html_span(text: &str, color: bool, css_color: &str) -> String {
    if color {
        format!("<span style=\"color:{css_color}\">{text}</span>")
    } else {
        text.to_string()
    }
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Plain-text rendering, one `key : value` line per field. `space` aligns
/// the values into a column per nesting level.
pub fn to_plain_text(value: &Value, color: bool, space: bool) -> String {
    let mut out = String::new();
    text_block(&mut out, value, 0, color, space);
    out
}

fn text_block(out: &mut String, value: &Value, indent: usize, color: bool, space: bool) {
    let pad = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            let width = if space {
                map.keys().map(String::len).max().unwrap_or(0)
            } else {
                0
            };
            for (key, item) in map {
                if is_nested(item) {
                    let _ = writeln!(out, "{pad}{}:", paint_key(key, color));
                    text_block(out, item, indent + 4, color, space);
                } else {
                    let padded = format!("{key:<width$}");
                    let _ = writeln!(
                        out,
                        "{pad}{} : {}",
                        paint_key(&padded, color),
                        text_scalar(item, color)
                    );
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_nested(item) {
                    text_block(out, item, indent, color, space);
                } else {
                    let _ = writeln!(out, "{pad}- {}", text_scalar(item, color));
                }
            }
        }
        scalar => {
            let _ = writeln!(out, "{pad}{}", text_scalar(scalar, color));
        }
    }
}

fn text_scalar(value: &Value, color: bool) -> String {
    match value {
        Value::String(text) => paint_string(text, color),
        Value::Number(number) => paint_number(&number.to_string(), color),
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
        other => other.to_string(),
    }
}
