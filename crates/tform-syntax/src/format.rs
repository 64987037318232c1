//! Canonical textual output for evaluated values.
//!
//! Structs print one field per line, indented with tabs. Lists of scalars
//! stay on one line; any other non-empty list prints one element per line
//! with trailing commas. The output of [`format_file`] parses back to the same
//! data.

use tform_types::{is_identifier, quote, Struct, Value};

/// Words the parser reads as something other than a reference.
const RESERVED: &[&str] = &[
    "let", "if", "null", "true", "false", "int", "float", "number", "string", "bool",
];

/// Format the fields of a top-level struct as file declarations, without
/// the enclosing braces.
pub fn format_file(data: &Struct) -> String {
    let mut out = String::new();
    for field in data {
        out.push_str(&format_label(&field.label));
        out.push_str(": ");
        write_value(&mut out, &field.value, 0);
        out.push('\n');
    }
    out
}

/// Format a single value as an expression.
pub fn format_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

/// A field label, quoted unless it is a plain, unreserved identifier.
pub fn format_label(label: &str) -> String {
    if is_identifier(label) && !RESERVED.contains(&label) {
        label.to_string()
    } else {
        quote(label)
    }
}

fn format_float(f: f64) -> String {
    // `Debug` keeps a decimal point or exponent, so the text reads back as a float.
    format!("{f:?}")
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Top => out.push('_'),
        Value::Kind(kind) => out.push_str(kind.keyword()),
        Value::Bottom(_) => out.push_str("_|_"),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Struct(s) if s.is_empty() => out.push_str("{}"),
        Value::Struct(s) => {
            out.push_str("{\n");
            for field in s {
                indent(out, depth + 1);
                out.push_str(&format_label(&field.label));
                out.push_str(": ");
                write_value(out, &field.value, depth + 1);
                out.push('\n');
            }
            indent(out, depth);
            out.push('}');
        }
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::List(items) if items.iter().all(Value::is_scalar) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, depth);
            }
            out.push(']');
        }
        Value::List(items) => {
            out.push_str("[\n");
            for item in items {
                indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push(']');
        }
    }
}
