//! Text rendering of JSON values for prompt bodies.
//!
//! Idea lists are shown to the model as bracketed literals with quoted
//! items, e.g. `['Users churn', "Support can't keep up"]`. Strings pick
//! the quote character that avoids escaping, and scalars use the
//! `None`/`True`/`False` spellings.

use serde_json::Value;

/// Renders the problem text: strings verbatim, `null` as empty.
pub fn problem_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => literal(other),
    }
}

/// Renders any value as a literal, quoting nested strings.
pub fn literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(&mut out, value);
    out
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_literal(out, item);
            }
            out.push('}');
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_list_renders_as_brackets() {
        assert_eq!(literal(&json!([])), "[]");
    }

    #[test]
    fn strings_are_single_quoted_and_comma_separated() {
        assert_eq!(
            literal(&json!(["Users churn", "Onboarding is slow"])),
            "['Users churn', 'Onboarding is slow']"
        );
    }

    #[test]
    fn quote_choice_avoids_escaping_apostrophes() {
        assert_eq!(literal(&json!(["can't"])), "[\"can't\"]");
        assert_eq!(
            literal(&json!(["it's \"fine\""])),
            "['it\\'s \"fine\"']"
        );
        assert_eq!(literal(&json!(["a\nb"])), "['a\\nb']");
    }

    #[test]
    fn scalars_and_maps_use_literal_spellings() {
        assert_eq!(literal(&json!([null, true, false, 3, 1.5])), "[None, True, False, 3, 1.5]");
        assert_eq!(
            literal(&json!({"idea_b": ["x"], "idea_c": []})),
            "{'idea_b': ['x'], 'idea_c': []}"
        );
    }

    #[test]
    fn problem_text_is_verbatim() {
        assert_eq!(problem_text(&json!("Our café loses customers")), "Our café loses customers");
        assert_eq!(problem_text(&Value::Null), "");
        assert_eq!(problem_text(&json!(42)), "42");
    }
}
