use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::prompts::Stage;

pub const UNKNOWN_WINDOW: &str = "Unknown window_id";

static EMPTY_LIST: Value = Value::Array(Vec::new());

/// Body of `POST /prompt_llm`. Every field is optional and loosely typed;
/// the client resends the whole idea history on each call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromptRequest {
    /// Stage tag: "B", "C", "D" or "E"
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "B")]
    pub window_id: Value,
    /// Free-text problem description
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub problem: Value,
    /// A list of problems for "B"; an object with `idea_b`..`idea_e` lists otherwise
    #[serde(default = "empty_list")]
    #[schema(value_type = Object)]
    pub ideas: Value,
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            window_id: Value::Null,
            problem: Value::Null,
            ideas: empty_list(),
        }
    }
}

/// Picks the known fields out of a JSON object; anything missing keeps its default.
impl From<Map<String, Value>> for PromptRequest {
    fn from(mut fields: Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            window_id: fields.remove("window_id").unwrap_or(defaults.window_id),
            problem: fields.remove("problem").unwrap_or(defaults.problem),
            ideas: fields.remove("ideas").unwrap_or(defaults.ideas),
        }
    }
}

impl PromptRequest {
    /// The requested stage, or `None` for anything that is not a known tag.
    pub fn stage(&self) -> Option<Stage> {
        self.window_id.as_str()?.parse().ok()
    }

    /// A named idea collection from the `ideas` mapping; missing keys and a
    /// non-object `ideas` both read as an empty list.
    pub fn idea_list(&self, key: &str) -> &Value {
        self.ideas
            .as_object()
            .and_then(|map| map.get(key))
            .unwrap_or(&EMPTY_LIST)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptResponse {
    pub text: String,
}

impl PromptResponse {
    pub fn unknown_window() -> Self {
        Self {
            text: UNKNOWN_WINDOW.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let req: PromptRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.window_id.is_null());
        assert!(req.problem.is_null());
        assert_eq!(req.ideas, json!([]));
        assert_eq!(req.stage(), None);
    }

    #[test]
    fn object_conversion_matches_serde_defaults() {
        let fields = match json!({"window_id": "D", "extra": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let converted = PromptRequest::from(fields);
        let decoded: PromptRequest =
            serde_json::from_value(json!({"window_id": "D", "extra": 1})).unwrap();

        assert_eq!(converted.window_id, decoded.window_id);
        assert_eq!(converted.problem, decoded.problem);
        assert_eq!(converted.ideas, decoded.ideas);
        assert_eq!(PromptRequest::default().ideas, json!([]));
    }

    #[test]
    fn stage_requires_a_known_string_tag() {
        let stage = |id: Value| {
            PromptRequest {
                window_id: id,
                ..Default::default()
            }
            .stage()
        };
        assert_eq!(stage(json!("B")), Some(Stage::Decompose));
        assert_eq!(stage(json!("E")), Some(Stage::Suggest));
        assert_eq!(stage(json!("b")), None);
        assert_eq!(stage(json!("A")), None);
        assert_eq!(stage(json!(3)), None);
    }

    #[test]
    fn idea_list_defaults_to_empty() {
        let req: PromptRequest = serde_json::from_value(json!({
            "window_id": "C",
            "ideas": {"idea_b": ["slow checkout"]}
        }))
        .unwrap();
        assert_eq!(req.idea_list("idea_b"), &json!(["slow checkout"]));
        assert_eq!(req.idea_list("idea_c"), &json!([]));

        let list_shaped: PromptRequest =
            serde_json::from_value(json!({"ideas": ["not a map"]})).unwrap();
        assert_eq!(list_shaped.idea_list("idea_d"), &json!([]));
    }
}
