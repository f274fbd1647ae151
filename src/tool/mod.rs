//! Exposes a decision tree as a function an LLM can call.
//!
//! The tool-calling layer owns argument validation. A [`DecisionTool`] only
//! describes its parameters as JSON Schema and forwards whatever object it is
//! handed to the evaluator, keeping the object's key order.

use crate::error::ToolError;
use crate::evaluator::{Arguments, Evaluator};
use crate::tree::Tree;
use serde_json::{Map, Value as Json, json};

/// The JSON Schema type of a tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    Integer,
    Number,
    String,
    Boolean,
    /// A string restricted to the listed variants.
    Enum(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolParameter {
    pub name: String,
    pub kind: ParameterKind,
    pub description: String,
    pub required: bool,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn schema(&self) -> Json {
        let mut property = Map::new();
        let type_name = match &self.kind {
            ParameterKind::Integer => "integer",
            ParameterKind::Number => "number",
            ParameterKind::String | ParameterKind::Enum(_) => "string",
            ParameterKind::Boolean => "boolean",
        };
        property.insert("type".to_string(), json!(type_name));
        property.insert("description".to_string(), json!(self.description));
        if let ParameterKind::Enum(variants) = &self.kind {
            property.insert("enum".to_string(), json!(variants));
        }
        Json::Object(property)
    }
}

/// A decision tree packaged with the metadata a tool-calling model needs.
#[derive(Debug, Clone)]
pub struct DecisionTool {
    pub name: String,
    pub description: String,
    pub tree: Tree,
    pub parameters: Vec<ToolParameter>,
}

impl DecisionTool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, tree: Tree) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tree,
            parameters: Vec::new(),
        }
    }

    pub fn parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The function definition in JSON Schema form:
    /// `{"name", "description", "parameters": {"type": "object", "properties", "required"}}`.
    pub fn schema(&self) -> Json {
        let properties: Map<String, Json> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    /// Evaluates the tree with a tool-call argument object and returns the
    /// `{"decision", "reason", "path_taken"}` payload.
    pub fn call(&self, evaluator: &Evaluator, arguments: &Json) -> Result<Json, ToolError> {
        let args = Arguments::from_json(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        tracing::debug!(tool = %self.name, arguments = args.len(), "tool invoked");
        let result = evaluator.eval(&self.tree, &args)?;
        Ok(result.to_json())
    }

    /// Like [`call`](Self::call), but takes the raw JSON argument string a model emits.
    pub fn call_str(&self, evaluator: &Evaluator, arguments: &str) -> Result<Json, ToolError> {
        let parsed: Json = serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        self.call(evaluator, &parsed)
    }
}
