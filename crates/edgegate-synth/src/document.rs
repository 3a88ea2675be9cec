//! Terraform JSON document model
//!
//! Builds the `main.tf.json` for one stack. Every resource entry carries a
//! CDK-style `"//": {"metadata": {"path": "stack/construct/element"}}`
//! annotation; the reconciliation engine uses those paths to locate the
//! intended entry of each resource kind.

use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::Path;

/// One synthesized Terraform JSON document.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TfDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform: Option<Value>,

    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub variable: Map<String, Value>,

    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub provider: Map<String, Value>,

    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub data: Map<String, Value>,

    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub resource: Map<String, Value>,

    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub output: Map<String, Value>,

    /// Terraform 1.5+ import blocks
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub import: Vec<Value>,
}

/// Input variable definition
#[derive(Debug, Clone)]
pub struct TfVariable {
    pub var_type: String,
    pub description: String,
    pub sensitive: bool,
    pub default: Option<Value>,
}

impl TfVariable {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            var_type: "string".to_string(),
            description: description.into(),
            sensitive: false,
            default: None,
        }
    }

    pub fn string_list(description: impl Into<String>) -> Self {
        Self {
            var_type: "list(string)".to_string(),
            description: description.into(),
            sensitive: false,
            default: None,
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert("type".to_string(), json!(self.var_type));
        body.insert("description".to_string(), json!(self.description));
        if self.sensitive {
            body.insert("sensitive".to_string(), json!(true));
        }
        if let Some(default) = &self.default {
            body.insert("default".to_string(), default.clone());
        }
        Value::Object(body)
    }
}

impl TfDocument {
    /// New document with a per-stack/per-environment local backend.
    pub fn new(stack_id: &str, environment: &str) -> Self {
        Self {
            terraform: Some(json!({
                "backend": {
                    "local": {
                        "path": format!("./terraform-state/{stack_id}/{environment}/terraform.tfstate")
                    }
                }
            })),
            ..Default::default()
        }
    }

    /// Declare provider requirements in the `terraform` block
    pub fn require_provider(&mut self, name: &str, source: &str, version: &str) {
        let terraform = self
            .terraform
            .get_or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(block) = terraform {
            let required = block
                .entry("required_providers".to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(providers) = required {
                providers.insert(
                    name.to_string(),
                    json!({"source": source, "version": version}),
                );
            }
        }
    }

    pub fn add_variable(&mut self, name: &str, variable: TfVariable) {
        self.variable.insert(name.to_string(), variable.to_value());
    }

    pub fn add_provider(&mut self, name: &str, body: Value) {
        self.provider.insert(name.to_string(), body);
    }

    pub fn add_data(&mut self, data_type: &str, key: &str, body: Value) {
        nested_insert(&mut self.data, data_type, key, body);
    }

    /// Insert a resource entry, annotated with its construct path.
    pub fn add_resource(&mut self, resource_type: &str, key: &str, body: Value, path: &str) {
        let mut body = body;
        if let Value::Object(entry) = &mut body {
            entry.insert("//".to_string(), json!({"metadata": {"path": path}}));
        }
        nested_insert(&mut self.resource, resource_type, key, body);
    }

    pub fn add_output(&mut self, name: &str, value: Value, description: &str) {
        self.output.insert(
            name.to_string(),
            json!({"value": value, "description": description}),
        );
    }

    /// Add a Terraform import block binding an existing object to an
    /// address on the next apply.
    pub fn add_import(&mut self, to: &str, id: &str) {
        self.import.push(json!({"to": to, "id": id}));
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write the document as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), "writing stack document");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SynthError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| SynthError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn nested_insert(map: &mut Map<String, Value>, outer: &str, key: &str, body: Value) {
    let entry = map
        .entry(outer.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(entries) = entry {
        entries.insert(key.to_string(), body);
    }
}
