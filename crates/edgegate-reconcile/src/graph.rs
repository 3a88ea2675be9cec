//! Synthesized resource graph lookup
//!
//! The synthesizer annotates every resource entry with a CDK-style
//! `"//": {"metadata": {"path": "stack/construct/element"}}` node. The
//! lookup prefers the entry whose path ends with the kind's expected
//! suffix and falls back to the first entry of the kind.

use crate::address::ResourceKind;
use serde_json::Value;

/// Read-only view over a synthesized Terraform JSON document.
pub struct ResourceGraph {
    root: Value,
}

impl ResourceGraph {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Local key of the intended entry for `kind`, if the kind is declared.
    pub fn find_local_key(&self, kind: ResourceKind) -> Option<String> {
        let entries = self
            .root
            .get("resource")?
            .get(kind.resource_type())?
            .as_object()?;
        if entries.is_empty() {
            return None;
        }

        let preferred = entries.iter().find(|(_, node)| {
            node.get("//")
                .and_then(|m| m.get("metadata"))
                .and_then(|m| m.get("path"))
                .and_then(Value::as_str)
                .is_some_and(|path| path.ends_with(kind.path_suffix()))
        });

        preferred
            .map(|(key, _)| key.clone())
            .or_else(|| entries.keys().next().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_metadata_path_suffix() {
        let graph = ResourceGraph::new(json!({
            "resource": {
                "cloudflare_zero_trust_access_application": {
                    "aux_app": {
                        "//": {"metadata": {"path": "cloudflare/aux/launcher"}}
                    },
                    "hp_access_application": {
                        "//": {"metadata": {"path": "cloudflare/hp_access/application"}}
                    }
                }
            }
        }));
        assert_eq!(
            graph.find_local_key(ResourceKind::AccessApplication).unwrap(),
            "hp_access_application"
        );
    }

    #[test]
    fn test_falls_back_to_first_entry() {
        let graph = ResourceGraph::new(json!({
            "resource": {
                "cloudflare_dns_record": {
                    "some_record": {"name": "hp", "type": "A"}
                }
            }
        }));
        assert_eq!(
            graph.find_local_key(ResourceKind::DnsRecord).unwrap(),
            "some_record"
        );
    }

    #[test]
    fn test_absent_kind() {
        let graph = ResourceGraph::new(json!({"resource": {}}));
        assert!(graph.find_local_key(ResourceKind::AccessPolicy).is_none());

        let graph = ResourceGraph::new(json!({}));
        assert!(graph.find_local_key(ResourceKind::AccessPolicy).is_none());
    }
}
