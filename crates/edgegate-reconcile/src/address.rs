//! Resource kinds and state addresses

use std::fmt;

/// The four resource kinds the auto-import handles.
///
/// `ALL` is the fixed pass order; each pass runs independently of the
/// others' outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    AccessApplication,
    DnsRecord,
    IdentityProvider,
    AccessPolicy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::AccessApplication,
        ResourceKind::DnsRecord,
        ResourceKind::IdentityProvider,
        ResourceKind::AccessPolicy,
    ];

    /// Terraform resource type for this kind
    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceKind::AccessApplication => "cloudflare_zero_trust_access_application",
            ResourceKind::DnsRecord => "cloudflare_dns_record",
            ResourceKind::IdentityProvider => "cloudflare_zero_trust_access_identity_provider",
            ResourceKind::AccessPolicy => "cloudflare_zero_trust_access_policy",
        }
    }

    /// Expected suffix of the synthesized `//`-metadata path.
    ///
    /// Used to pick the intended entry when the graph holds more than one
    /// resource of the kind.
    pub fn path_suffix(&self) -> &'static str {
        match self {
            ResourceKind::AccessApplication => "/application",
            ResourceKind::DnsRecord => "/record",
            ResourceKind::IdentityProvider => "/google_idp",
            ResourceKind::AccessPolicy => "/policy",
        }
    }

    /// Human-readable label for logs
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::AccessApplication => "Access application",
            ResourceKind::DnsRecord => "DNS record",
            ResourceKind::IdentityProvider => "Identity Provider",
            ResourceKind::AccessPolicy => "Access Policy",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Address of one declared resource in the IaC engine's state,
/// e.g. `cloudflare_dns_record.hp_subdomain_record`.
///
/// At most one physical remote object is ever bound to one address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceAddress {
    resource_type: String,
    local_key: String,
}

impl ResourceAddress {
    pub fn new(kind: ResourceKind, local_key: impl Into<String>) -> Self {
        Self {
            resource_type: kind.resource_type().to_string(),
            local_key: local_key.into(),
        }
    }

    /// Parse a `type.name` state address
    pub fn parse(addr: &str) -> Option<Self> {
        let (resource_type, local_key) = addr.split_once('.')?;
        if resource_type.is_empty() || local_key.is_empty() {
            return None;
        }
        Some(Self {
            resource_type: resource_type.to_string(),
            local_key: local_key.to_string(),
        })
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn local_key(&self) -> &str {
        &self.local_key
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.local_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_roundtrip() {
        let addr = ResourceAddress::new(ResourceKind::DnsRecord, "hp_subdomain_record");
        assert_eq!(addr.to_string(), "cloudflare_dns_record.hp_subdomain_record");

        let parsed = ResourceAddress::parse(&addr.to_string()).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_parse_rejects_bare_type() {
        assert!(ResourceAddress::parse("cloudflare_dns_record").is_none());
        assert!(ResourceAddress::parse("").is_none());
    }
}
