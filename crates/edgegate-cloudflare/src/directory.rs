//! Directory port implementation
//!
//! Adapts the API client to the reconciliation engine's `RemoteDirectory`
//! trait. Client errors map onto `ReconcileError::Api`, which aborts only
//! the current resource kind's pass.

use crate::client::{
    AccessAppInfo, AccessPolicyInfo, CloudflareClient, DnsRecordInfo, IdentityProviderInfo,
};
use crate::error::CloudflareError;
use async_trait::async_trait;
use edgegate_reconcile::{ReconcileError, RemoteCandidate, RemoteDirectory};

fn api_error(e: CloudflareError) -> ReconcileError {
    ReconcileError::Api(e.to_string())
}

impl From<AccessAppInfo> for RemoteCandidate {
    fn from(app: AccessAppInfo) -> Self {
        RemoteCandidate {
            id: app.id,
            name: app.name,
            domain: app.domain,
            kind: app.app_type,
        }
    }
}

impl From<DnsRecordInfo> for RemoteCandidate {
    fn from(record: DnsRecordInfo) -> Self {
        RemoteCandidate {
            id: record.id,
            name: record.name,
            domain: None,
            kind: record.record_type,
        }
    }
}

impl From<IdentityProviderInfo> for RemoteCandidate {
    fn from(idp: IdentityProviderInfo) -> Self {
        RemoteCandidate {
            id: idp.id,
            name: idp.name,
            domain: None,
            kind: idp.idp_type,
        }
    }
}

impl From<AccessPolicyInfo> for RemoteCandidate {
    fn from(policy: AccessPolicyInfo) -> Self {
        RemoteCandidate {
            id: policy.id,
            name: policy.name,
            domain: None,
            kind: None,
        }
    }
}

#[async_trait]
impl RemoteDirectory for CloudflareClient {
    async fn list_access_apps(
        &self,
        domain: &str,
    ) -> edgegate_reconcile::Result<Vec<RemoteCandidate>> {
        let apps = CloudflareClient::list_access_apps(self, domain)
            .await
            .map_err(api_error)?;
        Ok(apps.into_iter().map(Into::into).collect())
    }

    async fn get_access_app(&self, id: &str) -> edgegate_reconcile::Result<Option<RemoteCandidate>> {
        Ok(CloudflareClient::get_access_app(self, id)
            .await
            .map_err(api_error)?
            .map(Into::into))
    }

    async fn active_zone_id(&self, domain: &str) -> edgegate_reconcile::Result<Option<String>> {
        CloudflareClient::active_zone_id(self, domain)
            .await
            .map_err(api_error)
    }

    async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> edgegate_reconcile::Result<Vec<RemoteCandidate>> {
        let records = CloudflareClient::list_dns_records(self, zone_id, record_type, name)
            .await
            .map_err(api_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn get_dns_record(
        &self,
        zone_id: &str,
        id: &str,
    ) -> edgegate_reconcile::Result<Option<RemoteCandidate>> {
        Ok(CloudflareClient::get_dns_record(self, zone_id, id)
            .await
            .map_err(api_error)?
            .map(Into::into))
    }

    async fn list_identity_providers(&self) -> edgegate_reconcile::Result<Vec<RemoteCandidate>> {
        let idps = CloudflareClient::list_identity_providers(self)
            .await
            .map_err(api_error)?;
        Ok(idps.into_iter().map(Into::into).collect())
    }

    async fn get_identity_provider(
        &self,
        id: &str,
    ) -> edgegate_reconcile::Result<Option<RemoteCandidate>> {
        Ok(CloudflareClient::get_identity_provider(self, id)
            .await
            .map_err(api_error)?
            .map(Into::into))
    }

    async fn list_access_policies(&self) -> edgegate_reconcile::Result<Vec<RemoteCandidate>> {
        let policies = CloudflareClient::list_access_policies(self)
            .await
            .map_err(api_error)?;
        Ok(policies.into_iter().map(Into::into).collect())
    }

    async fn get_access_policy(
        &self,
        id: &str,
    ) -> edgegate_reconcile::Result<Option<RemoteCandidate>> {
        Ok(CloudflareClient::get_access_policy(self, id)
            .await
            .map_err(api_error)?
            .map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_access_app() {
        let app = AccessAppInfo {
            id: "abc123".into(),
            name: Some("hp.a5g.io Access (prod)".into()),
            domain: Some("hp.a5g.io".into()),
            app_type: Some("self_hosted".into()),
        };
        let candidate: RemoteCandidate = app.into();
        assert_eq!(candidate.id, "abc123");
        assert_eq!(candidate.domain.as_deref(), Some("hp.a5g.io"));
        assert_eq!(candidate.kind.as_deref(), Some("self_hosted"));
    }

    #[test]
    fn test_candidate_from_idp_keeps_type() {
        let idp = IdentityProviderInfo {
            id: "idp1".into(),
            name: Some("Google IDP for hp.a5g.io".into()),
            idp_type: Some("google".into()),
        };
        let candidate: RemoteCandidate = idp.into();
        assert_eq!(candidate.kind.as_deref(), Some("google"));
    }
}
