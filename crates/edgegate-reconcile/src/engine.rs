//! Auto-import reconciliation engine
//!
//! One pass per resource kind, in fixed order. Each pass resolves a
//! remote candidate, inspects the state binding, decides, then acts.
//! Passes are independent: an error inside one kind is caught here,
//! logged, and recorded without aborting the remaining kinds.

use crate::address::{ResourceAddress, ResourceKind};
use crate::decision::{BindingStatus, Decision, decide};
use crate::error::{ReconcileError, Result};
use crate::graph::ResourceGraph;
use crate::inspector::StateInspector;
use crate::ports::{RemoteDirectory, StateBackend};
use crate::resolver::{
    ResolvedCandidate, resolve_access_app, resolve_access_policy, resolve_dns_record,
    resolve_identity_provider,
};
use edgegate_core::naming;

/// Validated configuration the engine needs, built once at the top of a
/// run. Resolvers and executors receive values from here; nothing below
/// this struct reads the process environment.
#[derive(Debug, Clone)]
pub struct ReconcileInputs {
    pub account_id: String,
    pub domain: String,
    pub subdomain: String,
    /// Required only for the access-policy pass
    pub allowed_email_domain: Option<String>,
}

impl ReconcileInputs {
    /// Extract the engine's required values from the loaded stack
    /// configuration. `None` when account id, domain or subdomain is
    /// absent, in which case the whole auto-import is skipped.
    pub fn from_config(config: &edgegate_core::CloudflareConfig) -> Option<Self> {
        Some(Self {
            account_id: config.account_id.clone()?,
            domain: config.domain.clone()?,
            subdomain: config.subdomain.clone()?,
            allowed_email_domain: config.allowed_email_domain.clone(),
        })
    }

    pub fn full_domain(&self) -> String {
        naming::full_domain(&self.subdomain, &self.domain)
    }
}

/// Outcome of one kind's pass.
#[derive(Debug, Clone)]
pub struct KindReport {
    pub kind: ResourceKind,
    pub address: Option<ResourceAddress>,
    pub decision: Option<Decision>,
    pub imported: bool,
    pub evicted: bool,
    /// Set when the pass was skipped for missing configuration
    pub skipped: Option<String>,
    /// Set when the pass aborted on an error
    pub error: Option<String>,
}

impl KindReport {
    fn not_declared(kind: ResourceKind) -> Self {
        Self {
            kind,
            address: None,
            decision: Some(Decision::NotDeclared),
            imported: false,
            evicted: false,
            skipped: None,
            error: None,
        }
    }

    fn skipped(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            address: None,
            decision: None,
            imported: false,
            evicted: false,
            skipped: Some(reason.into()),
            error: None,
        }
    }

    fn failed(kind: ResourceKind, error: ReconcileError) -> Self {
        Self {
            kind,
            address: None,
            decision: None,
            imported: false,
            evicted: false,
            skipped: None,
            error: Some(error.to_string()),
        }
    }
}

/// Outcome of a whole auto-import run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub kinds: Vec<KindReport>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.kinds.iter().any(|k| k.error.is_some())
    }
}

/// The engine. Borrows its two ports so tests can drive it with fakes.
pub struct AutoImport<'a> {
    inputs: ReconcileInputs,
    graph: &'a ResourceGraph,
    directory: &'a dyn RemoteDirectory,
    backend: &'a dyn StateBackend,
}

/// Targeted existence check for a bound identifier. The DNS variant
/// carries the zone resolved earlier in the same pass.
enum Probe {
    AccessApp,
    DnsRecord { zone_id: String },
    IdentityProvider,
    AccessPolicy,
}

impl Probe {
    async fn remote_live(&self, directory: &dyn RemoteDirectory, id: &str) -> Result<bool> {
        let found = match self {
            Probe::AccessApp => directory.get_access_app(id).await?,
            Probe::DnsRecord { zone_id } => directory.get_dns_record(zone_id, id).await?,
            Probe::IdentityProvider => directory.get_identity_provider(id).await?,
            Probe::AccessPolicy => directory.get_access_policy(id).await?,
        };
        Ok(found.is_some())
    }
}

impl<'a> AutoImport<'a> {
    pub fn new(
        inputs: ReconcileInputs,
        graph: &'a ResourceGraph,
        directory: &'a dyn RemoteDirectory,
        backend: &'a dyn StateBackend,
    ) -> Self {
        Self {
            inputs,
            graph,
            directory,
            backend,
        }
    }

    /// Run all four passes. Never fails as a whole; per-kind errors are
    /// captured in the report.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();
        for kind in ResourceKind::ALL {
            let outcome = match self.reconcile_kind(kind).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(kind = kind.label(), error = %e, "reconciliation pass aborted");
                    KindReport::failed(kind, e)
                }
            };
            report.kinds.push(outcome);
        }
        report
    }

    async fn reconcile_kind(&self, kind: ResourceKind) -> Result<KindReport> {
        let Some(local_key) = self.graph.find_local_key(kind) else {
            tracing::info!(kind = kind.label(), "not declared in the synthesized graph; nothing to reconcile");
            return Ok(KindReport::not_declared(kind));
        };
        let address = ResourceAddress::new(kind, local_key);
        let full_domain = self.inputs.full_domain();
        let account_id = &self.inputs.account_id;

        let (candidate, probe) = match kind {
            ResourceKind::AccessApplication => (
                resolve_access_app(self.directory, account_id, &full_domain).await?,
                Probe::AccessApp,
            ),
            ResourceKind::DnsRecord => {
                let zone_id = self
                    .directory
                    .active_zone_id(&self.inputs.domain)
                    .await?
                    .ok_or_else(|| ReconcileError::ZoneNotFound(self.inputs.domain.clone()))?;
                (
                    resolve_dns_record(self.directory, &zone_id, &full_domain).await?,
                    Probe::DnsRecord { zone_id },
                )
            }
            ResourceKind::IdentityProvider => {
                let expected = naming::identity_provider_name(&self.inputs.subdomain, &self.inputs.domain);
                (
                    resolve_identity_provider(self.directory, account_id, &expected).await?,
                    Probe::IdentityProvider,
                )
            }
            ResourceKind::AccessPolicy => {
                let Some(email_domain) = self.inputs.allowed_email_domain.as_deref() else {
                    tracing::info!("skip Access Policy reconciliation: allowed_email_domain missing");
                    return Ok(KindReport::skipped(kind, "allowed_email_domain missing"));
                };
                let expected = naming::access_policy_name(email_domain);
                (
                    resolve_access_policy(self.directory, account_id, &expected).await?,
                    Probe::AccessPolicy,
                )
            }
        };

        self.settle(kind, address, candidate, probe).await
    }

    /// Steps 3–4 of a pass: binding status, decision, action.
    async fn settle(
        &self,
        kind: ResourceKind,
        address: ResourceAddress,
        candidate: Option<ResolvedCandidate>,
        probe: Probe,
    ) -> Result<KindReport> {
        let inspector = StateInspector::new(self.backend);
        let binding = if inspector.is_bound(&address).await {
            match inspector.resolve_bound_id(&address).await {
                Some(bound_id) => BindingStatus::Bound {
                    remote_live: probe.remote_live(self.directory, &bound_id).await?,
                },
                // 記録された id の無い束縛は追跡不能なので死んだ扱い
                None => BindingStatus::Bound { remote_live: false },
            }
        } else {
            BindingStatus::Unbound
        };

        let decision = decide(candidate.map(|c| c.import_id), binding);
        let mut imported = false;
        let mut evicted = false;

        match &decision {
            Decision::Skip => {
                tracing::info!(%address, "skip import (already managed)");
            }
            Decision::AwaitingCreate => {
                tracing::info!(kind = kind.label(), "no existing remote object found; apply will create it");
            }
            Decision::Import { import_id } => {
                imported = self.execute_import(&address, import_id).await;
            }
            Decision::Evict { reimport } => {
                tracing::info!(%address, "state binding present but remote object missing; removing from state");
                evicted = self.execute_remove(&address).await;
                // Re-check before re-binding: a failed state-rm must not
                // lead to a double binding.
                if let Some(import_id) = reimport
                    && !inspector.is_bound(&address).await
                {
                    imported = self.execute_import(&address, import_id).await;
                }
            }
            Decision::NotDeclared => {}
        }

        Ok(KindReport {
            kind,
            address: Some(address),
            decision: Some(decision),
            imported,
            evicted,
            skipped: None,
            error: None,
        })
    }

    /// Import executor. Failure is reported as `false`; the resource stays
    /// unbound and is retried on the next scheduled run.
    async fn execute_import(&self, address: &ResourceAddress, import_id: &str) -> bool {
        if let Err(e) = self.backend.init().await {
            tracing::warn!(%address, error = %e, "backend init failed; import not attempted");
            return false;
        }
        tracing::info!(%address, import_id, "importing into state");
        match self.backend.import(address, import_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(%address, error = %e, "import failed");
                false
            }
        }
    }

    /// Evict executor, same failure contract as the import executor.
    async fn execute_remove(&self, address: &ResourceAddress) -> bool {
        if let Err(e) = self.backend.init().await {
            tracing::warn!(%address, error = %e, "backend init failed; state removal not attempted");
            return false;
        }
        match self.backend.remove(address).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(%address, error = %e, "state removal failed");
                false
            }
        }
    }
}

/// Build the engine inputs from configuration and run it.
///
/// Returns `None` when the configuration is too incomplete to attempt
/// anything; that is an informational outcome, not a failure.
pub async fn run_auto_import(
    config: &edgegate_core::CloudflareConfig,
    graph: &ResourceGraph,
    directory: &dyn RemoteDirectory,
    backend: &dyn StateBackend,
) -> Option<RunReport> {
    let Some(inputs) = ReconcileInputs::from_config(config) else {
        tracing::warn!("accountId/domain/subdomain missing; skipping auto-import");
        return None;
    };
    Some(AutoImport::new(inputs, graph, directory, backend).run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RemoteCandidate;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    // ---- fakes -----------------------------------------------------------

    #[derive(Default)]
    struct FakeDirectory {
        apps: Vec<RemoteCandidate>,
        live_app_ids: Vec<String>,
        zone: Option<String>,
        records: Vec<RemoteCandidate>,
        live_record_ids: Vec<String>,
        idps: Vec<RemoteCandidate>,
        live_idp_ids: Vec<String>,
        policies: Vec<RemoteCandidate>,
        live_policy_ids: Vec<String>,
        fail_access_apps: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeDirectory {
        fn with_zone() -> Self {
            Self {
                zone: Some("zone1".into()),
                ..Default::default()
            }
        }

        fn record_call(&self, name: &str) {
            self.calls.lock().unwrap().push(name.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteDirectory for FakeDirectory {
        async fn list_access_apps(&self, _domain: &str) -> Result<Vec<RemoteCandidate>> {
            self.record_call("list_access_apps");
            if self.fail_access_apps {
                return Err(ReconcileError::Api("connection reset".into()));
            }
            Ok(self.apps.clone())
        }

        async fn get_access_app(&self, id: &str) -> Result<Option<RemoteCandidate>> {
            self.record_call("get_access_app");
            Ok(self.live_app_ids.iter().any(|x| x == id).then(|| RemoteCandidate {
                id: id.into(),
                ..Default::default()
            }))
        }

        async fn active_zone_id(&self, _domain: &str) -> Result<Option<String>> {
            self.record_call("active_zone_id");
            Ok(self.zone.clone())
        }

        async fn list_dns_records(
            &self,
            _zone_id: &str,
            _record_type: &str,
            _name: &str,
        ) -> Result<Vec<RemoteCandidate>> {
            self.record_call("list_dns_records");
            Ok(self.records.clone())
        }

        async fn get_dns_record(&self, _zone_id: &str, id: &str) -> Result<Option<RemoteCandidate>> {
            self.record_call("get_dns_record");
            Ok(self
                .live_record_ids
                .iter()
                .any(|x| x == id)
                .then(|| RemoteCandidate {
                    id: id.into(),
                    ..Default::default()
                }))
        }

        async fn list_identity_providers(&self) -> Result<Vec<RemoteCandidate>> {
            self.record_call("list_identity_providers");
            Ok(self.idps.clone())
        }

        async fn get_identity_provider(&self, id: &str) -> Result<Option<RemoteCandidate>> {
            self.record_call("get_identity_provider");
            Ok(self.live_idp_ids.iter().any(|x| x == id).then(|| RemoteCandidate {
                id: id.into(),
                ..Default::default()
            }))
        }

        async fn list_access_policies(&self) -> Result<Vec<RemoteCandidate>> {
            self.record_call("list_access_policies");
            Ok(self.policies.clone())
        }

        async fn get_access_policy(&self, id: &str) -> Result<Option<RemoteCandidate>> {
            self.record_call("get_access_policy");
            Ok(self
                .live_policy_ids
                .iter()
                .any(|x| x == id)
                .then(|| RemoteCandidate {
                    id: id.into(),
                    ..Default::default()
                }))
        }
    }

    #[derive(Default)]
    struct BackendState {
        addresses: Vec<String>,
        snapshot: Value,
        imports: Vec<(String, String)>,
        removals: Vec<String>,
        fail_remove: bool,
    }

    #[derive(Default)]
    struct FakeBackend {
        state: Mutex<BackendState>,
    }

    impl FakeBackend {
        fn bound(address: &str, snapshot: Value) -> Self {
            Self {
                state: Mutex::new(BackendState {
                    addresses: vec![address.to_string()],
                    snapshot,
                    ..Default::default()
                }),
            }
        }

        fn imports(&self) -> Vec<(String, String)> {
            self.state.lock().unwrap().imports.clone()
        }

        fn removals(&self) -> Vec<String> {
            self.state.lock().unwrap().removals.clone()
        }
    }

    #[async_trait]
    impl StateBackend for FakeBackend {
        async fn init(&self) -> Result<()> {
            Ok(())
        }

        async fn list_addresses(&self) -> Result<Vec<String>> {
            Ok(self.state.lock().unwrap().addresses.clone())
        }

        async fn pull_snapshot(&self) -> Result<Value> {
            Ok(self.state.lock().unwrap().snapshot.clone())
        }

        async fn import(&self, address: &ResourceAddress, id: &str) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            state.imports.push((address.to_string(), id.to_string()));
            state.addresses.push(address.to_string());
            Ok(())
        }

        async fn remove(&self, address: &ResourceAddress) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            if state.fail_remove {
                return Err(ReconcileError::StateBackend("state rm exited with 1".into()));
            }
            let target = address.to_string();
            state.addresses.retain(|a| a != &target);
            state.removals.push(target);
            Ok(())
        }
    }

    // ---- helpers ---------------------------------------------------------

    fn inputs() -> ReconcileInputs {
        ReconcileInputs {
            account_id: "acc".into(),
            domain: "a5g.io".into(),
            subdomain: "hp".into(),
            allowed_email_domain: Some("a5g.io".into()),
        }
    }

    fn full_graph() -> ResourceGraph {
        ResourceGraph::new(json!({
            "resource": {
                "cloudflare_zero_trust_access_application": {
                    "hp_access_application": {
                        "//": {"metadata": {"path": "cloudflare/hp_access/application"}}
                    }
                },
                "cloudflare_dns_record": {
                    "hp_subdomain_record": {
                        "//": {"metadata": {"path": "cloudflare/hp_subdomain/record"}}
                    }
                },
                "cloudflare_zero_trust_access_identity_provider": {
                    "hp_access_google_idp": {
                        "//": {"metadata": {"path": "cloudflare/hp_access/google_idp"}}
                    }
                },
                "cloudflare_zero_trust_access_policy": {
                    "hp_access_policy": {
                        "//": {"metadata": {"path": "cloudflare/hp_access/policy"}}
                    }
                }
            }
        }))
    }

    fn dns_snapshot(id: &str) -> Value {
        json!({
            "resources": [
                {
                    "type": "cloudflare_dns_record",
                    "name": "hp_subdomain_record",
                    "instances": [{"attributes": {"id": id}}]
                }
            ]
        })
    }

    fn report_for(report: &RunReport, kind: ResourceKind) -> &KindReport {
        report.kinds.iter().find(|k| k.kind == kind).unwrap()
    }

    // ---- scenarios -------------------------------------------------------

    #[tokio::test]
    async fn test_unbound_app_with_candidate_is_imported_once() {
        let directory = FakeDirectory {
            apps: vec![RemoteCandidate {
                id: "abc123".into(),
                domain: Some("hp.a5g.io".into()),
                ..Default::default()
            }],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::default();
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        let imports = backend.imports();
        let app_imports: Vec<_> = imports
            .iter()
            .filter(|(addr, _)| addr.starts_with("cloudflare_zero_trust_access_application."))
            .collect();
        assert_eq!(app_imports.len(), 1);
        assert_eq!(app_imports[0].1, "accounts/acc/abc123");
        assert!(report_for(&report, ResourceKind::AccessApplication).imported);
        assert!(backend.removals().is_empty());
    }

    #[tokio::test]
    async fn test_candidate_domain_match_is_case_insensitive() {
        let directory = FakeDirectory {
            apps: vec![RemoteCandidate {
                id: "abc123".into(),
                domain: Some("Hp.A5g.Io".into()),
                ..Default::default()
            }],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::default();
        let graph = full_graph();

        AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert!(backend
            .imports()
            .iter()
            .any(|(_, id)| id == "accounts/acc/abc123"));
    }

    #[tokio::test]
    async fn test_stale_dns_binding_is_evicted_then_reimported() {
        let directory = FakeDirectory {
            records: vec![RemoteCandidate {
                id: "rec2".into(),
                name: Some("hp.a5g.io".into()),
                ..Default::default()
            }],
            // rec1 は live リストに無い → 対象 GET は不在を返す
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::bound("cloudflare_dns_record.hp_subdomain_record", dns_snapshot("rec1"));
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert_eq!(backend.removals(), vec!["cloudflare_dns_record.hp_subdomain_record"]);
        let dns = report_for(&report, ResourceKind::DnsRecord);
        assert!(dns.evicted);
        assert!(dns.imported);
        assert!(backend
            .imports()
            .iter()
            .any(|(addr, id)| addr == "cloudflare_dns_record.hp_subdomain_record" && id == "zone1/rec2"));
    }

    #[tokio::test]
    async fn test_stale_binding_without_candidate_is_evicted_only() {
        let directory = FakeDirectory::with_zone();
        let backend = FakeBackend::bound("cloudflare_dns_record.hp_subdomain_record", dns_snapshot("rec1"));
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert_eq!(backend.removals(), vec!["cloudflare_dns_record.hp_subdomain_record"]);
        assert!(backend.imports().is_empty());
        let dns = report_for(&report, ResourceKind::DnsRecord);
        assert!(dns.evicted);
        assert!(!dns.imported);
    }

    #[tokio::test]
    async fn test_live_binding_is_left_alone() {
        let directory = FakeDirectory {
            records: vec![RemoteCandidate {
                id: "rec1".into(),
                name: Some("hp.a5g.io".into()),
                ..Default::default()
            }],
            live_record_ids: vec!["rec1".into()],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::bound("cloudflare_dns_record.hp_subdomain_record", dns_snapshot("rec1"));
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert!(backend.imports().is_empty());
        assert!(backend.removals().is_empty());
        assert_eq!(
            report_for(&report, ResourceKind::DnsRecord).decision,
            Some(Decision::Skip)
        );
    }

    #[tokio::test]
    async fn test_failed_state_rm_blocks_reimport() {
        let directory = FakeDirectory {
            records: vec![RemoteCandidate {
                id: "rec2".into(),
                name: Some("hp.a5g.io".into()),
                ..Default::default()
            }],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::bound("cloudflare_dns_record.hp_subdomain_record", dns_snapshot("rec1"));
        backend.state.lock().unwrap().fail_remove = true;
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        // state rm が失敗 → まだ bound → 再取り込みしない
        assert!(backend.imports().is_empty());
        let dns = report_for(&report, ResourceKind::DnsRecord);
        assert!(!dns.evicted);
        assert!(!dns.imported);
    }

    #[tokio::test]
    async fn test_nothing_remote_nothing_bound_is_a_quiet_noop() {
        let directory = FakeDirectory::with_zone();
        let backend = FakeBackend::default();
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert!(backend.imports().is_empty());
        assert!(backend.removals().is_empty());
        assert!(!report.has_failures());
        assert_eq!(
            report_for(&report, ResourceKind::AccessApplication).decision,
            Some(Decision::AwaitingCreate)
        );
    }

    #[tokio::test]
    async fn test_policy_pass_skipped_without_email_domain() {
        let directory = FakeDirectory::with_zone();
        let backend = FakeBackend::default();
        let graph = full_graph();
        let inputs = ReconcileInputs {
            allowed_email_domain: None,
            ..inputs()
        };

        let report = AutoImport::new(inputs, &graph, &directory, &backend).run().await;

        let policy = report_for(&report, ResourceKind::AccessPolicy);
        assert!(policy.skipped.is_some());
        assert!(policy.error.is_none());
        // ポリシー検索の API 呼び出しが一切発生していないこと
        assert!(!directory.calls().iter().any(|c| c == "list_access_policies"));
    }

    #[tokio::test]
    async fn test_kind_failure_does_not_block_later_kinds() {
        let directory = FakeDirectory {
            fail_access_apps: true,
            records: vec![RemoteCandidate {
                id: "rec9".into(),
                name: Some("hp.a5g.io".into()),
                ..Default::default()
            }],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::default();
        let graph = full_graph();

        let report = AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert!(report_for(&report, ResourceKind::AccessApplication).error.is_some());
        // アプリの失敗後も DNS パスは実行されて import まで到達する
        assert!(report_for(&report, ResourceKind::DnsRecord).imported);
        assert!(backend.imports().iter().any(|(_, id)| id == "zone1/rec9"));
    }

    #[tokio::test]
    async fn test_identity_provider_requires_google_type() {
        let directory = FakeDirectory {
            idps: vec![
                RemoteCandidate {
                    id: "idp-okta".into(),
                    name: Some("Google IDP for hp.a5g.io".into()),
                    kind: Some("okta".into()),
                    ..Default::default()
                },
                RemoteCandidate {
                    id: "idp-google".into(),
                    name: Some("google idp for hp.a5g.io".into()),
                    kind: Some("google".into()),
                    ..Default::default()
                },
            ],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::default();
        let graph = full_graph();

        AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert!(backend
            .imports()
            .iter()
            .any(|(addr, id)| addr.starts_with("cloudflare_zero_trust_access_identity_provider.")
                && id == "accounts/acc/idp-google"));
    }

    #[tokio::test]
    async fn test_policy_import_uses_templated_name() {
        let directory = FakeDirectory {
            policies: vec![RemoteCandidate {
                id: "pol7".into(),
                name: Some("Allow a5g.io domain".into()),
                ..Default::default()
            }],
            ..FakeDirectory::with_zone()
        };
        let backend = FakeBackend::default();
        let graph = full_graph();

        AutoImport::new(inputs(), &graph, &directory, &backend).run().await;

        assert!(backend
            .imports()
            .iter()
            .any(|(addr, id)| addr.starts_with("cloudflare_zero_trust_access_policy.")
                && id == "accounts/acc/pol7"));
    }

    #[tokio::test]
    async fn test_run_auto_import_skips_on_incomplete_config() {
        let directory = FakeDirectory::with_zone();
        let backend = FakeBackend::default();
        let graph = full_graph();
        let config = edgegate_core::CloudflareConfig {
            domain: Some("a5g.io".into()),
            ..Default::default()
        };

        let report = run_auto_import(&config, &graph, &directory, &backend).await;
        assert!(report.is_none());
        assert!(directory.calls().is_empty());
    }
}
