//! Existence resolver
//!
//! Per resource kind: derive the natural key, ask the directory for
//! candidates, filter to an exact case-insensitive match, and build the
//! kind's import identifier for the surviving candidate.

use crate::error::Result;
use crate::ports::{RemoteCandidate, RemoteDirectory};

/// A remote object chosen to back a declared resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCandidate {
    /// Provider-assigned identifier of the live object
    pub remote_id: String,
    /// Import identifier string in the kind's format
    pub import_id: String,
}

/// Exact case-insensitive match on one candidate attribute.
///
/// When several candidates match, the first in API list order wins; the
/// extra matches are logged and discarded.
fn first_exact_match<F>(
    candidates: Vec<RemoteCandidate>,
    natural_key: &str,
    label: &str,
    attr: F,
) -> Option<RemoteCandidate>
where
    F: Fn(&RemoteCandidate) -> Option<&str>,
{
    let mut matches = candidates
        .into_iter()
        .filter(|c| attr(c).is_some_and(|v| v.eq_ignore_ascii_case(natural_key)));
    let chosen = matches.next()?;
    let discarded = matches.count();
    if discarded > 0 {
        tracing::warn!(
            kind = label,
            key = natural_key,
            discarded,
            "multiple remote candidates matched; taking the first in list order"
        );
    }
    Some(chosen)
}

/// Access application, matched by exact application domain.
pub async fn resolve_access_app(
    directory: &dyn RemoteDirectory,
    account_id: &str,
    full_domain: &str,
) -> Result<Option<ResolvedCandidate>> {
    let candidates = directory.list_access_apps(full_domain).await?;
    Ok(
        first_exact_match(candidates, full_domain, "Access application", |c| {
            c.domain.as_deref()
        })
        .map(|c| ResolvedCandidate {
            import_id: format!("accounts/{account_id}/{}", c.id),
            remote_id: c.id,
        }),
    )
}

/// DNS record, matched by type=A plus exact record name.
pub async fn resolve_dns_record(
    directory: &dyn RemoteDirectory,
    zone_id: &str,
    full_domain: &str,
) -> Result<Option<ResolvedCandidate>> {
    let candidates = directory.list_dns_records(zone_id, "A", full_domain).await?;
    Ok(
        first_exact_match(candidates, full_domain, "DNS record", |c| c.name.as_deref()).map(
            |c| ResolvedCandidate {
                import_id: format!("{zone_id}/{}", c.id),
                remote_id: c.id,
            },
        ),
    )
}

/// Identity provider, matched by templated name plus provider type google.
pub async fn resolve_identity_provider(
    directory: &dyn RemoteDirectory,
    account_id: &str,
    expected_name: &str,
) -> Result<Option<ResolvedCandidate>> {
    let candidates: Vec<_> = directory
        .list_identity_providers()
        .await?
        .into_iter()
        .filter(|c| c.kind.as_deref().is_some_and(|t| t.eq_ignore_ascii_case("google")))
        .collect();
    Ok(
        first_exact_match(candidates, expected_name, "Identity Provider", |c| {
            c.name.as_deref()
        })
        .map(|c| ResolvedCandidate {
            import_id: format!("accounts/{account_id}/{}", c.id),
            remote_id: c.id,
        }),
    )
}

/// Access policy, matched by templated name.
pub async fn resolve_access_policy(
    directory: &dyn RemoteDirectory,
    account_id: &str,
    expected_name: &str,
) -> Result<Option<ResolvedCandidate>> {
    let candidates = directory.list_access_policies().await?;
    Ok(
        first_exact_match(candidates, expected_name, "Access Policy", |c| {
            c.name.as_deref()
        })
        .map(|c| ResolvedCandidate {
            import_id: format!("accounts/{account_id}/{}", c.id),
            remote_id: c.id,
        }),
    )
}
