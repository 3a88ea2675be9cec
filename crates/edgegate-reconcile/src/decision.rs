//! Reconciliation decision

use std::fmt;

/// Binding state of one resource address, as observed at the start of a
/// pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStatus {
    /// The address is not tracked in state
    Unbound,
    /// The address is tracked; `remote_live` reports whether the targeted
    /// existence check confirmed the bound object. A binding whose stored
    /// identifier is missing counts as not live.
    Bound { remote_live: bool },
}

/// What a reconciliation pass decided to do for one resource kind.
///
/// Computed fresh each run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The kind has no entry in the synthesized graph
    NotDeclared,
    /// Unbound and nothing matched remotely; the next apply creates it
    AwaitingCreate,
    /// Unbound, a remote candidate matched; bind it via import
    Import { import_id: String },
    /// Bound and the remote object is confirmed live
    Skip,
    /// Bound but the remote object is gone; drop the stale binding.
    /// Carries the candidate's import id when one was resolved earlier in
    /// the same pass, so the address can be re-bound right after eviction.
    Evict { reimport: Option<String> },
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::NotDeclared => write!(f, "not declared"),
            Decision::AwaitingCreate => write!(f, "awaiting create"),
            Decision::Import { .. } => write!(f, "import"),
            Decision::Skip => write!(f, "skip"),
            Decision::Evict { reimport: Some(_) } => write!(f, "evict and re-import"),
            Decision::Evict { reimport: None } => write!(f, "evict"),
        }
    }
}

/// The transition function: candidate + binding status → decision.
///
/// Pure so the evict/re-import sequencing stays auditable apart from any
/// I/O. The per-kind variation (natural keys, import id formats) lives in
/// the resolver, not here.
pub fn decide(candidate_import_id: Option<String>, binding: BindingStatus) -> Decision {
    match binding {
        BindingStatus::Unbound => match candidate_import_id {
            Some(import_id) => Decision::Import { import_id },
            None => Decision::AwaitingCreate,
        },
        BindingStatus::Bound { remote_live: true } => Decision::Skip,
        BindingStatus::Bound { remote_live: false } => Decision::Evict {
            reimport: candidate_import_id,
        },
    }
}
