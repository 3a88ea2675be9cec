pub mod checklist;
pub mod reconcile;
pub mod synth;
pub mod validate;
