//! Terraform JSON stack synthesis for edgegate
//!
//! Three stacks: `cloudflare` (DNS + Zero Trust Access),
//! `google` (variables for the OAuth guidance flow) and
//! `aws-sg-enforce` (security-group ingress enforcement).

pub mod aws;
pub mod cloudflare;
pub mod document;
pub mod error;
pub mod google;

pub use aws::AwsSgEnforceInputs;
pub use document::{TfDocument, TfVariable};
pub use error::{Result, SynthError};

use std::path::{Path, PathBuf};

/// Output directory layout: `edgegate.out/stacks/{stack_id}/main.tf.json`
pub fn stack_dir(base_dir: &Path, stack_id: &str) -> PathBuf {
    base_dir.join("edgegate.out").join("stacks").join(stack_id)
}

/// Path of one stack's synthesized document
pub fn stack_document_path(base_dir: &Path, stack_id: &str) -> PathBuf {
    stack_dir(base_dir, stack_id).join("main.tf.json")
}
