//! Google OAuth setup checks for edgegate
//!
//! OAuth 同意画面やクライアント作成の自動化は意図的に行わない
//! （組織のブランディング要件・承認プロセス・Google 審査への配慮）。
//! このクレートは設定の検証と、手動設定を支援するチェックリストの
//! 生成を担う。

pub mod auth;
pub mod checklist;
pub mod error;
pub mod rest;
pub mod validation;

pub use auth::{Gcloud, ServiceAccount};
pub use checklist::{ChecklistData, render, write};
pub use error::{GoogleError, Result};
pub use rest::{
    CredentialProbe, DEFAULT_CHECKED_PERMISSIONS, GoogleRest, LookupStatus, PermissionCheck,
    ProjectNumberLookup,
};
pub use validation::{OAuthValidation, validate_oauth_format};
