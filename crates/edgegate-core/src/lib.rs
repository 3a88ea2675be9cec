//! edgegate の設定レイヤー
//!
//! tfvars ファイルの読み込み、スタック別の設定構造体、
//! リモートリソースの命名テンプレートを提供する。

pub mod config;
pub mod error;
pub mod naming;
pub mod tfvars;

pub use config::{
    AWS_SG_STACK_ID, CLOUDFLARE_REQUIRED_KEYS, CLOUDFLARE_STACK_ID, CloudflareConfig,
    GOOGLE_REQUIRED_KEYS, GOOGLE_STACK_ID, GoogleConfig, validate_required_keys,
};
pub use error::{ConfigError, Result};
