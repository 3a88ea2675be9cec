use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "設定ファイルが見つかりません: terraform.{environment}.tfvars または terraform.tfvars"
    )]
    TfvarsNotFound { environment: String },

    #[error("tfvars の検証に失敗しました ({})。{summary}", .path.display())]
    TfvarsValidation {
        path: PathBuf,
        missing: Vec<String>,
        empty: Vec<String>,
        summary: String,
    },

    #[error("必須環境変数が未設定です: {0}")]
    MissingEnvVar(&'static str),

    #[error(
        "AWS 認証情報が未設定です: AWS_PROFILE もしくは AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY を設定してください"
    )]
    MissingAwsAuth,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
