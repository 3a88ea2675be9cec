//! Google OAuth setup checklist (Markdown)
//!
//! OAuth 同意画面まわりは手動設定のため、必要な確認項目と検証結果を
//! Markdown に書き出す。コンソールにはファイルパスだけを出す想定。

use crate::error::Result;
use crate::rest::{CredentialProbe, LookupStatus, PermissionCheck, ProjectNumberLookup};
use crate::validation::OAuthValidation;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Everything the checklist renders. Built once by the CLI from
/// configuration plus whatever probes actually ran.
#[derive(Debug, Clone)]
pub struct ChecklistData {
    pub environment: String,
    pub project_id: String,
    pub display_name: String,
    pub support_email: String,
    pub team_domain: String,
    pub domain: String,
    pub subdomain: String,
    pub validation: OAuthValidation,
    pub service_account_email: Option<String>,
    pub credential_probe: Option<CredentialProbe>,
    pub project_lookup: Option<ProjectNumberLookup>,
    pub permission_check: Option<PermissionCheck>,
}

impl ChecklistData {
    pub fn redirect_uri(&self) -> String {
        format!(
            "https://{}.cloudflareaccess.com/cdn-cgi/access/callback",
            self.team_domain
        )
    }

    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(format!("oauth-checklist-{}.md", self.environment))
    }
}

/// Render the checklist Markdown.
pub fn render(data: &ChecklistData) -> String {
    let mut out = String::new();
    let push = |out: &mut String, s: &str| {
        out.push_str(s);
        out.push('\n');
    };

    push(&mut out, &format!(
        "# Google OAuth 設定チェックリスト - {}環境\n",
        data.environment
    ));
    push(&mut out, &format!("- **プロジェクト**: {}", data.project_id));
    push(&mut out, &format!("- **環境**: {}", data.environment));
    push(&mut out, &format!(
        "- **生成日時**: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    push(&mut out, "## 自動検証結果\n");
    render_validation(&mut out, data);

    push(&mut out, "## 手動確認事項\n");
    push(&mut out, "以下の項目は Google Cloud Console の画面での手動確認が必要です。");
    push(&mut out, "本ファイルはチェックリストとしてご利用ください。\n");

    push(&mut out, "## 必須API有効化確認\n");
    push(&mut out, &format!(
        "**確認URL**: https://console.cloud.google.com/apis/library?project={}\n",
        data.project_id
    ));
    push(&mut out, "- [ ] **Cloud Resource Manager API** (cloudresourcemanager.googleapis.com)\n");

    push(&mut out, "## OAuth同意画面設定確認\n");
    push(&mut out, &format!(
        "**確認URL**: https://console.cloud.google.com/apis/credentials/consent?project={}\n",
        data.project_id
    ));
    push(&mut out, "### 基本設定\n");
    push(&mut out, &format!("- [ ] **アプリケーション名**: `{}`", data.display_name));
    push(&mut out, &format!("- [ ] **サポートメール**: `{}`", data.support_email));
    push(&mut out, "- [ ] **公開ステータス**: 本番運用時は「本番環境」に設定\n");
    push(&mut out, "### スコープ設定\n");
    push(&mut out, "- [ ] **../auth/userinfo.email** が追加済み");
    push(&mut out, "- [ ] **openid** が追加済み\n");
    push(&mut out, "> スコープ設定が不適切だと Cloudflare Access での認証に失敗します\n");
    push(&mut out, "### クライアント設定\n");
    push(&mut out, "- [ ] **承認済みのリダイレクトURI**に以下が設定済み:");
    push(&mut out, &format!("  ```\n  {}\n  ```\n", data.redirect_uri()));
    push(&mut out, &format!(
        "クライアントIDとシークレットは terraform.{}.tfvars に設定してください:\n",
        data.environment
    ));
    push(&mut out, "> ```");
    push(&mut out, "> google_client_id = \"123456789-abc.apps.googleusercontent.com\"");
    push(&mut out, "> google_client_secret = \"GOCSPX-your-secret-here\"");
    push(&mut out, "> ```\n");

    push(&mut out, "## 設定完了後のテスト手順\n");
    push(&mut out, "1. terraform.tfvars に Client ID / Client Secret を設定");
    push(&mut out, &format!(
        "2. Cloudflare スタックをデプロイ: `STACK=cloudflare ENVIRONMENT={} edgegate reconcile`",
        data.environment
    ));
    push(&mut out, &format!(
        "3. https://{}.{} にアクセスし、Google 認証と許可ドメイン制限を確認\n",
        data.subdomain, data.domain
    ));

    push(&mut out, "## トラブルシューティング\n");
    push(&mut out, "- **redirect_uri_mismatch**: リダイレクトURIの設定を確認");
    push(&mut out, "- **insufficient_scope**: userinfo.email と openid スコープを確認");
    push(&mut out, "- **認証後にアクセス拒否**: allowed_email_domain の設定を確認\n");
    push(&mut out, &format!(
        "> 補足: Client ID 先頭の数値は Project Number です。client_id/secret の有効性はトークンエンドポイント応答で簡易確認しています（invalid_grant=受理、invalid_client=無効）。プロジェクト管理: https://console.cloud.google.com/home/dashboard?project={}",
        data.project_id
    ));

    out
}

fn render_validation(out: &mut String, data: &ChecklistData) {
    let v = &data.validation;
    if v.client_id_valid {
        out.push_str("- ✅ **Client ID の形式**: 正常\n");
    }
    if v.client_secret_valid {
        out.push_str("- ✅ **Client Secret の形式**: 正常\n");
    }
    if v.project_number_matches == Some(true) {
        out.push_str("- ✅ **Project Number の整合性**: 正常\n");
    }
    for error in &v.errors {
        out.push_str(&format!("- ❌ {error}\n"));
    }
    for warning in &v.warnings {
        out.push_str(&format!("- ⚠️ {warning}\n"));
    }

    match &data.credential_probe {
        Some(CredentialProbe::Accepted) => {
            out.push_str("- ✅ **OAuth クライアント認証**: 受付済み（invalid_grant は想定どおり）\n");
        }
        Some(CredentialProbe::Invalid) => {
            out.push_str("- ❌ **OAuth クライアント認証**: 無効（invalid_client）\n");
        }
        Some(CredentialProbe::Unexpected(code)) => {
            out.push_str(&format!("- ⚠️ **OAuth クライアント認証**: 想定外の応答 ({code})\n"));
        }
        None => {
            out.push_str("- ℹ️ **OAuth クライアント認証**: スキップ（資格情報不足）\n");
        }
    }

    if let Some(lookup) = &data.project_lookup {
        let email = data
            .service_account_email
            .as_deref()
            .unwrap_or("(不明)");
        match lookup.status {
            LookupStatus::Ok => {
                out.push_str(&format!("- ✅ **サービスアカウント認証**: {email}\n"));
                if let Some(number) = &lookup.project_number {
                    out.push_str(&format!("  - プロジェクト番号の取得: 成功（{number}）\n"));
                }
            }
            LookupStatus::AuthError => {
                out.push_str(&format!("- ❌ **サービスアカウント認証エラー**: {email}\n"));
                out.push_str("  - 新しいキーの生成と GOOGLE_CREDENTIALS の更新を確認してください\n");
            }
            LookupStatus::PermissionDenied => {
                out.push_str(&format!("- ❌ **サービスアカウント権限不足**: {email}\n"));
            }
            LookupStatus::NotFound => {
                out.push_str("- ❌ **プロジェクトが見つかりません**\n");
            }
            LookupStatus::Error => {
                out.push_str("- ⚠️ **プロジェクト番号の取得に失敗**\n");
            }
        }
        if let Some(detail) = &lookup.detail {
            out.push_str(&format!("  - 詳細: {detail}\n"));
        }
    }

    if let Some(check) = &data.permission_check {
        if check.is_ok() {
            out.push_str(&format!(
                "- ✅ **権限チェック**: {} すべて付与済み\n",
                check.checked.join(", ")
            ));
        } else {
            out.push_str(&format!(
                "- ❌ **不足している権限**: {}（Project Viewer など読み取りロールの付与を検討）\n",
                check.missing.join(", ")
            ));
        }
    }
    out.push('\n');
}

/// Render and write the checklist, returning the output path.
pub fn write(data: &ChecklistData, output_path: Option<&Path>) -> Result<PathBuf> {
    let path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data.default_output_path());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render(data))?;
    tracing::info!(path = %path.display(), "wrote OAuth checklist");
    Ok(path)
}
