use colored::Colorize;
use edgegate_core::{GOOGLE_REQUIRED_KEYS, GoogleConfig};
use edgegate_google::{
    ChecklistData, DEFAULT_CHECKED_PERMISSIONS, Gcloud, GoogleRest, LookupStatus,
    ProjectNumberLookup, ServiceAccount, validate_oauth_format,
};
use std::path::{Path, PathBuf};

pub async fn handle(environment: &str, probe: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let base_dir = std::env::current_dir()?;
    edgegate_core::validate_required_keys(&base_dir, environment, GOOGLE_REQUIRED_KEYS)?;

    let config = GoogleConfig::load(&base_dir, environment);
    let mut data = checklist_data(&config, environment);
    if probe {
        run_probes(&mut data, &config).await;
    }

    let written = edgegate_google::write(&data, output)?;
    println!(
        "{} {}",
        "✓ チェックリストを生成しました:".green().bold(),
        written.display()
    );
    Ok(())
}

/// Offline variant used by `synth --stack google`: format checks only,
/// no network probes.
pub(crate) fn write_offline(base_dir: &Path, environment: &str) -> anyhow::Result<PathBuf> {
    let config = GoogleConfig::load(base_dir, environment);
    let data = checklist_data(&config, environment);
    Ok(edgegate_google::write(&data, None)?)
}

fn checklist_data(config: &GoogleConfig, environment: &str) -> ChecklistData {
    let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "(未設定)".to_string());
    ChecklistData {
        environment: environment.to_string(),
        project_id: or_unset(&config.project_id),
        display_name: "Google OAuth Integration Service".to_string(),
        support_email: or_unset(&config.support_email),
        team_domain: or_unset(&config.cloudflare_team_domain),
        domain: or_unset(&config.domain),
        subdomain: or_unset(&config.subdomain),
        validation: validate_oauth_format(
            config.client_id.as_deref(),
            config.client_secret.as_deref(),
            config.project_number.as_deref(),
        ),
        service_account_email: ServiceAccount::load().map(|sa| sa.client_email),
        credential_probe: None,
        project_lookup: None,
        permission_check: None,
    }
}

/// Run the REST probes, folding failures into the checklist rather than
/// aborting it.
async fn run_probes(data: &mut ChecklistData, config: &GoogleConfig) {
    let rest = GoogleRest::new();

    if let (Some(client_id), Some(client_secret)) = (&config.client_id, &config.client_secret) {
        match rest.check_oauth_client(client_id, client_secret).await {
            Ok(probe) => data.credential_probe = Some(probe),
            Err(e) => tracing::warn!(error = %e, "OAuth credential probe failed"),
        }
    }

    let Some(project_id) = config.project_id.as_deref() else {
        return;
    };

    let token = match Gcloud::access_token().await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "could not obtain an access token");
            data.project_lookup = Some(ProjectNumberLookup {
                status: LookupStatus::AuthError,
                project_number: None,
                detail: Some(e.to_string()),
            });
            return;
        }
    };

    match rest.lookup_project_number(&token, project_id).await {
        Ok(lookup) => {
            // 解決できた Project Number と Client ID 先頭数値を突き合わせる
            if lookup.status == LookupStatus::Ok
                && let (Some(resolved), Some(extracted)) = (
                    lookup.project_number.as_deref(),
                    data.validation.extracted_project_number.as_deref(),
                )
            {
                data.validation.project_number_matches = Some(resolved == extracted);
            }
            data.project_lookup = Some(lookup);
        }
        Err(e) => tracing::warn!(error = %e, "project number lookup failed"),
    }

    match rest
        .check_permissions(&token, project_id, DEFAULT_CHECKED_PERMISSIONS)
        .await
    {
        Ok(check) => data.permission_check = Some(check),
        Err(e) => tracing::warn!(error = %e, "permission check failed"),
    }
}
