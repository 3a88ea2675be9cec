//! tofu CLI wrapper
//!
//! Wraps the `tofu` commands the reconciliation engine needs: backend
//! init, state list/pull, import and state rm. All commands run in the
//! synthesized stack directory with a scoped TF_VAR environment built
//! once by the caller.

use crate::error::{Result, TofuError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

// Terraform 実装はバイナリ名で固定する（環境変数では切り替えない）
const TF_BIN: &str = "tofu";

/// tofu CLI wrapper, scoped to one stack directory
pub struct TofuCli {
    stack_dir: PathBuf,
    env: HashMap<String, String>,
}

impl TofuCli {
    /// `env` holds the TF_VAR_* values; `TF_INPUT=0` is always added so
    /// no command ever waits for interactive input.
    pub fn new(stack_dir: impl AsRef<Path>, mut env: HashMap<String, String>) -> Self {
        env.insert("TF_INPUT".to_string(), "0".to_string());
        Self {
            stack_dir: stack_dir.as_ref().to_path_buf(),
            env,
        }
    }

    pub fn stack_dir(&self) -> &Path {
        &self.stack_dir
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(TF_BIN);
        cmd.args(args);
        cmd.current_dir(&self.stack_dir);
        cmd.envs(&self.env);
        cmd
    }

    /// Run a tofu command with inherited stdio (progress visible to the
    /// operator)
    async fn run(&self, args: &[&str]) -> Result<()> {
        tracing::debug!("Running: {} {}", TF_BIN, args.join(" "));
        let status = self.command(args).status().await?;
        if !status.success() {
            return Err(TofuError::CommandFailed {
                command: args.join(" "),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    /// Run a tofu command and capture stdout. stderr is discarded: state
    /// queries against an absent state print noisy warnings that would
    /// only confuse the operator.
    async fn run_capture(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("Running: {} {}", TF_BIN, args.join(" "));
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await?;
        if !output.status.success() {
            return Err(TofuError::CommandFailed {
                command: args.join(" "),
                status: output.status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Initialize backend and plugins non-interactively. Safe to repeat.
    pub async fn init(&self) -> Result<()> {
        self.run(&["init", "-input=false", "-reconfigure"]).await
    }

    /// Addresses currently tracked in state
    pub async fn state_list(&self) -> Result<Vec<String>> {
        let stdout = self.run_capture(&["state", "list", "-no-color"]).await?;
        Ok(parse_state_list(&stdout))
    }

    /// Full state snapshot as JSON
    pub async fn state_pull(&self) -> Result<serde_json::Value> {
        let stdout = self.run_capture(&["state", "pull"]).await?;
        Ok(serde_json::from_str(&stdout)?)
    }

    /// Bind `address` to the remote object named by `import_id`
    pub async fn import(&self, address: &str, import_id: &str) -> Result<()> {
        self.run(&["import", address, import_id]).await
    }

    /// Drop `address` from state without destroying the remote object
    pub async fn state_rm(&self, address: &str) -> Result<()> {
        self.run(&["state", "rm", address]).await
    }
}

fn parse_state_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_list() {
        let out = "\ncloudflare_dns_record.hp_subdomain_record  \ncloudflare_zone_setting.ssl_tls_setting\n\n";
        assert_eq!(
            parse_state_list(out),
            vec![
                "cloudflare_dns_record.hp_subdomain_record",
                "cloudflare_zone_setting.ssl_tls_setting"
            ]
        );
    }

    #[test]
    fn test_parse_state_list_empty() {
        assert!(parse_state_list("").is_empty());
        assert!(parse_state_list("\n  \n").is_empty());
    }

    #[test]
    fn test_env_always_disables_input() {
        let cli = TofuCli::new("/tmp/stack", HashMap::new());
        assert_eq!(cli.env.get("TF_INPUT").unwrap(), "0");
    }

    #[test]
    fn test_tf_vars_are_kept() {
        let mut env = HashMap::new();
        env.insert("TF_VAR_domain_name".to_string(), "a5g.io".to_string());
        let cli = TofuCli::new("/tmp/stack", env);
        assert_eq!(cli.env.get("TF_VAR_domain_name").unwrap(), "a5g.io");
    }
}
