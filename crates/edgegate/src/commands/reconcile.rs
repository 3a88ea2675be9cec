use anyhow::Context;
use colored::Colorize;
use edgegate_cloudflare::{ClientConfig, CloudflareClient};
use edgegate_core::{CLOUDFLARE_REQUIRED_KEYS, CLOUDFLARE_STACK_ID, CloudflareConfig};
use edgegate_reconcile::{Decision, ResourceGraph, RunReport, run_auto_import};
use edgegate_tofu::TofuCli;

pub async fn handle(environment: &str) -> anyhow::Result<()> {
    let base_dir = std::env::current_dir()?;
    edgegate_core::validate_required_keys(&base_dir, environment, CLOUDFLARE_REQUIRED_KEYS)?;

    // 取り込みは常に合成直後のグラフに対して行う
    let doc = edgegate_synth::cloudflare::synthesize(environment);
    let doc_path = edgegate_synth::stack_document_path(&base_dir, CLOUDFLARE_STACK_ID);
    doc.write_to(&doc_path)?;

    let config = CloudflareConfig::load(&base_dir, environment);
    let api_token = config
        .api_token
        .clone()
        .context("cloudflare_api_token が解決できません")?;
    let account_id = config
        .account_id
        .clone()
        .context("cloudflare_account_id が解決できません")?;

    let client = CloudflareClient::new(ClientConfig {
        api_token,
        account_id,
    });
    let stack_dir = edgegate_synth::stack_dir(&base_dir, CLOUDFLARE_STACK_ID);
    // TF_VAR 環境は一度だけ構築し、全サブプロセスで使い回す
    let tofu = TofuCli::new(&stack_dir, config.tf_var_env());
    let graph = ResourceGraph::new(doc.to_value()?);

    println!("{}", "既存リソースの取り込みを開始...".blue());
    match run_auto_import(&config, &graph, &client, &tofu).await {
        Some(report) => print_report(&report),
        None => println!(
            "{}",
            "必須設定が不足しているため取り込みをスキップしました".yellow()
        ),
    }

    // 個別のリソース種別の失敗は次回実行で再試行するため、
    // プロセスとしては成功で返す
    Ok(())
}

fn print_report(report: &RunReport) {
    for kind in &report.kinds {
        let label = kind.kind.label();
        if let Some(error) = &kind.error {
            println!("{} {}: {}", "✗".red().bold(), label, error.red());
            continue;
        }
        if let Some(reason) = &kind.skipped {
            println!("{} {}: スキップ ({})", "-".yellow(), label, reason);
            continue;
        }
        match &kind.decision {
            Some(Decision::Import { .. }) if kind.imported => {
                println!("{} {}: 既存リソースを取り込みました", "✓".green().bold(), label);
            }
            Some(Decision::Import { .. }) => {
                println!("{} {}: 取り込みに失敗（次回実行で再試行）", "✗".red(), label);
            }
            Some(Decision::Evict { .. }) => {
                if kind.imported {
                    println!(
                        "{} {}: 失効した束縛を削除し、再取り込みしました",
                        "✓".green().bold(),
                        label
                    );
                } else if kind.evicted {
                    println!("{} {}: 失効した state 束縛を削除しました", "!".yellow().bold(), label);
                } else {
                    println!("{} {}: state 束縛の削除に失敗", "✗".red(), label);
                }
            }
            Some(Decision::Skip) => {
                println!("{} {}: 既に管理下（変更なし）", "✓".green(), label);
            }
            Some(Decision::AwaitingCreate) => {
                println!("{} {}: 既存リソースなし（apply が新規作成）", "-".normal(), label);
            }
            Some(Decision::NotDeclared) => {
                println!("{} {}: 宣言なし", "-".normal(), label);
            }
            None => {}
        }
    }

    if report.has_failures() {
        println!(
            "{}",
            "一部のリソース種別でエラーが発生しました（詳細はログを参照）".yellow()
        );
    }
}
