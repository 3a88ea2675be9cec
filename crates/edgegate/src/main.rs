mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edgegate", version)]
#[command(about = "Cloudflare Zero Trust / DNS を宣言的に整える", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 合成対象のスタック
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Stack {
    /// DNS と Zero Trust Access
    Cloudflare,
    /// Google OAuth 設定ガイダンス
    Google,
    /// 既存セキュリティグループへの Cloudflare IP 制限の厳格適用
    AwsSgEnforce,
}

#[derive(Subcommand)]
enum Commands {
    /// スタックを Terraform JSON に合成
    Synth {
        /// スタック名
        #[arg(short, long, env = "STACK", value_enum)]
        stack: Stack,
        /// 環境識別子 (dev | prod など)
        #[arg(short, long, env = "ENVIRONMENT")]
        environment: String,
    },
    /// Cloudflare スタックを合成し、既存リソースを state に取り込む
    ///
    /// Terraform/Tofu は既存の Access リソースとの同期をサポートして
    /// いないため、apply の前に毎回実行して state を現実に合わせる。
    Reconcile {
        /// 環境識別子 (dev | prod など)
        #[arg(short, long, env = "ENVIRONMENT")]
        environment: String,
    },
    /// tfvars の必須キーを検証
    Validate {
        /// スタック名
        #[arg(short, long, env = "STACK", value_enum)]
        stack: Stack,
        /// 環境識別子 (dev | prod など)
        #[arg(short, long, env = "ENVIRONMENT")]
        environment: String,
    },
    /// Google OAuth 設定チェックリストを生成
    Checklist {
        /// 環境識別子 (dev | prod など)
        #[arg(short, long, env = "ENVIRONMENT")]
        environment: String,
        /// REST API による自動検証も実行する
        #[arg(long)]
        probe: bool,
        /// 出力先（省略時は oauth-checklist-<環境>.md）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ログは stderr、ユーザー向けサマリーは stdout
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth { stack, environment } => commands::synth::handle(stack, &environment),
        Commands::Reconcile { environment } => commands::reconcile::handle(&environment).await,
        Commands::Validate { stack, environment } => {
            commands::validate::handle(stack, &environment)
        }
        Commands::Checklist {
            environment,
            probe,
            output,
        } => commands::checklist::handle(&environment, probe, output.as_deref()).await,
    }
}
