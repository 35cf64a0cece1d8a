use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Upload resumes to the analysis service and show the feedback", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析サービスのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 保存済みの履歴書一覧を表示
    List,

    /// 履歴書を送信して解析結果を表示
    Analyze {
        /// 履歴書ファイル（PDF/DOCX/TXT推奨、省略時は入力を求める）
        file: Option<PathBuf>,

        /// タイムアウト秒数（省略時は設定値）
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// 保存済みの履歴書をダウンロード
    Download {
        /// ファイル名（省略時は一覧から選択）
        filename: Option<String>,

        /// 保存先ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 解析タイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
