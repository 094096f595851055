use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nutrivision")]
#[command(about = "AI-Powered Food Recognition & Calorie Tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 食事の写真を解析して栄養素を表示
    Analyze {
        /// 画像ファイル（省略時は対話モード）
        image: Option<PathBuf>,

        /// 解析結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 解析サービスのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
