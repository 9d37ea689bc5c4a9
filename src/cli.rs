use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aadhaar-verify")]
#[command(about = "Aadhaar verification demo client (analyze / QR verify / lookup)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 検証サービスのベースURL（環境変数・設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像をOCR + 偽造判定にかける
    Analyze {
        /// 画像ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// QR画像をデコードしてチェックサムを確認
    VerifyQr {
        /// QRを含む画像ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 12桁の番号でレコードを照会
    Lookup {
        /// Aadhaar番号（数字以外は無視）
        #[arg(required = true)]
        aadhaar: String,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 指定したワークフローを同時に実行
    Check {
        /// Analyzeする画像
        #[arg(long)]
        image: Option<PathBuf>,

        /// QR検証する画像
        #[arg(long)]
        qr: Option<PathBuf>,

        /// 照会する番号
        #[arg(long)]
        aadhaar: Option<String>,
    },

    /// 対話モード
    Console,

    /// 設定を表示/編集
    Config {
        /// ベースURLを保存
        #[arg(long)]
        set_api_base: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
