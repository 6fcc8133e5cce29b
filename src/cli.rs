use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediscan")]
#[command(about = "Medicine QR lookup, serial authenticity check and scan tracking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カタログ一覧を表示
    List,

    /// 医薬品の詳細を表示
    Show {
        /// 医薬品ID
        #[arg(required = true)]
        id: String,
    },

    /// QRの読取結果（URLまたはID）から医薬品を特定
    Scan {
        /// 読取結果の文字列（--image 指定時は省略）
        #[arg(required_unless_present = "image", conflicts_with = "image")]
        payload: Option<String>,

        /// QRコード画像から読み取る
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// シリアル番号（指定時は対話なしで真正性を確認）
        #[arg(short, long)]
        serial: Option<String>,
    },

    /// 名前またはIDで検索
    Search {
        /// 検索語
        #[arg(required = true)]
        term: String,

        /// シリアル番号（指定時は対話なしで真正性を確認）
        #[arg(short, long)]
        serial: Option<String>,
    },

    /// 画像ファイル/フォルダのQRコードを一括で読み取る
    Decode {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        path: PathBuf,
    },

    /// 医薬品のQRコードを生成
    Generate {
        /// 医薬品ID
        #[arg(required = true)]
        id: String,

        /// URLのベース（省略時は設定値）
        #[arg(long)]
        base_url: Option<String>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (png/svg)
        #[arg(short, long, default_value = "png")]
        format: QrFormat,
    },

    /// スキャン回数を表示
    Counts {
        /// シリアル番号（省略時は全件）
        serial: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// QRのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
}

impl std::str::FromStr for QrFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(QrFormat::Png),
            "svg" => Ok(QrFormat::Svg),
            _ => Err(format!("Unknown format: {}. Use png or svg", s)),
        }
    }
}

impl std::fmt::Display for QrFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QrFormat::Png => write!(f, "png"),
            QrFormat::Svg => write!(f, "svg"),
        }
    }
}
