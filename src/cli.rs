use clap::Parser;
use std::path::PathBuf;

/// 省略した項目は対話式に入力する
#[derive(Parser, Debug)]
#[command(name = "exsearch")]
#[command(about = "Search every cell of every Excel workbook under a folder", long_about = None)]
pub struct Cli {
    /// 検索するフォルダ（省略時はフォルダ選択ダイアログ）
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// 検索語
    #[arg(short, long)]
    pub term: Option<String>,

    /// 完全一致で検索する (true/false)
    #[arg(short, long)]
    pub exclusive: Option<bool>,

    /// 大文字小文字を区別する (true/false)。部分一致のときのみ有効
    #[arg(short, long)]
    pub case_sensitive: Option<bool>,

    /// 検索対象の拡張子（複数指定可、設定ファイルより優先）
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// 暗号化ブックに試すパスワード（複数指定可、指定時は入力を求めない）
    #[arg(long = "password")]
    pub passwords: Vec<String>,

    /// 終了時に Enter を待たない
    #[arg(long)]
    pub no_pause: bool,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}
