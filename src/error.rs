use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExsearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが選択されていません")]
    DirectoryNotSelected,

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    /// パスワード試行回数を使い切った
    #[error("復号に失敗しました（{attempts}回試行）: {reason}")]
    DecryptionFailed { attempts: u32, reason: String },

    #[error("ブックを解析できません: {0}")]
    UnparsableWorkbook(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExsearchError>;
