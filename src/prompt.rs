//! 対話式の検索条件入力
//!
//! コマンドラインで指定済みの項目は質問しない。

use crate::cli::Cli;
use crate::error::{ExsearchError, Result};
use crate::query::Query;
use crate::workbook::PasswordSource;
use dialoguer::{Confirm, Input, Password};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 検索条件を集めて `Query` を作る
///
/// フォルダ選択をキャンセルした場合はパスを空にする（検索対象0件として扱う）。
pub fn collect_query(cli: &Cli) -> Result<Query> {
    let path = match &cli.dir {
        Some(dir) => dir.clone(),
        None => match pick_directory() {
            Ok(dir) => dir,
            Err(ExsearchError::DirectoryNotSelected) => {
                println!("⚠ No directory selected.");
                PathBuf::new()
            }
            Err(e) => return Err(e),
        },
    };

    let term = match &cli.term {
        Some(term) => term.clone(),
        None => ask_term()?,
    };

    let is_exclusive = match cli.exclusive {
        Some(exclusive) => exclusive,
        None => ask_yes_no(
            "Would you like to exclusively search, finding only exactly matching cells?",
        )?,
    };

    // 大文字小文字の区別は部分一致のときだけ聞く
    let is_case_sensitive = if is_exclusive {
        true
    } else {
        match cli.case_sensitive {
            Some(case_sensitive) => case_sensitive,
            None => ask_yes_no("Is the term case sensitive?")?,
        }
    };

    Ok(Query::new(path, term, is_exclusive, is_case_sensitive))
}

/// フォルダ選択ダイアログ
pub fn pick_directory() -> Result<PathBuf> {
    println!("Please choose a directory.");

    rfd::FileDialog::new()
        .set_title("Please choose a directory")
        .pick_folder()
        .ok_or(ExsearchError::DirectoryNotSelected)
}

fn ask_term() -> Result<String> {
    Input::<String>::new()
        .with_prompt("What term are you looking for?")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ExsearchError::Prompt(e.to_string()))
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ExsearchError::Prompt(e.to_string()))
}

/// 終了前に Enter を待つ
pub fn wait_for_enter() -> Result<()> {
    print!("\nPress enter to exit.");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(())
}

/// コンソールからパスワードを入力させる
#[derive(Debug, Default)]
pub struct ConsolePasswordPrompt;

impl PasswordSource for ConsolePasswordPrompt {
    fn password(&mut self, file: &Path, attempt: u32) -> Result<Option<String>> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());

        let password = Password::new()
            .with_prompt(format!(
                "Please enter the password to decrypt '{}' (attempt {})",
                name, attempt
            ))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| ExsearchError::Prompt(e.to_string()))?;

        Ok(Some(password))
    }
}
