//! 検索条件と検索結果
//!
//! `Query` は1回の実行につき1つだけ作られ、`Searcher` に `&mut` で渡される。

use chrono::{DateTime, Local};
use std::path::PathBuf;

/// 照合モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// セル文字列と完全一致
    Exclusive,
    /// 部分一致（大文字小文字を区別）
    CaseSensitive,
    /// 部分一致（前後空白を除去し、大文字小文字を無視）
    CaseInsensitive,
}

impl MatchMode {
    /// 完全一致が指定された場合、大文字小文字の指定は無視される
    pub fn from_flags(is_exclusive: bool, is_case_sensitive: bool) -> Self {
        if is_exclusive {
            MatchMode::Exclusive
        } else if is_case_sensitive {
            MatchMode::CaseSensitive
        } else {
            MatchMode::CaseInsensitive
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Exclusive => write!(f, "exclusive"),
            MatchMode::CaseSensitive => write!(f, "inclusive, case-sensitive"),
            MatchMode::CaseInsensitive => write!(f, "inclusive, case-insensitive"),
        }
    }
}

/// シート名 → セル参照リスト（発見順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetMatches {
    sheets: Vec<(String, Vec<String>)>,
}

impl SheetMatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: &str, cell_ref: String) {
        match self.sheets.iter_mut().find(|(name, _)| name == sheet) {
            Some((_, cells)) => cells.push(cell_ref),
            None => self.sheets.push((sheet.to_string(), vec![cell_ref])),
        }
    }

    pub fn get(&self, sheet: &str) -> Option<&[String]> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, cells)| cells.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sheets
            .iter()
            .map(|(name, cells)| (name.as_str(), cells.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// 全シートのセル数合計
    pub fn len(&self) -> usize {
        self.sheets.iter().map(|(_, cells)| cells.len()).sum()
    }

    pub fn extend(&mut self, other: &SheetMatches) {
        for (sheet, cells) in other.iter() {
            for cell in cells {
                self.push(sheet, cell.clone());
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Query {
    pub term: String,
    pub path: PathBuf,
    pub is_exclusive: bool,
    pub is_case_sensitive: bool,
    pub matches: SheetMatches,
    pub started_at: DateTime<Local>,
    found: usize,
    /// 大文字小文字を無視する照合用に正規化済みの検索語
    folded_term: String,
}

impl Query {
    pub fn new(path: PathBuf, term: String, is_exclusive: bool, is_case_sensitive: bool) -> Self {
        let folded_term = fold(&term);
        Self {
            term,
            path,
            is_exclusive,
            is_case_sensitive,
            matches: SheetMatches::new(),
            started_at: Local::now(),
            found: 0,
            folded_term,
        }
    }

    pub fn mode(&self) -> MatchMode {
        MatchMode::from_flags(self.is_exclusive, self.is_case_sensitive)
    }

    /// セルの文字列表現が検索語に一致するか
    pub fn is_match(&self, text: &str) -> bool {
        match self.mode() {
            MatchMode::Exclusive => text == self.term,
            MatchMode::CaseSensitive => text.contains(self.term.as_str()),
            MatchMode::CaseInsensitive => fold(text).contains(self.folded_term.as_str()),
        }
    }

    /// 1ブック分の結果を取り込む
    pub fn record(&mut self, book: &SheetMatches) {
        self.found += book.len();
        self.matches.extend(book);
    }

    pub fn found_count(&self) -> usize {
        self.found
    }
}

fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}
