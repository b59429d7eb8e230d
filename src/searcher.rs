//! 検索の実行
//!
//! ブックは1件ずつ順に処理する。1件の失敗（復号失敗・パース失敗・IO）は
//! そのブックをスキップとして記録し、残りのブックの検索を続ける。

use crate::config::{DEFAULT_EXTENSIONS, DEFAULT_PASSWORD_ATTEMPTS};
use crate::error::{ExsearchError, Result};
use crate::query::{Query, SheetMatches};
use crate::report;
use crate::scanner;
use crate::workbook::{self, PasswordSource};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 1ブックの処理結果
#[derive(Debug)]
pub enum BookOutcome {
    Searched { path: PathBuf, matches: SheetMatches },
    Skipped { path: PathBuf, reason: ExsearchError },
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub books: Vec<BookOutcome>,
}

impl RunSummary {
    pub fn searched_count(&self) -> usize {
        self.books
            .iter()
            .filter(|b| matches!(b, BookOutcome::Searched { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.books.len() - self.searched_count()
    }
}

pub struct Searcher<'a> {
    passwords: &'a mut dyn PasswordSource,
    extensions: Vec<String>,
    password_attempts: u32,
    print_reports: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(passwords: &'a mut dyn PasswordSource) -> Self {
        Self {
            passwords,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            password_attempts: DEFAULT_PASSWORD_ATTEMPTS,
            print_reports: true,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_password_attempts(mut self, attempts: u32) -> Self {
        self.password_attempts = attempts.max(1);
        self
    }

    /// ブックごとのレポートを標準出力に出すか（テストでは無効にする）
    pub fn with_print_reports(mut self, print_reports: bool) -> Self {
        self.print_reports = print_reports;
        self
    }

    /// `query.path` 以下の全ブックを検索し、結果を `query` に蓄積する
    ///
    /// パスが空（フォルダ未選択）の場合は0件として扱う。
    /// 存在しないフォルダはエラー。
    pub fn run(&mut self, query: &mut Query) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if query.path.as_os_str().is_empty() {
            warn!("no directory selected, nothing to search");
            return Ok(summary);
        }

        let books = scanner::scan_folder(&query.path, &self.extensions)?;
        info!("found {} workbook(s) under {}", books.len(), query.path.display());

        for book in books {
            let outcome = match self.search_file(&book.path, query) {
                Ok(matches) => {
                    query.record(&matches);
                    BookOutcome::Searched {
                        path: book.path,
                        matches,
                    }
                }
                Err(reason) => {
                    warn!("skipping {}: {}", book.path.display(), reason);
                    BookOutcome::Skipped {
                        path: book.path,
                        reason,
                    }
                }
            };

            if self.print_reports {
                print!("{}", report::book(&outcome));
            }
            summary.books.push(outcome);
        }

        Ok(summary)
    }

    /// 1ブックを復号・パースして検索する（バッファはこの関数内で解放される）
    pub fn search_file(&mut self, path: &Path, query: &Query) -> Result<SheetMatches> {
        let bytes = workbook::prepare_workbook(path, &mut *self.passwords, self.password_attempts)?;
        workbook::search_workbook(bytes, query)
    }
}
