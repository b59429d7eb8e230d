//! コンソール出力の整形
//!
//! 文字列を返すだけで、出力は呼び出し側が行う。

use crate::query::{Query, SheetMatches};
use crate::searcher::{BookOutcome, RunSummary};
use chrono::Local;
use std::path::{Path, PathBuf};

/// ブック名と絶対パス
pub fn workbook_header(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    format!(
        "\n_______________ Book: {} _______________\n\nPath: {}\n",
        name,
        absolute_path(path).display()
    )
}

/// シートごとの一致セル。1件もなければ "None"
pub fn found_cells(matches: &SheetMatches) -> String {
    let mut out = String::from("Cells Found:\n");

    if matches.is_empty() {
        out.push_str("None\n");
        return out;
    }

    for (sheet, cells) in matches.iter() {
        out.push_str(&format!("Sheet '{}': {}\n", sheet, cells.join(", ")));
    }

    out
}

pub fn skipped(reason: &str) -> String {
    format!("Skipped: {}\n", reason)
}

/// 1ブック分の出力
pub fn book(outcome: &BookOutcome) -> String {
    match outcome {
        BookOutcome::Searched { path, matches } => {
            format!("{}\n{}", workbook_header(path), found_cells(matches))
        }
        BookOutcome::Skipped { path, reason } => {
            format!("{}\n{}", workbook_header(path), skipped(&reason.to_string()))
        }
    }
}

/// 実行全体のまとめ
pub fn summary(query: &Query, run: &RunSummary) -> String {
    let elapsed = Local::now().signed_duration_since(query.started_at);

    let mut out = String::from("\n======== Summary ========\n");
    out.push_str(&format!("Term: \"{}\" ({})\n", query.term, query.mode()));
    out.push_str(&format!("Workbooks searched: {}\n", run.searched_count()));
    out.push_str(&format!("Workbooks skipped: {}\n", run.skipped_count()));

    for outcome in &run.books {
        if let BookOutcome::Skipped { path, reason } = outcome {
            out.push_str(&format!("  - {}: {}\n", path.display(), reason));
        }
    }

    out.push_str(&format!("Total matches: {}\n", query.found_count()));
    out.push_str(&format!(
        "Elapsed: {}.{:03}s\n",
        elapsed.num_seconds(),
        elapsed.num_milliseconds().rem_euclid(1000)
    ));
    out
}

fn absolute_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
