//! exsearch
//!
//! フォルダ以下のExcelブック（.xlsm / .xlsx）を再帰的に探し、
//! 全シートの全セルから検索語を探す。

pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod query;
pub mod report;
pub mod scanner;
pub mod searcher;
pub mod workbook;

pub use error::{ExsearchError, Result};
pub use query::{MatchMode, Query, SheetMatches};
pub use searcher::{BookOutcome, RunSummary, Searcher};
