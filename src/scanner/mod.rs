use crate::error::{ExsearchError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// Excelの一時ロックファイル（`~$Book1.xlsm` など）
pub fn is_lock_file(file_name: &str) -> bool {
    file_name.contains('$')
}

/// 拡張子が検索対象か（大文字小文字は区別しない）
pub fn is_workbook_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| extensions.iter().any(|e| *e == ext))
        .unwrap_or(false)
}

/// フォルダ以下を再帰的に走査して検索対象のブックを列挙する
///
/// シンボリックリンクは辿らない。読み取れないエントリは警告を出して飛ばす。
pub fn scan_folder(folder: &Path, extensions: &[String]) -> Result<Vec<WorkbookFile>> {
    if !folder.exists() {
        return Err(ExsearchError::FolderNotFound(folder.display().to_string()));
    }

    let mut books = Vec::new();

    for entry in WalkDir::new(folder).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().to_string();

        if is_lock_file(&file_name) {
            debug!("skipping lock file: {}", path.display());
            continue;
        }

        if is_workbook_extension(path, extensions) {
            books.push(WorkbookFile {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // 実行ごとに同じ順序になるようパスでソート
    books.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(books)
}
