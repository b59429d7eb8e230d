//! ブックのパースとセル検索
//!
//! セルは行優先（行内は左→右、行は上→下）で走査する。

pub mod decrypt;

use crate::error::{ExsearchError, Result};
use crate::query::{Query, SheetMatches};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;
use tracing::{debug, warn};

pub use decrypt::{prepare_workbook, PasswordSource, PresetPasswords, Protection};

/// ブック内の全シートを検索する
pub fn search_workbook(bytes: Vec<u8>, query: &Query) -> Result<SheetMatches> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ExsearchError::UnparsableWorkbook(e.to_string()))?;

    let mut found = SheetMatches::new();

    for sheet_name in workbook.sheet_names() {
        let range = match workbook.worksheet_range(&sheet_name) {
            Ok(range) => range,
            Err(e) => {
                // グラフシート等は値を持たない
                warn!("skipping sheet '{}': {}", sheet_name, e);
                continue;
            }
        };

        debug!("searching sheet '{}' ({:?})", sheet_name, range.get_size());
        search_sheet(&sheet_name, &range, query, &mut found);
    }

    Ok(found)
}

/// 1シート分の使用範囲を検索し、一致したセル参照を `found` に追加する
pub fn search_sheet(
    sheet_name: &str,
    range: &Range<Data>,
    query: &Query,
    found: &mut SheetMatches,
) {
    let Some((first_row, first_col)) = range.start() else {
        return;
    };

    for (row, col, value) in range.cells() {
        let text = render_cell(value);
        if query.is_match(&text) {
            let cell_ref = cell_reference(first_row + row as u32, first_col + col as u32);
            found.push(sheet_name, cell_ref);
        }
    }
}

/// セル値の文字列表現（空セルは空文字列）
///
/// 日付は `2024-01-15 00:00:00` 形式。変換できない日付と経過時間はシリアル値のまま。
/// 真偽値は `True` / `False`。
pub fn render_cell(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if !dt.is_duration() => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            _ => dt.as_f64().to_string(),
        },
        other => other.to_string(),
    }
}

/// 0始まりの列番号を列記号に変換（0 → "A", 26 → "AA"）
pub fn column_letter(col: u32) -> String {
    let mut n = col as u64 + 1;
    let mut letters = Vec::new();

    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }

    letters.iter().rev().collect()
}

/// 0始まりの行・列からセル参照を作る（(6, 1) → "B7"）
pub fn cell_reference(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn query(term: &str, exclusive: bool, case_sensitive: bool) -> Query {
        Query::new(PathBuf::from("."), term.to_string(), exclusive, case_sensitive)
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
        assert_eq!(column_letter(16383), "XFD");
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(6, 1), "B7");
        assert_eq!(cell_reference(13, 2), "C14");
    }

    #[test]
    fn test_render_cell() {
        assert_eq!(render_cell(&Data::Empty), "");
        assert_eq!(render_cell(&Data::String("Hello".into())), "Hello");
        assert_eq!(render_cell(&Data::Int(42)), "42");
        assert_eq!(render_cell(&Data::Float(5.0)), "5");
        assert_eq!(render_cell(&Data::Float(2.5)), "2.5");
        assert_eq!(render_cell(&Data::Bool(true)), "True");
        assert_eq!(render_cell(&Data::Bool(false)), "False");
        assert_eq!(
            render_cell(&Data::DateTimeIso("2024-01-15T10:30:00".into())),
            "2024-01-15T10:30:00"
        );
    }

    #[test]
    fn test_search_sheet_uses_absolute_positions() {
        // 使用範囲が B2 から始まるシート
        let mut range: Range<Data> = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("Hello".into()));
        range.set_value((2, 2), Data::String("hello there".into()));

        let mut found = SheetMatches::new();
        search_sheet("Sheet1", &range, &query("hello", false, false), &mut found);

        assert_eq!(found.get("Sheet1").unwrap(), ["B2", "C3"]);
    }

    #[test]
    fn test_search_sheet_row_major_order() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 1), Data::String("x".into()));
        range.set_value((1, 0), Data::String("x".into()));
        range.set_value((0, 0), Data::String("x".into()));

        let mut found = SheetMatches::new();
        search_sheet("S", &range, &query("x", true, false), &mut found);

        assert_eq!(found.get("S").unwrap(), ["A1", "B1", "A2"]);
    }

    #[test]
    fn test_empty_cells_render_as_empty_text() {
        let mut range: Range<Data> = Range::new((0, 0), (0, 1));
        range.set_value((0, 0), Data::String("value".into()));

        // B1 は空セル。空の検索語で完全一致させると空セルだけが一致する
        let mut found = SheetMatches::new();
        search_sheet("S", &range, &query("", true, false), &mut found);
        assert_eq!(found.get("S").unwrap(), ["B1"]);

        // 部分一致では全セルが一致する
        let mut found = SheetMatches::new();
        search_sheet("S", &range, &query("", false, false), &mut found);
        assert_eq!(found.get("S").unwrap(), ["A1", "B1"]);
    }

    #[test]
    fn test_empty_range_has_no_matches() {
        let range: Range<Data> = Range::empty();
        let mut found = SheetMatches::new();
        search_sheet("S", &range, &query("", false, false), &mut found);
        assert!(found.is_empty());
    }

    #[test]
    fn test_unparsable_bytes() {
        let result = search_workbook(b"not a workbook".to_vec(), &query("x", false, false));
        assert!(matches!(result, Err(ExsearchError::UnparsableWorkbook(_))));
    }
}
