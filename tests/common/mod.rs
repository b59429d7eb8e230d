//! テスト用ブック生成ヘルパー

#![allow(dead_code)]

use ms_offcrypto_writer::Ecma376AgileWriter;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::{Cursor, Write as _};
use std::path::Path;

/// (シート名, [(行, 列, 文字列)]) からxlsxのバイト列を作る（行・列は0始まり）
pub fn build_book(sheets: &[(&str, &[(u32, u16, &str)])]) -> Vec<u8> {
    let mut workbook = Workbook::new();

    for (name, cells) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).expect("set sheet name");
        for (row, col, text) in cells.iter() {
            sheet.write_string(*row, *col, *text).expect("write cell");
        }
    }

    workbook.save_to_buffer().expect("save workbook")
}

pub fn write_book(path: &Path, sheets: &[(&str, &[(u32, u16, &str)])]) {
    std::fs::write(path, build_book(sheets)).expect("write workbook file");
}

/// Sheet1!B2 = "Hello" のみのブック
pub fn write_hello_book(path: &Path) {
    write_book(path, &[("Sheet1", &[(1, 1, "Hello")])]);
}

/// Sheet1 に日付・数値・真偽値を持つブック
///
/// A1 = 2024-01-15（日付書式）, B1 = 5.0, C1 = 2.5, D1 = TRUE
pub fn write_typed_book(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").expect("set sheet name");

    let date = ExcelDateTime::from_ymd(2024, 1, 15).expect("build date");
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    sheet
        .write_datetime_with_format(0, 0, &date, &date_format)
        .expect("write date");
    sheet.write_number(0, 1, 5.0).expect("write number");
    sheet.write_number(0, 2, 2.5).expect("write number");
    sheet.write_boolean(0, 3, true).expect("write boolean");

    let bytes = workbook.save_to_buffer().expect("save workbook");
    std::fs::write(path, bytes).expect("write workbook file");
}

/// Agile暗号化したバイト列
pub fn encrypt_with_password(plain: &[u8], password: &str) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut agile =
        Ecma376AgileWriter::create(&mut rand::rng(), password, &mut cursor).expect("create agile");
    agile.write_all(plain).expect("write plaintext package");
    agile.finalize().expect("finalize agile writer");
    cursor.into_inner()
}
