//! 暗号化ブックの判定と復号
//!
//! 暗号化されたOOXMLはOLE複合ファイルに `EncryptionInfo` と
//! `EncryptedPackage` の2ストリームを持つ。それ以外は平文として扱う。

use crate::error::{ExsearchError, Result};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};

const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// 暗号化の種別（平文は `Plain`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Plain,
    Standard,
    Agile,
    Unknown { major: u16, minor: u16 },
}

impl Protection {
    pub fn is_encrypted(&self) -> bool {
        !matches!(self, Protection::Plain)
    }
}

impl std::fmt::Display for Protection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protection::Plain => write!(f, "plain"),
            Protection::Standard => write!(f, "standard"),
            Protection::Agile => write!(f, "agile"),
            Protection::Unknown { major, minor } => write!(f, "unknown ({}.{})", major, minor),
        }
    }
}

/// パスワードの供給元
pub trait PasswordSource {
    /// `attempt` は1始まり。`None` を返すとそのファイルの試行を打ち切る。
    fn password(&mut self, file: &Path, attempt: u32) -> Result<Option<String>>;
}

/// あらかじめ指定されたパスワードを順に試す
#[derive(Debug, Clone, Default)]
pub struct PresetPasswords {
    passwords: Vec<String>,
}

impl PresetPasswords {
    pub fn new(passwords: Vec<String>) -> Self {
        Self { passwords }
    }
}

impl PasswordSource for PresetPasswords {
    fn password(&mut self, _file: &Path, attempt: u32) -> Result<Option<String>> {
        let index = attempt.saturating_sub(1) as usize;
        Ok(self.passwords.get(index).cloned())
    }
}

/// 暗号化状態を判定する
pub fn probe(bytes: &[u8]) -> Protection {
    if !bytes.starts_with(&OLE_MAGIC) {
        return Protection::Plain;
    }

    let Ok(mut ole) = cfb::CompoundFile::open(Cursor::new(bytes)) else {
        return Protection::Plain;
    };

    if !stream_exists(&mut ole, "EncryptionInfo") || !stream_exists(&mut ole, "EncryptedPackage") {
        return Protection::Plain;
    }

    match read_version(&mut ole) {
        Some((4, 4)) => Protection::Agile,
        Some((2..=4, 2)) => Protection::Standard,
        Some((major, minor)) => Protection::Unknown { major, minor },
        None => Protection::Unknown { major: 0, minor: 0 },
    }
}

fn stream_exists<R: Read + Seek>(ole: &mut cfb::CompoundFile<R>, name: &str) -> bool {
    ole.open_stream(name).is_ok() || ole.open_stream(format!("/{name}")).is_ok()
}

fn read_version<R: Read + Seek>(ole: &mut cfb::CompoundFile<R>) -> Option<(u16, u16)> {
    let mut stream = ole.open_stream("EncryptionInfo").ok()?;
    let mut header = [0u8; 4];
    stream.read_exact(&mut header).ok()?;
    Some((
        u16::from_le_bytes([header[0], header[1]]),
        u16::from_le_bytes([header[2], header[3]]),
    ))
}

/// ブックを読み込み、必要なら復号してパース可能なバイト列を返す
pub fn prepare_workbook(
    path: &Path,
    passwords: &mut dyn PasswordSource,
    max_attempts: u32,
) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;

    let protection = probe(&bytes);
    if !protection.is_encrypted() {
        return Ok(bytes);
    }

    info!("{} is encrypted ({})", path.display(), protection);
    decrypt_with_retries(path, passwords, max_attempts, |password| {
        decrypt_bytes(&bytes, password)
    })
}

/// パスワードを最大 `max_attempts` 回試す
///
/// 失敗した試行は警告ログに残し、最後の失敗理由を `DecryptionFailed` に載せる。
pub fn decrypt_with_retries<F>(
    path: &Path,
    passwords: &mut dyn PasswordSource,
    max_attempts: u32,
    mut decrypt: F,
) -> Result<Vec<u8>>
where
    F: FnMut(&str) -> std::result::Result<Vec<u8>, String>,
{
    let mut attempts = 0;
    let mut last_reason = String::from("no password supplied");

    for attempt in 1..=max_attempts {
        let Some(password) = passwords.password(path, attempt)? else {
            break;
        };
        attempts = attempt;

        match decrypt(&password) {
            Ok(decrypted) => {
                debug!("decrypted {} on attempt {}", path.display(), attempt);
                return Ok(decrypted);
            }
            Err(reason) => {
                warn!(
                    "attempt {}/{} to decrypt {} failed: {}",
                    attempt,
                    max_attempts,
                    path.display(),
                    reason
                );
                last_reason = reason;
            }
        }
    }

    Err(ExsearchError::DecryptionFailed {
        attempts,
        reason: last_reason,
    })
}

fn decrypt_bytes(bytes: &[u8], password: &str) -> std::result::Result<Vec<u8>, String> {
    let decrypted =
        office_crypto::decrypt_from_bytes(bytes.to_vec(), password).map_err(|e| e.to_string())?;

    // 誤ったパスワードでは中身がZIPにならない
    if !decrypted.starts_with(&ZIP_MAGIC) {
        return Err("incorrect password".to_string());
    }

    Ok(decrypted)
}
