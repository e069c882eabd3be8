//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use crate::types::Record;

/// テスト用のファイルを作成する（親ディレクトリも作成）
///
/// # Arguments
/// * `root` - プロジェクトのルート
/// * `relative` - ルートからの相対パス
/// * `content` - ファイルの内容
pub(crate) fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// (key, description, `localized_value`) のタプルから Record を作成する
pub(crate) fn records(entries: &[(&str, &str, &str)]) -> Vec<Record> {
    entries.iter().map(|(key, description, value)| Record::new(*key, *description, *value)).collect()
}
