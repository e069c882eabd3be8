//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SearcherKind,
    Settings,
    loader,
};
use crate::input::strings_file::ParseMode;
use crate::render::EscapeMode;

/// コマンドライン引数による上書き
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// 出力ファイル（カレントディレクトリ基準）
    pub output: Option<PathBuf>,
    pub template: Option<String>,
    pub searcher: Option<SearcherKind>,
    /// 既存ファイルを strict モードでパースする
    pub strict: bool,
    /// 出力時のクォートのエスケープを無効化する
    pub no_escape: bool,
}

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: Settings,

    /// プロジェクトのルートパス
    project_root: PathBuf,

    /// コマンドラインで指定された出力ファイル（絶対パス）
    output_override: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            current_settings: Settings::default(),
            project_root: project_root.into(),
            output_override: None,
        }
    }

    /// 設定を読み込む
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", self.project_root);

        let settings =
            loader::load_from_project(&self.project_root)?.map_or_else(Settings::default, |s| {
                tracing::debug!("Loaded project settings: {:?}", s);
                s
            });

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// コマンドライン引数で設定を上書きする
    ///
    /// # Errors
    /// - 出力パスを絶対パスに変換できない
    /// - バリデーションエラー
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<(), ConfigError> {
        let mut settings = self.current_settings.clone();

        if let Some(template) = overrides.template {
            settings.template = template;
        }
        if let Some(searcher) = overrides.searcher {
            settings.searcher = searcher;
        }
        if overrides.strict {
            settings.parse_mode = ParseMode::Strict;
        }
        if overrides.no_escape {
            settings.escape = EscapeMode::None;
        }

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 出力先はプロジェクトではなく呼び出し時のカレントディレクトリ基準
        if let Some(output) = overrides.output {
            self.output_override = Some(std::path::absolute(output)?);
        }
        self.current_settings = settings;

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// 出力ファイルのパスを取得
    ///
    /// コマンドラインで指定されていればそれを、なければ設定値をプロジェクトルート基準で解決する
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_override
            .clone()
            .unwrap_or_else(|| self.project_root.join(&self.current_settings.output))
    }
}
