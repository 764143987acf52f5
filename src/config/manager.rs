//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    ConversionSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ConversionSettings,

    /// 設定ファイルを探したディレクトリ
    config_dir: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ConversionSettings::default(), config_dir: None }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイルがなければ組み込みの変換グループを使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_dir);

        let settings = if let Some(dir) = &config_dir {
            loader::load_from_dir(dir)?.map_or_else(ConversionSettings::default, |loaded| {
                tracing::debug!("Loaded settings with {} groups", loaded.groups.len());
                loaded
            })
        } else {
            ConversionSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_dir = config_dir;
        tracing::debug!("Settings loaded successfully");

        Ok(())
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: ConversionSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ConversionSettings {
        &self.current_settings
    }

    /// 設定ディレクトリを取得
    #[must_use]
    pub const fn config_dir(&self) -> Option<&PathBuf> {
        self.config_dir.as_ref()
    }
}
