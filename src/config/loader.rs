//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    ConversionSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".language-conversion.json";

/// ディレクトリから変換設定を読み込む
///
/// `.language-conversion.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_dir(config_dir: &Path) -> Result<Option<ConversionSettings>, ConfigError> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: ConversionSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
