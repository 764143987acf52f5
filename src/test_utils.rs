//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};

use parking_lot::Mutex;

use crate::config::{
    ConversionSettings,
    GroupSettings,
};
use crate::converter::TableConverter;
use crate::error::ConverterError;
use crate::language::{
    Converter,
    LanguageFactory,
};

/// テスト用の中国語変換グループ（簡体字 ⇔ 繁体字の最小テーブル）
pub(crate) fn chinese_group() -> GroupSettings {
    GroupSettings::new("zh", &["zh-hans", "zh-hant", "zh-cn", "zh-tw", "zh-hk"])
        .with_table("zh-tw", [("测", "測"), ("试", "試")])
        .with_table("zh-hant", [("测", "測"), ("试", "試")])
        .with_table("zh-cn", [("測", "测"), ("試", "试")])
        .with_table("zh-hans", [("測", "测"), ("試", "试")])
}

/// デフォルト設定の `zh` グループをテスト用テーブル付きのものに置き換える
pub(crate) fn test_settings() -> ConversionSettings {
    let mut settings = ConversionSettings::default();
    settings.groups.retain(|group| group.root != "zh");
    settings.groups.push(chinese_group());
    settings
}

/// `zh` グループの変換を `spy` 経由で行う `LanguageFactory` を作成する
pub(crate) fn chinese_factory(spy: &Arc<SpyConverter>) -> LanguageFactory {
    LanguageFactory::with_converters(&test_settings(), |group| {
        if group.root == "zh" {
            Arc::clone(spy) as Arc<dyn Converter>
        } else {
            Arc::new(TableConverter::from_settings(group))
        }
    })
}

/// `SpyConverter::calls` の要素を作る
pub(crate) fn call(text: &str, variant: &str) -> (String, String) {
    (text.to_string(), variant.to_string())
}

/// 呼び出しを記録する `TableConverter` のラッパー
#[derive(Debug)]
pub(crate) struct SpyConverter {
    /// 実際の変換
    inner: TableConverter,
    /// `(text, variant)` の呼び出し履歴
    calls: Mutex<Vec<(String, String)>>,
    /// 次の呼び出しを失敗させる
    fail_next: AtomicBool,
    /// 次の呼び出しで最後のセグメントを落とす
    drop_segments_next: AtomicBool,
}

impl Default for SpyConverter {
    fn default() -> Self {
        Self {
            inner: TableConverter::from_settings(&chinese_group()),
            calls: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
            drop_segments_next: AtomicBool::new(false),
        }
    }
}

impl SpyConverter {
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn drop_segments_next(&self) {
        self.drop_segments_next.store(true, Ordering::SeqCst);
    }
}

impl Converter for SpyConverter {
    fn translate(&self, text: &str, variant: &str) -> Result<String, ConverterError> {
        self.calls.lock().push(call(text, variant));

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ConverterError::Failed("backend unavailable".to_string()));
        }

        let translated = self.inner.translate(text, variant)?;
        if self.drop_segments_next.swap(false, Ordering::SeqCst) {
            return Ok(translated
                .rsplit_once('\0')
                .map_or_else(String::new, |(head, _)| head.to_string()));
        }
        Ok(translated)
    }
}
