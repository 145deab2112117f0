use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Languages the message catalog ships tables for.
///
/// Anything else, from the CLI or from a config file, falls back to
/// [`Locale::EnUs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Locale {
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
            Self::JaJp => "ja-JP",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    /// Accepts `zh-CN`, `zh_CN`, `zh` and friends, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase().replace('_', "-");
        let lang = lowered.split('-').next().unwrap_or_default();
        Ok(match lang {
            "zh" => Self::ZhCn,
            "en" => Self::EnUs,
            "ja" => Self::JaJp,
            _ => {
                log::warn!("Unsupported locale {s:?}, falling back to en-US");
                Self::EnUs
            }
        })
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(locale) = raw.parse::<Locale>();
        Ok(locale)
    }
}

/// Opaque keys into the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    InputText,
    ErrorProcessing,
    ParseSuccess,
    ParseFailed,
    NoExifData,
    DownloadError,
    NoFieldsSelected,
}

impl MessageKey {
    pub const ALL: [MessageKey; 7] = [
        Self::InputText,
        Self::ErrorProcessing,
        Self::ParseSuccess,
        Self::ParseFailed,
        Self::NoExifData,
        Self::DownloadError,
        Self::NoFieldsSelected,
    ];

    /// The catalog identifier the host uses for this message.
    pub fn id(&self) -> &'static str {
        match self {
            Self::InputText => "inputText",
            Self::ErrorProcessing => "errorProcessing",
            Self::ParseSuccess => "parseSuccess",
            Self::ParseFailed => "parseFailed",
            Self::NoExifData => "noExifData",
            Self::DownloadError => "downloadError",
            Self::NoFieldsSelected => "noFieldsSelected",
        }
    }
}

/// Localized message lookup for one locale.
///
/// ```rust
/// use exif_report::i18n::{Locale, MessageKey, Messages};
///
/// let messages = Messages::new(Locale::EnUs);
/// assert_eq!(messages.get(MessageKey::NoExifData), "No EXIF data found");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, key: MessageKey) -> &'static str {
        use MessageKey::*;
        match self.locale {
            Locale::ZhCn => match key {
                InputText => "附件字段",
                ErrorProcessing => "处理失败，请重试",
                ParseSuccess => "EXIF信息提取成功",
                ParseFailed => "EXIF信息提取失败",
                NoExifData => "未找到EXIF信息",
                DownloadError => "下载附件失败",
                NoFieldsSelected => "请至少选择一个附件字段",
            },
            Locale::EnUs => match key {
                InputText => "Attachment Field",
                ErrorProcessing => "Processing failed, please try again",
                ParseSuccess => "EXIF extraction successful",
                ParseFailed => "EXIF extraction failed",
                NoExifData => "No EXIF data found",
                DownloadError => "Failed to download attachment",
                NoFieldsSelected => "Please select at least one attachment field",
            },
            Locale::JaJp => match key {
                InputText => "添付フィールド",
                ErrorProcessing => "処理に失敗しました。もう一度お試しください",
                ParseSuccess => "EXIF抽出成功",
                ParseFailed => "EXIF抽出失敗",
                NoExifData => "EXIF情報が見つかりません",
                DownloadError => "添付ファイルのダウンロードに失敗しました",
                NoFieldsSelected => "少なくとも1つの添付フィールドを選択してください",
            },
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
