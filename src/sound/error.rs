//! Sound system error types.
//!
//! Audio is a fire-and-forget side channel of the timer: every error here is
//! logged and swallowed by the caller, never propagated into the engine.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("サウンドファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// No embedded tone is registered under this name.
    #[error("組み込みサウンドが見つかりません: {0}")]
    UnknownTone(String),

    /// The audio thread is gone or could not be started.
    #[error("オーディオスレッドが利用できません: {0}")]
    ThreadUnavailable(String),

    /// Generic sound playback error.
    #[error("サウンド再生エラー: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotAvailable(_) | Self::StreamError(_) | Self::ThreadUnavailable(_)
        )
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if playback should fall back to the embedded tone.
    #[must_use]
    pub fn should_fallback_to_embedded(&self) -> bool {
        self.is_file_error()
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "オーディオデバイスを接続するか --no-sound を指定してください",
            Self::FileNotFound(_) => "組み込みサウンドで再生を試みます",
            Self::DecodeError(_) => "サウンドファイルが破損している可能性があります",
            Self::StreamError(_) => "オーディオ設定を確認してください",
            Self::UnknownTone(_) => "work, break, long_break のいずれかを指定してください",
            Self::ThreadUnavailable(_) => "--no-sound を指定して再実行してください",
            Self::PlaybackError(_) => "アプリケーションを再起動してください",
        }
    }
}
