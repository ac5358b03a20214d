//! # ビジネスイベントログの構造化ヘルパー
//!
//! `jq` で送信結果を追跡できるよう、ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        $crate::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 呼び出し元の設定不備
        pub const CONFIGURATION: &str = "configuration";
        /// テンプレートレンダリング
        pub const RENDERING: &str = "rendering";
        /// SMTP サーバーとの通信
        pub const TRANSPORT: &str = "transport";
    }
}
