//! # notifymail 共有ユーティリティ
//!
//! ワークスペース全体で使用するログ初期化とログフィールド規約を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - subscriber の構築は `observability` feature の背後に置き、ライブラリ利用者に強制しない

pub mod event_log;
pub mod observability;

// マクロ展開先から `$crate::tracing` で参照する
#[doc(hidden)]
pub use tracing;
