//! # ユースケース層
//!
//! - [`notification`] - 通知メールのレンダリングと送信

pub mod notification;
