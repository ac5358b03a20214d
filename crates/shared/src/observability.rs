//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えに対応し、
//! エラー発生時の `SpanTrace` 取得に必要な `ErrorLayer` を登録する。

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// アプリケーション名（ルートスパンのフィールドに使用）
    pub app_name:   String,
    /// ログ出力形式
    pub log_format: LogFormat,
}

impl TracingConfig {
    pub fn new(app_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            app_name: app_name.into(),
            log_format,
        }
    }

    /// 環境変数から設定を読み取る
    pub fn from_env(app_name: impl Into<String>) -> Self {
        Self::new(app_name, LogFormat::from_env())
    }

    /// `app` フィールドにアプリケーション名を持つルートスパンを作成する
    ///
    /// 処理全体をこのスパンで包むと、すべてのログと `SpanTrace` にアプリケーション名が載る。
    pub fn root_span(&self) -> tracing::Span {
        tracing::info_span!("app", app = %self.app_name)
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は `"info,notifymail=debug"` をデフォルトとする。
///
/// `tracing_error::ErrorLayer` を登録するため、初期化後は
/// `SpanTrace::capture()` が現在のスパン経路を返す。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,notifymail=debug".into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}
