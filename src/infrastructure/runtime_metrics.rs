// ランタイムメトリクスアクセサ
//
// ヘルスレポートに含めるメモリ上限と稼働時間を提供する。
// レポート構築側がグローバル状態を直接読まずに済むよう、
// トレイト経由でリクエスト時に注入する。

use std::sync::OnceLock;
use std::time::Instant;

/// プロセス起動時刻（初回アクセス時に確定）
static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// ランタイムメトリクスのトレイト
///
/// 抽象化によりテスト時に固定値の実装を注入可能にする
pub trait RuntimeMetrics: Send + Sync {
    /// Lambdaに割り当てられたメモリ上限（MB）
    ///
    /// Lambda環境外など取得できない場合は`None`。
    fn memory_limit_mb(&self) -> Option<u64>;

    /// プロセス起動からの経過秒数
    fn uptime_secs(&self) -> u64;
}

/// Lambda実行環境から読み取る実装
///
/// メモリ上限はAWS_LAMBDA_FUNCTION_MEMORY_SIZE環境変数から取得する。
#[derive(Debug, Clone, Default)]
pub struct LambdaRuntimeMetrics;

impl LambdaRuntimeMetrics {
    /// プロセス起動時刻を記録して作成
    ///
    /// コールドスタート時（ハンドラー初期化時）に呼び出すことで、
    /// 以降のuptime_secsが初期化からの経過時間になる。
    pub fn new() -> Self {
        PROCESS_START.get_or_init(Instant::now);
        Self
    }
}

impl RuntimeMetrics for LambdaRuntimeMetrics {
    fn memory_limit_mb(&self) -> Option<u64> {
        std::env::var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE")
            .ok()
            .and_then(|v| v.trim().parse().ok())
    }

    fn uptime_secs(&self) -> u64 {
        PROCESS_START
            .get_or_init(Instant::now)
            .elapsed()
            .as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    #[serial(site_env)]
    fn test_memory_limit_from_env() {
        unsafe {
            set_env("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "256");
        }

        let metrics = LambdaRuntimeMetrics::new();
        assert_eq!(metrics.memory_limit_mb(), Some(256));

        unsafe {
            remove_env("AWS_LAMBDA_FUNCTION_MEMORY_SIZE");
        }
    }

    #[test]
    #[serial(site_env)]
    fn test_memory_limit_missing_env() {
        unsafe {
            remove_env("AWS_LAMBDA_FUNCTION_MEMORY_SIZE");
        }

        let metrics = LambdaRuntimeMetrics::new();
        assert_eq!(metrics.memory_limit_mb(), None);
    }

    #[test]
    #[serial(site_env)]
    fn test_memory_limit_unparsable_env() {
        unsafe {
            set_env("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "not-a-number");
        }

        let metrics = LambdaRuntimeMetrics::new();
        assert_eq!(metrics.memory_limit_mb(), None);

        unsafe {
            remove_env("AWS_LAMBDA_FUNCTION_MEMORY_SIZE");
        }
    }

    // 起動時刻は一度だけ確定し、uptimeは単調増加する
    #[test]
    fn test_uptime_is_monotonic() {
        let metrics = LambdaRuntimeMetrics::new();
        let first = metrics.uptime_secs();
        let second = metrics.uptime_secs();
        assert!(second >= first);
    }

    /// 固定値を返すテスト用実装
    struct FixedMetrics;

    impl RuntimeMetrics for FixedMetrics {
        fn memory_limit_mb(&self) -> Option<u64> {
            Some(128)
        }

        fn uptime_secs(&self) -> u64 {
            7
        }
    }

    #[test]
    fn test_trait_object_injection() {
        let metrics: Box<dyn RuntimeMetrics> = Box::new(FixedMetrics);
        assert_eq!(metrics.memory_limit_mb(), Some(128));
        assert_eq!(metrics.uptime_secs(), 7);
    }
}
