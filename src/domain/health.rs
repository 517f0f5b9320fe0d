// ヘルスレポート
//
// /healthレスポンスのボディを構成するドメイン型。
// ランタイム情報はアンビエントなグローバルから読まず、
// 呼び出し側（アプリケーション層）が明示的に注入する。

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// 実行環境の静的情報
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    /// OS名（コンパイルターゲット）
    pub os: &'static str,
    /// CPUアーキテクチャ（コンパイルターゲット）
    pub arch: &'static str,
}

impl SystemInfo {
    /// コンパイルターゲットの定数から作成
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

/// メモリ・稼働時間のスナップショット
///
/// 値はRuntimeMetricsアクセサ経由でリクエスト時に取得したもの。
#[derive(Debug, Clone, Serialize)]
pub struct MemorySnapshot {
    /// Lambdaに割り当てられたメモリ上限（MB、未設定環境ではnull）
    pub limit_mb: Option<u64>,
    /// プロセス起動からの経過秒数
    pub uptime_secs: u64,
}

/// 依存先1件分のチェック結果
#[derive(Debug, Clone, Serialize)]
pub struct DependencyCheck {
    /// 依存先名
    pub name: String,
    /// チェックを通過したかどうか
    pub healthy: bool,
    /// 状態の説明
    pub detail: String,
}

impl DependencyCheck {
    pub fn healthy(name: &str, detail: &str) -> Self {
        Self {
            name: name.to_string(),
            healthy: true,
            detail: detail.to_string(),
        }
    }

    pub fn unhealthy(name: &str, detail: &str) -> Self {
        Self {
            name: name.to_string(),
            healthy: false,
            detail: detail.to_string(),
        }
    }
}

/// /healthレスポンスのボディ
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// 全チェック通過なら"healthy"、それ以外は"unhealthy"
    pub status: &'static str,
    /// レポート生成時点のISO-8601タイムスタンプ
    pub timestamp: String,
    /// クレートバージョン
    pub version: String,
    /// デプロイ環境名（production / development など）
    pub environment: String,
    /// デプロイステージ名
    pub stage: String,
    /// AWSリージョン
    pub region: String,
    /// 実行環境の静的情報
    pub system: SystemInfo,
    /// メモリ・稼働時間
    pub memory: MemorySnapshot,
    /// 依存先名から状態文字列へのマップ（checksから導出）
    pub services: BTreeMap<String, &'static str>,
    /// 依存先チェックの詳細（定義順）
    pub checks: Vec<DependencyCheck>,
    /// 付加情報
    pub metadata: BTreeMap<String, String>,
}

impl HealthReport {
    /// チェック結果からレポートを構築
    ///
    /// `status`と`services`はchecksから導出される。
    /// タイムスタンプは構築時点で生成される。
    pub fn build(
        version: String,
        environment: String,
        stage: String,
        region: String,
        memory: MemorySnapshot,
        checks: Vec<DependencyCheck>,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        let all_healthy = checks.iter().all(|c| c.healthy);

        let services = checks
            .iter()
            .map(|c| {
                let state = if c.healthy { "ok" } else { "unavailable" };
                (c.name.clone(), state)
            })
            .collect();

        Self {
            status: if all_healthy { "healthy" } else { "unhealthy" },
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version,
            environment,
            stage,
            region,
            system: SystemInfo::current(),
            memory,
            services,
            checks,
            metadata,
        }
    }

    /// 全依存先がチェックを通過しているか
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
