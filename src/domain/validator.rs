// リクエストバリデータ
//
// フィールド仕様の集合に対して入力JSONを検証し、サニタイズ済みの値と
// エラーメッセージの一覧を返す。最初の失敗で打ち切らず、全フィールドを
// 検査して完全なエラーリストを一度で返す。不正な入力に対しても
// パニックやエラーを返さず、常に結果オブジェクトを返す。

use std::collections::BTreeMap;

use serde_json::Value;

use super::field_spec::{FieldRule, FieldSpec};

/// バリデーション結果
///
/// 不変条件: `valid`は`errors`が空のときに限りtrue。
/// `sanitized_fields`には個別に検証を通過したフィールドのみが入る。
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// 全フィールドが検証を通過したかどうか
    pub valid: bool,
    /// サニタイズ済みフィールド値（トリム、メールは小文字化）
    pub sanitized_fields: BTreeMap<String, String>,
    /// エラーメッセージ（仕様の定義順）
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// サニタイズ済みの値を取得
    pub fn sanitized(&self, name: &str) -> Option<&str> {
        self.sanitized_fields.get(name).map(|s| s.as_str())
    }

    /// エラーメッセージを1つの文字列に結合
    pub fn joined_errors(&self) -> String {
        self.errors.join("; ")
    }
}

/// 入力JSONをフィールド仕様の集合で検証する
///
/// 入力がJSONオブジェクトでない場合、必須フィールドはすべて欠落として
/// 扱われる。文字列フィールドは長さ検査の前にトリムされ、メールは
/// 小文字化される。検証は網羅的で、失敗後も残りの仕様を検査する。
pub fn validate(input: &Value, specs: &[FieldSpec]) -> ValidationResult {
    let mut sanitized_fields = BTreeMap::new();
    let mut errors = Vec::new();

    let obj = input.as_object();

    for spec in specs {
        let value = obj.and_then(|o| o.get(spec.name));

        let raw = match value {
            Some(Value::String(s)) => s.as_str(),
            Some(Value::Null) | None => {
                if spec.required {
                    errors.push(format!("{} is required", spec.name));
                }
                continue;
            }
            Some(_) => {
                errors.push(format!("{} must be a string", spec.name));
                continue;
            }
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if spec.required {
                errors.push(format!("{} is required", spec.name));
            }
            continue;
        }

        match spec.rule {
            FieldRule::Length { min, max } => {
                let len = trimmed.chars().count();
                let in_bounds = len >= min && max.map_or(true, |m| len <= m);
                if in_bounds {
                    sanitized_fields.insert(spec.name.to_string(), trimmed.to_string());
                } else {
                    errors.push(length_error(spec.name, min, max));
                }
            }
            FieldRule::Enumeration(allowed) => {
                let lowered = trimmed.to_lowercase();
                if allowed.contains(&lowered.as_str()) {
                    sanitized_fields.insert(spec.name.to_string(), lowered);
                } else {
                    errors.push(format!(
                        "{} must be one of: {}",
                        spec.name,
                        allowed.join(", ")
                    ));
                }
            }
            FieldRule::Email => {
                if is_plausible_email(trimmed) {
                    sanitized_fields.insert(spec.name.to_string(), trimmed.to_lowercase());
                } else {
                    errors.push(format!("{} must be a valid email address", spec.name));
                }
            }
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        sanitized_fields,
        errors,
    }
}

/// 長さ違反のエラーメッセージを生成
fn length_error(name: &str, min: usize, max: Option<usize>) -> String {
    match max {
        Some(max) => format!("{name} must be between {min} and {max} characters"),
        None => format!("{name} must be at least {min} characters"),
    }
}

/// 寛容なメールアドレス形式チェック
///
/// `非空白+ @ 非空白+ . 非空白+` のパターンのみを要求する。
/// RFC準拠の完全な検証は行わない（構文的にあり得るアドレスを通す）。
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}
