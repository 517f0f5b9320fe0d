// フィールド仕様定義
//
// リクエストボディの各フィールドに適用するバリデーションルールを
// 宣言的に記述するための型。バリデーション本体はvalidator.rsが担う。

/// フィールドに適用するバリデーションルール
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// トリム後の文字数境界（両端含む）
    Length { min: usize, max: Option<usize> },
    /// 許可値の集合（エラーメッセージには許可値をそのまま列挙する）
    Enumeration(&'static [&'static str]),
    /// 寛容なメールアドレス形式（非空白+ @ 非空白+ . 非空白+）
    Email,
}

/// 1フィールド分のバリデーション仕様
///
/// フィールド名・必須フラグ・ルールの組。エンドポイントごとに
/// 静的なスライスとして定義し、バリデータに渡す。
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// リクエストボディ内のフィールド名
    pub name: &'static str,
    /// 必須フィールドかどうか
    pub required: bool,
    /// 適用するルール
    pub rule: FieldRule,
}

impl FieldSpec {
    /// 必須フィールドの仕様を作成
    pub const fn required(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            required: true,
            rule,
        }
    }
}
