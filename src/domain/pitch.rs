// ピッチテンプレートストア
//
// (role, focus) の4×3全組み合わせに対する定型ピッチ文と
// 静的な確信度を保持する。学習や計算は行わない読み取り専用の
// 固定設定であり、プロセス生存期間中は不変。
// テーブルは列挙型ペアに対する網羅的matchで定義し、
// 全組み合わせの存在をコンパイル時に保証する。

/// ピッチの対象者ロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Recruiter,
    Cto,
    Product,
    Founder,
}

/// ピッチの技術フォーカス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Ai,
    Cloud,
    Automation,
}

impl Role {
    /// 全ロール（バリデーション用の許可値と同順）
    pub const ALL: [Role; 4] = [Role::Recruiter, Role::Cto, Role::Product, Role::Founder];

    /// 許可値の文字列集合（エラーメッセージ用）
    pub const ALLOWED: &'static [&'static str] = &["recruiter", "cto", "product", "founder"];

    /// 文字列からパース（トリム後、大文字小文字は区別しない）
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "recruiter" => Some(Role::Recruiter),
            "cto" => Some(Role::Cto),
            "product" => Some(Role::Product),
            "founder" => Some(Role::Founder),
            _ => None,
        }
    }

    /// 正規化された文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::Cto => "cto",
            Role::Product => "product",
            Role::Founder => "founder",
        }
    }
}

impl Focus {
    /// 全フォーカス（バリデーション用の許可値と同順）
    pub const ALL: [Focus; 3] = [Focus::Ai, Focus::Cloud, Focus::Automation];

    /// 許可値の文字列集合（エラーメッセージ用）
    pub const ALLOWED: &'static [&'static str] = &["ai", "cloud", "automation"];

    /// 文字列からパース（トリム後、大文字小文字は区別しない）
    pub fn parse(value: &str) -> Option<Focus> {
        match value.trim().to_lowercase().as_str() {
            "ai" => Some(Focus::Ai),
            "cloud" => Some(Focus::Cloud),
            "automation" => Some(Focus::Automation),
            _ => None,
        }
    }

    /// 正規化された文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Ai => "ai",
            Focus::Cloud => "cloud",
            Focus::Automation => "automation",
        }
    }
}

/// 定型ピッチ文と静的確信度
///
/// `confidence`は[0, 1]の範囲で組み合わせごとに人手で設定した値。
/// モデル出力ではないため、呼び出し側は固定設定として扱うこと。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchTemplate {
    pub text: &'static str,
    pub confidence: f64,
}

/// (role, focus) に対応するピッチテンプレートを返す
///
/// 列挙型ペアに対する網羅的matchのため全関数。文字列境界での
/// 失敗はRole::parse/Focus::parseのNoneとして上流で処理される。
pub fn template_for(role: Role, focus: Focus) -> PitchTemplate {
    match (role, focus) {
        (Role::Recruiter, Focus::Ai) => PitchTemplate {
            text: "I ship production AI features end to end: model integration, \
                   evaluation harnesses, and the guardrails that keep them safe. \
                   My last three launches went from prototype to paying users in \
                   under a quarter.",
            confidence: 0.92,
        },
        (Role::Recruiter, Focus::Cloud) => PitchTemplate {
            text: "I design and run cloud infrastructure that teams can actually \
                   operate: serverless-first, infrastructure as code, and bills \
                   that finance does not have to ask about.",
            confidence: 0.9,
        },
        (Role::Recruiter, Focus::Automation) => PitchTemplate {
            text: "I automate the work nobody should be doing by hand. CI/CD \
                   pipelines, internal tooling, and workflow bots that have saved \
                   past teams hundreds of hours a quarter.",
            confidence: 0.88,
        },
        (Role::Cto, Focus::Ai) => PitchTemplate {
            text: "I can help your team adopt AI without betting the roadmap on \
                   it: narrow, measurable use cases first, evaluation before \
                   rollout, and a pragmatic view of what current models can and \
                   cannot do.",
            confidence: 0.94,
        },
        (Role::Cto, Focus::Cloud) => PitchTemplate {
            text: "I have led cloud migrations and greenfield serverless builds \
                   with an emphasis on operational simplicity: fewer moving \
                   parts, observable by default, and costed per feature.",
            confidence: 0.91,
        },
        (Role::Cto, Focus::Automation) => PitchTemplate {
            text: "I treat developer experience as an engineering problem. \
                   Build times, release friction, and on-call toil are all \
                   measurable, and I have a track record of driving each of \
                   them down.",
            confidence: 0.89,
        },
        (Role::Product, Focus::Ai) => PitchTemplate {
            text: "I translate AI capability into product outcomes: features \
                   users trust, latency budgets they do not notice, and fallbacks \
                   for the days the model is wrong.",
            confidence: 0.87,
        },
        (Role::Product, Focus::Cloud) => PitchTemplate {
            text: "I build product foundations on managed cloud services so the \
                   team iterates on the product, not the plumbing. Faster \
                   experiments, cheaper failures, quicker wins.",
            confidence: 0.85,
        },
        (Role::Product, Focus::Automation) => PitchTemplate {
            text: "I find the manual steps hiding in your product operations and \
                   remove them. Onboarding flows, support tooling, data hygiene: \
                   automated, audited, and boring in the best way.",
            confidence: 0.84,
        },
        (Role::Founder, Focus::Ai) => PitchTemplate {
            text: "I help early teams ship AI products that survive contact with \
                   real users: scoped MVPs, honest evaluations, and unit \
                   economics that work before the demo magic wears off.",
            confidence: 0.93,
        },
        (Role::Founder, Focus::Cloud) => PitchTemplate {
            text: "I set up cloud foundations sized for a startup: serverless \
                   where it pays off, boring where it matters, and a cost \
                   ceiling you control from day one.",
            confidence: 0.9,
        },
        (Role::Founder, Focus::Automation) => PitchTemplate {
            text: "I build the internal automation that lets a small team punch \
                   above its weight: one-person deploys, self-serve analytics, \
                   and ops that do not grow headcount.",
            confidence: 0.86,
        },
    }
}
