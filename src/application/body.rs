// リクエストボディのJSONパース
//
// パース失敗はハンドラー側でINTERNAL_ERROR（500）に変換される。
// クライアント起因とサーバー起因の区別はここでは付けない。

use lambda_http::{Body, Request};
use serde_json::Value;

/// リクエストボディをJSONとしてパースする
///
/// 空ボディ・非JSONボディは`None`を返す。パニックはしない。
pub fn parse_json(request: &Request) -> Option<Value> {
    match request.body() {
        Body::Text(text) => serde_json::from_str(text).ok(),
        Body::Binary(bytes) => serde_json::from_slice(bytes).ok(),
        _ => None,
    }
}
