//! LMS 响应体解析辅助函数

use serde_json::Value;

/// LMS 常用的消息字段，按优先级排列
const MESSAGE_KEYS: [&str; 5] = ["value", "detail", "error", "message", "status"];

/// 把响应体解析为 JSON，非 JSON 时返回 None
pub fn parse_json(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

/// 从 JSON 响应中提取 LMS 给出的说明文字
pub fn lms_message(json: &Value) -> Option<String> {
    MESSAGE_KEYS.iter().find_map(|key| match json.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(Value::as_str)
            .map(|text| text.trim().to_string()),
        _ => None,
    })
}

/// 检查响应是否明确表示失败（`"success": false`）
pub fn is_explicit_failure(json: &Value) -> bool {
    json.get("success").and_then(Value::as_bool) == Some(false)
}

/// 截断长文本用于展示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
