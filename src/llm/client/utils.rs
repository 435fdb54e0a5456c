use regex::Regex;
use serde_json::{Deserializer, Value};
use std::sync::LazyLock;

use crate::errors::{ResearchError, Result};

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("code fence pattern is valid")
});

/// 从模型输出中截取第一个 JSON 文档
///
/// 模型常会用 markdown 代码块或说明文字包裹结构化结果，说明文字里也可能带有
/// 方括号或花括号。依次从每个 `[`/`{` 处尝试解析单个文档，解析在文档结束处停止；
/// 优先返回对象或由对象组成的数组。返回的内容只做反序列化，绝不会被执行。
pub fn extract_json_payload(content: &str) -> Option<&str> {
    locate_json(content).map(|(payload, _)| payload)
}

/// 解析为任意 JSON 值
pub fn parse_json_value(content: &str) -> Result<Value> {
    locate_json(content)
        .map(|(_, value)| value)
        .ok_or_else(|| ResearchError::validation("response contains no JSON document"))
}

fn locate_json(content: &str) -> Option<(&str, Value)> {
    let body = CODE_FENCE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
        .trim();

    let mut fallback = None;
    for (start, _) in body.match_indices(['[', '{']) {
        let mut documents = Deserializer::from_str(&body[start..]).into_iter::<Value>();
        if let Some(Ok(value)) = documents.next() {
            let payload = &body[start..start + documents.byte_offset()];
            if is_record_shaped(&value) {
                return Some((payload, value));
            }
            // 例如说明文字中的 "[1]"，没有更合适的文档时才使用
            if fallback.is_none() {
                fallback = Some((payload, value));
            }
        }
    }
    fallback
}

fn is_record_shaped(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}
