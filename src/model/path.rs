//! 节点路径：路径段模型、展示用路径字符串与 RFC 9535 查询路径

use std::fmt;

use serde::{Deserialize, Serialize};

/// 路径段：数组下标或对象键
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

/// 节点在文档中的位置，空序列表示根
pub type JsonPath = Vec<PathSegment>;

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

/// 方括号内的展示形式：下标为纯数字，键为双引号文本（不转义）
impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Key(key) => write!(f, "\"{}\"", key),
        }
    }
}

/// 将路径格式化为展示字符串，例如 `$["customer"][0]`
///
/// 键中的双引号原样输出，含引号的键会得到有歧义的展示路径。
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        out.push('[');
        out.push_str(&segment.to_string());
        out.push(']');
    }
    out
}

/// 将路径转换为 RFC 9535 规范化路径（`$['customer'][0]`），供 JSONPath 查询使用
pub fn to_query_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            PathSegment::Key(key) => {
                out.push_str("['");
                for ch in key.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        _ => out.push(ch),
                    }
                }
                out.push_str("']");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_root_path() {
        assert_eq!(format_path(&[]), "$");
    }

    #[test]
    fn test_format_mixed_path() {
        let path: JsonPath = vec!["customer".into(), 0.into()];
        assert_eq!(format_path(&path), r#"$["customer"][0]"#);

        let nested: JsonPath = vec!["orders".into(), 2.into(), "items".into(), 10.into()];
        assert_eq!(format_path(&nested), r#"$["orders"][2]["items"][10]"#);
    }

    #[test]
    fn test_format_does_not_escape_quotes() {
        let path: JsonPath = vec!["say \"hi\"".into()];
        assert_eq!(format_path(&path), r#"$["say "hi""]"#);
    }

    #[test]
    fn test_numeric_looking_key_stays_quoted() {
        let path: JsonPath = vec!["0".into()];
        assert_eq!(format_path(&path), r#"$["0"]"#);
    }

    #[test]
    fn test_query_path_escaping() {
        assert_eq!(to_query_path(&[]), "$");
        let path: JsonPath = vec!["key'with'quotes".into(), 1.into(), "back\\slash".into()];
        assert_eq!(to_query_path(&path), r"$['key\'with\'quotes'][1]['back\\slash']");
    }

    #[test]
    fn test_segment_deserialize_untagged() {
        let path: JsonPath = serde_json::from_str(r#"["customer", 0]"#).unwrap();
        assert_eq!(path, vec![PathSegment::Key("customer".into()), PathSegment::Index(0)]);
    }
}
