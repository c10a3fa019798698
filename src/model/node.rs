//! 节点行模型与规范化：把一个节点的行转换为可展示、可再编辑的文本

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::path::JsonPath;

/// 空节点的规范化结果
pub const EMPTY_OBJECT_TEXT: &str = "{}";

/// 行的类型标签（与 UI 展示解耦）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    #[serde(rename = "boolean")]
    Bool,
    Null,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    /// 容器行在可视化中对应独立的子节点，不参与行内编辑
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Bool => "boolean",
            NodeKind::Null => "null",
        }
    }
}

/// 节点中的一行（一个可视化字段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl NodeRow {
    /// 带键的行，类型由值推断
    pub fn keyed(key: impl Into<String>, value: Value) -> Self {
        let kind = NodeKind::of(&value);
        Self { key: Some(key.into()), value, kind }
    }

    /// 无键的行（数组元素或根标量）
    pub fn bare(value: Value) -> Self {
        let kind = NodeKind::of(&value);
        Self { key: None, value, kind }
    }

    /// 有效键：空字符串视为无键
    pub fn field_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// 当前选中的节点：行快照与其在文档中的路径
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectedNode {
    pub rows: Vec<NodeRow>,
    pub path: JsonPath,
}

impl SelectedNode {
    pub fn new(rows: Vec<NodeRow>, path: JsonPath) -> Self {
        Self { rows, path }
    }

    pub fn normalized(&self) -> String {
        normalize_node_rows(&self.rows)
    }
}

/// 将节点的行规范化为可编辑文本
///
/// - 无行：`{}`
/// - 仅一行且无键：该值的纯文本形式（字符串不加引号）
/// - 其他：以键为字段、跳过容器行与无键行，按行顺序输出格式化 JSON
pub fn normalize_node_rows(rows: &[NodeRow]) -> String {
    match rows {
        [] => EMPTY_OBJECT_TEXT.to_string(),
        [only] if only.field_key().is_none() => plain_text(&only.value),
        _ => {
            let mut fields = Map::new();
            for row in rows.iter().filter(|row| !row.kind.is_container()) {
                if let Some(key) = row.field_key() {
                    fields.insert(key.to_string(), row.value.clone());
                }
            }
            format!("{:#}", Value::Object(fields))
        }
    }
}

/// 值的纯文本形式；容器按紧凑 JSON 输出
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
