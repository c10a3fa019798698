//! 影子树（Shadow Tree）：把文档展开为可视化节点列表，每个节点只保存路径与行

use serde_json::Value;

use crate::model::node::{NodeKind, NodeRow, SelectedNode};
use crate::model::path::{format_path, JsonPath, PathSegment};

#[derive(Debug, Clone, PartialEq)]
pub struct JsonTreeNode {
    /// 节点在父级中的键名或下标的字符串形式
    pub name: String,
    /// 节点在文档中的结构路径（用于精确回写）
    pub path: JsonPath,
    /// 节点的可视化字段
    pub rows: Vec<NodeRow>,
    /// 节点深度（用于UI缩进显示）
    pub depth: u32,
}

impl JsonTreeNode {
    pub fn display_path(&self) -> String {
        format_path(&self.path)
    }
}

impl From<&JsonTreeNode> for SelectedNode {
    fn from(node: &JsonTreeNode) -> Self {
        SelectedNode::new(node.rows.clone(), node.path.clone())
    }
}

/// 从根 Value 构建节点列表（先序）
///
/// - 对象：一个节点，每个键一行；容器键记为 `object`/`array` 行（值为子元素数量）并展开为子节点
/// - 数组：自身不成节点，每个元素按所在路径展开；标量元素为单个无键行
/// - 根标量：根路径上的单个无键行
pub fn build_node_tree(root: &Value) -> Vec<JsonTreeNode> {
    fn child_count(v: &Value) -> usize {
        match v {
            Value::Object(m) => m.len(),
            Value::Array(a) => a.len(),
            _ => 0,
        }
    }
    fn object_rows(map: &serde_json::Map<String, Value>) -> Vec<NodeRow> {
        map.iter()
            .map(|(k, v)| {
                let kind = NodeKind::of(v);
                if kind.is_container() {
                    NodeRow { key: Some(k.clone()), value: Value::from(child_count(v)), kind }
                } else {
                    NodeRow::keyed(k.clone(), v.clone())
                }
            })
            .collect()
    }
    fn walk(out: &mut Vec<JsonTreeNode>, v: &Value, path: &mut JsonPath, name: &str, depth: u32) {
        match v {
            Value::Object(map) => {
                out.push(JsonTreeNode {
                    name: name.to_string(),
                    path: path.clone(),
                    rows: object_rows(map),
                    depth,
                });
                for (k, child) in map {
                    if NodeKind::of(child).is_container() {
                        path.push(PathSegment::Key(k.clone()));
                        walk(out, child, path, k, depth + 1);
                        path.pop();
                    }
                }
            }
            Value::Array(arr) => {
                for (idx, child) in arr.iter().enumerate() {
                    path.push(PathSegment::Index(idx));
                    walk(out, child, path, &format!("[{}]", idx), depth + 1);
                    path.pop();
                }
            }
            scalar => out.push(JsonTreeNode {
                name: name.to_string(),
                path: path.clone(),
                rows: vec![NodeRow::bare(scalar.clone())],
                depth,
            }),
        }
    }

    let mut out = Vec::new();
    walk(&mut out, root, &mut Vec::new(), "$", 0);
    out
}

/// 在节点列表中按路径查找节点
pub fn find_node<'a>(nodes: &'a [JsonTreeNode], path: &[PathSegment]) -> Option<&'a JsonTreeNode> {
    nodes.iter().find(|n| n.path == path)
}
