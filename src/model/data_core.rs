//! AppState：文档存储、节点树与按路径读取；EditError：编辑会话的错误分类

use std::path::{Path, PathBuf};

use jsonpath_rust::JsonPath; // 提供 query 扩展
use serde_json::Value;
use thiserror::Error;

use crate::model::mutate::TraversalError;
use crate::model::node::SelectedNode;
use crate::model::path::{to_query_path, PathSegment};
use crate::model::shadow_tree::{build_node_tree, find_node, JsonTreeNode};
use crate::utils::fs::{read_json_file, write_text_atomic};

#[derive(Debug, Default)]
pub struct AppState {
    pub source_path: Option<PathBuf>,
    pub dom: Option<Value>,
    pub tree_flat: Vec<JsonTreeNode>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSONPath错误: {0}")]
    JsonPath(String),
    #[error("状态错误: {0}")]
    State(String),
}

/// 保存编辑时可能出现的失败，均在会话边界内处理
#[derive(Error, Debug)]
pub enum EditError {
    /// 编辑文本不是合法 JSON
    #[error("JSON格式无效: {0}")]
    Parse(#[source] serde_json::Error),
    /// 选中节点的路径在当前文档中已无法解析
    #[error("节点路径已失效: {0}")]
    Traversal(#[from] TraversalError),
    #[error("当前文档无法解析: {0}")]
    Document(#[source] serde_json::Error),
    #[error("文档读取失败: {0}")]
    Read(#[source] AppError),
    #[error("文档写入失败: {0}")]
    Store(#[from] AppError),
}

impl AppState {
    /// 加载JSON文件并构建节点树
    pub fn load_file(&mut self, p: &Path) -> Result<(), AppError> {
        let dom = read_json_file(p)?;
        self.tree_flat = build_node_tree(&dom);
        self.source_path = Some(p.to_path_buf());
        self.dom = Some(dom);
        Ok(())
    }

    /// 从文本加载（不关联文件）
    pub fn load_str(&mut self, text: &str) -> Result<(), AppError> {
        let dom: Value = serde_json::from_str(text)?;
        self.tree_flat = build_node_tree(&dom);
        self.source_path = None;
        self.dom = Some(dom);
        Ok(())
    }

    pub fn document(&self) -> Result<&Value, AppError> {
        self.dom
            .as_ref()
            .ok_or_else(|| AppError::State("DOM尚未加载".into()))
    }

    /// 当前文档的格式化文本
    pub fn document_text(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self.document()?)?)
    }

    /// 用新文本整体替换文档：先解析，再落盘（若有源文件），最后替换内存中的DOM
    pub fn replace_document_text(&mut self, text: &str) -> Result<(), AppError> {
        let dom: Value = serde_json::from_str(text)?;
        if let Some(p) = &self.source_path {
            write_text_atomic(p, text)?;
            tracing::info!("文档已写回: {}", p.display());
        }
        // 变更后重建节点树（后续可优化为局部刷新）
        self.tree_flat = build_node_tree(&dom);
        self.dom = Some(dom);
        Ok(())
    }

    /// 按结构路径提取节点完整子树的 pretty 字符串
    pub fn extract_subtree_pretty(&self, path: &[PathSegment]) -> Result<String, AppError> {
        let dom = self.document()?;
        let query = to_query_path(path);
        let hits: Vec<&Value> = dom
            .query(&query)
            .map_err(|e| AppError::JsonPath(e.to_string()))?;
        let first = hits
            .into_iter()
            .next()
            .ok_or_else(|| AppError::JsonPath(format!("未匹配到任何节点: {}", query)))?;
        Ok(serde_json::to_string_pretty(first)?)
    }

    /// 按路径取节点的选中快照
    pub fn node_at(&self, path: &[PathSegment]) -> Option<SelectedNode> {
        find_node(&self.tree_flat, path).map(SelectedNode::from)
    }
}
