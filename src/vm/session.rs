//! 节点编辑会话：查看/编辑两态状态机，负责解析、回写与提示

use serde_json::Value;

use crate::model::data_core::EditError;
use crate::model::mutate::update_at_path;
use crate::model::node::{normalize_node_rows, SelectedNode};
use crate::model::path::format_path;
use crate::vm::bridge::{STATUS_ERROR_PREFIX, STATUS_NODE_UPDATED};
use crate::vm::context::{DocumentStore, Notice, NotificationSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// 一次保存的结果
#[derive(Debug)]
pub enum SaveOutcome {
    /// 已提交，携带新的完整文档
    Committed(Value),
    /// 失败，会话仍处于编辑态
    Rejected(EditError),
    /// 不在编辑态，未做任何事
    Idle,
}

impl SaveOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SaveOutcome::Committed(_))
    }
}

#[derive(Debug, Default)]
pub struct EditSession {
    opened: bool,
    mode: EditMode,
    selected: Option<SelectedNode>,
    edited_text: String,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&SelectedNode> {
        self.selected.as_ref()
    }

    /// 打开编辑面板：回到查看态并按当前选中节点重置文本
    pub fn open(&mut self) {
        self.opened = true;
        self.reset();
    }

    pub fn close(&mut self) {
        self.opened = false;
        self.reset();
    }

    /// 选中新节点；编辑中的未保存文本随之丢弃
    pub fn select(&mut self, node: Option<SelectedNode>) {
        if self.mode == EditMode::Editing {
            tracing::info!("重新选择节点，放弃未保存的编辑");
        }
        self.selected = node;
        self.reset();
    }

    /// 当前节点的规范化内容（未选中时为 `{}`）
    pub fn content(&self) -> String {
        self.selected
            .as_ref()
            .map(|node| normalize_node_rows(&node.rows))
            .unwrap_or_else(|| normalize_node_rows(&[]))
    }

    /// 当前节点的展示路径（未选中时为 `$`）
    pub fn path_display(&self) -> String {
        self.selected
            .as_ref()
            .map(|node| format_path(&node.path))
            .unwrap_or_else(|| format_path(&[]))
    }

    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    /// 进入编辑态，以规范化内容作为初始文本；未选中节点时不进入
    pub fn begin_edit(&mut self) -> bool {
        if self.selected.is_none() {
            tracing::warn!("未选中节点，无法进入编辑");
            return false;
        }
        if self.mode == EditMode::Viewing {
            self.edited_text = self.content();
            self.mode = EditMode::Editing;
            tracing::debug!("进入编辑: {}", self.path_display());
        }
        true
    }

    /// 更新编辑文本，仅在编辑态生效
    pub fn set_edited_text(&mut self, text: impl Into<String>) -> bool {
        if self.mode != EditMode::Editing {
            tracing::warn!("非编辑状态，忽略文本修改");
            return false;
        }
        self.edited_text = text.into();
        true
    }

    /// 取消编辑：丢弃文本（包括保存失败后留下的文本），回到查看态
    pub fn cancel(&mut self) {
        tracing::debug!("取消编辑: {}", self.path_display());
        self.reset();
    }

    /// 保存：解析编辑文本，读取当前文档，按路径回写并整体替换
    ///
    /// 任何失败都只产生失败提示，文档与编辑文本保持原样，会话停留在编辑态。
    pub fn save<S, N>(&mut self, store: &mut S, sink: &mut N) -> SaveOutcome
    where
        S: DocumentStore + ?Sized,
        N: NotificationSink + ?Sized,
    {
        if self.mode != EditMode::Editing {
            return SaveOutcome::Idle;
        }

        match self.commit(store) {
            Ok(updated) => {
                tracing::info!("节点已更新: {}", self.path_display());
                sink.notify(Notice::Success(STATUS_NODE_UPDATED.to_string()));
                self.mode = EditMode::Viewing;
                self.opened = false;
                SaveOutcome::Committed(updated)
            }
            Err(e) => {
                tracing::warn!("节点保存失败: {}: {}", self.path_display(), e);
                sink.notify(Notice::Failure(format!("{}{}", STATUS_ERROR_PREFIX, e)));
                SaveOutcome::Rejected(e)
            }
        }
    }

    fn commit<S: DocumentStore + ?Sized>(&self, store: &mut S) -> Result<Value, EditError> {
        let path = self.selected.as_ref().map(|node| node.path.as_slice()).unwrap_or_default();

        let new_value: Value = serde_json::from_str(&self.edited_text).map_err(EditError::Parse)?;
        let contents = store.read().map_err(EditError::Read)?;
        let current: Value = serde_json::from_str(&contents).map_err(EditError::Document)?;
        let updated = update_at_path(&current, path, new_value)?;

        store.write(format!("{:#}", updated))?;
        Ok(updated)
    }

    fn reset(&mut self) {
        self.mode = EditMode::Viewing;
        self.edited_text = self.content();
    }
}
