//! 会话依赖的外部协作者：文档存储与通知接收端

use crate::model::data_core::{AppError, AppState};

/// 文档存储：以序列化文本整体读写
pub trait DocumentStore {
    fn read(&self) -> Result<String, AppError>;
    fn write(&mut self, contents: String) -> Result<(), AppError>;
}

/// 用户可见的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// 内存中的文档存储
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    contents: String,
}

impl MemoryDocumentStore {
    pub fn new(contents: impl Into<String>) -> Self {
        Self { contents: contents.into() }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self) -> Result<String, AppError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: String) -> Result<(), AppError> {
        self.contents = contents;
        Ok(())
    }
}

/// 文件/DOM 支撑的存储：写入时解析、落盘并重建节点树
impl DocumentStore for AppState {
    fn read(&self) -> Result<String, AppError> {
        self.document_text()
    }

    fn write(&mut self, contents: String) -> Result<(), AppError> {
        self.replace_document_text(&contents)
    }
}

/// 按顺序记录所有提示
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl NotificationSink for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
