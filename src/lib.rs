//! JSON 节点编辑库
//!
//! 提供节点行规范化、路径格式化与按路径回写功能，
//! 以及连接文档存储与提示接收端的编辑会话

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::data_core::{AppError, AppState, EditError};
pub use model::mutate::{update_at_path, value_at_path, TraversalError};
pub use model::node::{normalize_node_rows, NodeKind, NodeRow, SelectedNode};
pub use model::path::{format_path, JsonPath, PathSegment};
pub use model::shadow_tree::{build_node_tree, JsonTreeNode};
pub use vm::context::{DocumentStore, MemoryDocumentStore, Notice, NoticeLog, NotificationSink};
pub use vm::session::{EditMode, EditSession, SaveOutcome};
