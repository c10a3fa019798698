//! VM桥接层常量：会话与宿主共用的状态文案
//!
//! 具体的宿主交互在 main.rs 中实现，这里只提供公共常量

// === 常量定义（消除魔法值） ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_LOADED: &str = "文件加载完成";
pub const STATUS_NODE_UPDATED: &str = "节点更新成功";
pub const STATUS_NO_SELECTION: &str = "尚未选中节点";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// 宿主读取日志级别的环境变量
pub const LOG_LEVEL_ENV: &str = "NODE_EDIT_LOG";
