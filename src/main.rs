//! 程序入口：初始化日志、加载 JSON 文件，并以行命令驱动节点编辑会话

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use json_node_edit::vm::bridge::*;
use json_node_edit::{AppState, EditSession, Notice, NotificationSink, SaveOutcome, SelectedNode};

const HELP: &str = "命令: nodes | select <序号> | show | path | edit | text <JSON> | save | cancel | quit";

/// 提示输出到标准错误
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Success(msg) => eprintln!("[成功] {}", msg),
            Notice::Failure(msg) => eprintln!("[失败] {}", msg),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Nodes,
    Select(usize),
    Show,
    Path,
    Edit,
    Text(&'a str),
    Save,
    Cancel,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Result<Command<'_>, String> {
    let line = line.trim();
    let (name, rest) = line.split_once(' ').map_or((line, ""), |(n, r)| (n, r.trim()));
    match name {
        "nodes" => Ok(Command::Nodes),
        "select" => rest
            .parse()
            .map(Command::Select)
            .map_err(|_| format!("无效的节点序号: {:?}", rest)),
        "show" => Ok(Command::Show),
        "path" => Ok(Command::Path),
        "edit" => Ok(Command::Edit),
        "text" => Ok(Command::Text(rest)),
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "quit" | "exit" => Ok(Command::Quit),
        "help" | "" => Ok(Command::Help),
        other => Err(format!("未知命令: {}", other)),
    }
}

/// 宿主：持有文档状态与编辑会话
struct Host {
    state: AppState,
    session: EditSession,
    sink: ConsoleSink,
}

impl Host {
    /// 执行一条命令；返回 false 表示退出
    fn handle(&mut self, command: Command<'_>, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Nodes => {
                for (idx, node) in self.state.tree_flat.iter().enumerate() {
                    writeln!(out, "{:>4}  {}{}", idx, "  ".repeat(node.depth as usize), node.display_path())?;
                }
            }
            Command::Select(idx) => match self.state.tree_flat.get(idx) {
                Some(node) => {
                    self.session.select(Some(SelectedNode::from(node)));
                    self.session.open();
                    writeln!(out, "{}", self.session.path_display())?;
                    writeln!(out, "{}", self.session.content())?;
                }
                None => writeln!(out, "{}没有序号为 {} 的节点", STATUS_ERROR_PREFIX, idx)?,
            },
            Command::Show => match self.session.selected() {
                Some(node) => match self.state.extract_subtree_pretty(&node.path) {
                    Ok(pretty) => writeln!(out, "{}", pretty)?,
                    Err(e) => {
                        tracing::error!("节点提取失败: {}", e);
                        writeln!(out, "{}{}", STATUS_ERROR_PREFIX, e)?;
                    }
                },
                None => writeln!(out, "{}", STATUS_NO_SELECTION)?,
            },
            Command::Path => writeln!(out, "{}", self.session.path_display())?,
            Command::Edit => {
                if self.session.begin_edit() {
                    writeln!(out, "{}", self.session.edited_text())?;
                } else {
                    writeln!(out, "{}", STATUS_NO_SELECTION)?;
                }
            }
            Command::Text(text) => {
                if !self.session.set_edited_text(text) {
                    writeln!(out, "{}请先执行 edit", STATUS_ERROR_PREFIX)?;
                }
            }
            Command::Save => {
                let path = self.session.selected().map(|node| node.path.clone());
                if let SaveOutcome::Committed(_) = self.session.save(&mut self.state, &mut self.sink) {
                    // 节点树已重建，按原路径重新取选中快照
                    let refreshed = path.and_then(|p| self.state.node_at(&p));
                    self.session.select(refreshed);
                    if self.session.selected().is_some() {
                        writeln!(out, "{}", self.session.content())?;
                    } else {
                        writeln!(out, "{}", STATUS_NO_SELECTION)?;
                    }
                }
            }
            Command::Cancel => {
                self.session.cancel();
                writeln!(out, "{}", self.session.edited_text())?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

/// JSON 节点编辑宿主：加载文件，从标准输入读取命令驱动编辑会话
#[derive(Parser, Debug)]
#[command(name = "json_node_edit", version)]
struct Args {
    /// 要编辑的 JSON 文件
    file: PathBuf,

    /// 日志级别（error|warn|info|debug|trace）
    #[arg(long, env = LOG_LEVEL_ENV, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志输出（输出到标准错误，避免与命令结果混在一起）
    let _ = SubscriberBuilder::default()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .try_init();

    let path = args.file;
    let mut state = AppState::default();
    state
        .load_file(&path)
        .with_context(|| format!("无法加载文件: {}", path.display()))?;
    tracing::info!("{}: {}，{} 个节点", STATUS_LOADED, path.display(), state.tree_flat.len());

    let mut host = Host { state, session: EditSession::new(), sink: ConsoleSink };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} | {}", STATUS_READY, HELP)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("读取标准输入失败")?;
        let keep_going = match parse_command(&line) {
            Ok(command) => host.handle(command, &mut out)?,
            Err(msg) => {
                writeln!(out, "{}{}", STATUS_ERROR_PREFIX, msg)?;
                true
            }
        };
        out.flush()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}
