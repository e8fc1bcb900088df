//! 组件生命周期管理

use crate::errors::BoxError;

/// 最低优先级，未声明顺序的初始化器最后执行
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// 最高优先级
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// 可初始化 trait
///
/// 实现者参与启动阶段的有序初始化，每个进程（每个编排器）只会被调用一次。
pub trait Initializable: Send + Sync + 'static {
    /// 执行初始化
    fn init(&self) -> Result<(), BoxError>;
}

/// 启动编排状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    /// 未启动
    NotStarted = 0,
    /// 执行中
    Running = 1,
    /// 已完成
    Done = 2,
}

impl LifecycleState {
    /// 从原子存储的数值还原
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NotStarted,
            1 => Self::Running,
            _ => Self::Done,
        }
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// 解析初始化顺序，未声明时返回 [`LOWEST_PRECEDENCE`]
pub fn resolve_order(declared: Option<i32>) -> i32 {
    declared.unwrap_or(LOWEST_PRECEDENCE)
}
