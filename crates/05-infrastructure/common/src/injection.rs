//! 注入点定义
//!
//! 组件通过 [`Injectable`] 声明自身的注入点，容器在装配阶段逐个填充。
//! 注入点有两种形式：
//!
//! - 字段注入：类型为 [`Autowired<T>`] 的字段
//! - 属性注入：通过 [`Setter`] 包装的设置函数
//!
//! 注入在容器持有实例之后进行，因此所有注入点都通过 `&self` 写入。

use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 可注入组件 trait
///
/// 返回实例上所有需要装配的注入点。没有依赖的组件直接使用默认实现。
pub trait Injectable: Send + Sync + 'static {
    /// 列出注入点
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        Vec::new()
    }
}

/// 注入目标
///
/// 容器只通过该 trait 与注入点交互：查询声明类型，并写入解析出的值。
/// 写入值的实际类型为 `Arc<T>`，装箱为 `Box<dyn Any>` 传递。
pub trait InjectSlot {
    /// 声明类型的 TypeId（`T`，而不是 `Arc<T>`）
    fn target_type(&self) -> TypeId;

    /// 声明类型名称
    fn target_type_name(&self) -> &'static str;

    /// 写入解析出的值，类型不符或已写入时返回 false
    fn accept(&self, value: Box<dyn Any + Send + Sync>) -> bool;
}

/// 注入点种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionKind {
    /// 字段
    Field,
    /// 属性（设置函数）
    Property,
}

/// 注入点
pub struct InjectionPoint<'a> {
    member: &'static str,
    qualifier: Option<&'static str>,
    kind: InjectionKind,
    slot: Box<dyn InjectSlot + 'a>,
}

impl<'a> InjectionPoint<'a> {
    /// 字段注入点
    pub fn field<T>(member: &'static str, slot: &'a Autowired<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            member,
            qualifier: None,
            kind: InjectionKind::Field,
            slot: Box::new(slot),
        }
    }

    /// 属性注入点
    pub fn property<T>(member: &'static str, setter: Setter<'a, T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            member,
            qualifier: None,
            kind: InjectionKind::Property,
            slot: Box::new(setter),
        }
    }

    /// 指定按名称注入，空白名称视为未指定
    pub fn named(mut self, qualifier: &'static str) -> Self {
        self.qualifier = crate::metadata::non_blank(Some(qualifier));
        self
    }

    /// 成员名称
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// 显式指定的组件名称
    pub fn qualifier(&self) -> Option<&'static str> {
        self.qualifier
    }

    /// 注入点种类
    pub fn kind(&self) -> InjectionKind {
        self.kind
    }

    /// 声明类型
    pub fn target_type(&self) -> TypeId {
        self.slot.target_type()
    }

    /// 声明类型名称
    pub fn target_type_name(&self) -> &'static str {
        self.slot.target_type_name()
    }

    /// 写入解析出的值
    pub fn accept(&self, value: Box<dyn Any + Send + Sync>) -> bool {
        self.slot.accept(value)
    }
}

impl fmt::Debug for InjectionPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("member", &self.member)
            .field("qualifier", &self.qualifier)
            .field("kind", &self.kind)
            .field("target", &self.target_type_name())
            .finish()
    }
}

/// 自动装配字段
///
/// 只能写入一次；未解析时保持为空。
pub struct Autowired<T: ?Sized> {
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Autowired<T> {
    /// 创建空的装配字段
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// 获取已装配的组件
    pub fn get(&self) -> Option<&Arc<T>> {
        self.cell.get()
    }

    /// 获取已装配组件的克隆引用
    pub fn cloned(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// 是否已装配
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized> Default for Autowired<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("target", &std::any::type_name::<T>())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl<T> InjectSlot for &Autowired<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn target_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn target_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn accept(&self, value: Box<dyn Any + Send + Sync>) -> bool {
        match value.downcast::<Arc<T>>() {
            Ok(bean) => self.cell.set(*bean).is_ok(),
            Err(_) => false,
        }
    }
}

/// 属性设置函数
pub struct Setter<'a, T: ?Sized> {
    apply: Box<dyn Fn(Arc<T>) + Send + Sync + 'a>,
}

impl<'a, T: ?Sized> Setter<'a, T> {
    /// 包装设置函数
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(Arc<T>) + Send + Sync + 'a,
    {
        Self {
            apply: Box::new(apply),
        }
    }
}

impl<T> InjectSlot for Setter<'_, T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn target_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn target_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn accept(&self, value: Box<dyn Any + Send + Sync>) -> bool {
        match value.downcast::<Arc<T>>() {
            Ok(bean) => {
                (self.apply)(*bean);
                true
            }
            Err(_) => false,
        }
    }
}
