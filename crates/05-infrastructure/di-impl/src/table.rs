//! 组件表
//!
//! 按注册顺序保存组件条目，并按逻辑名称建立索引。装配完成后只读。

use di_abstractions::{BeanDefinition, BeanLookup, BeanView, SharedBean};
use std::any::TypeId;
use std::collections::HashMap;

/// 组件条目
pub struct BeanEntry {
    name: String,
    definition: BeanDefinition,
    instance: SharedBean,
}

impl BeanEntry {
    pub(crate) fn new(name: String, definition: BeanDefinition, instance: SharedBean) -> Self {
        Self {
            name,
            definition,
            instance,
        }
    }

    /// 逻辑名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 组件定义
    pub fn definition(&self) -> &BeanDefinition {
        &self.definition
    }

    /// 单例实例
    pub fn instance(&self) -> &SharedBean {
        &self.instance
    }

    /// 把实例转换为指定类型的视图
    pub fn view(&self, target: TypeId) -> Option<BeanView> {
        self.definition
            .views()
            .iter()
            .find(|view| view.target().id == target)
            .and_then(|view| view.cast(&self.instance))
    }
}

impl std::fmt::Debug for BeanEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanEntry")
            .field("name", &self.name)
            .field("type_name", &self.definition.type_info().type_name)
            .finish()
    }
}

/// 组件表
#[derive(Debug, Default)]
pub struct BeanTable {
    entries: Vec<BeanEntry>,
    index: HashMap<String, usize>,
}

impl BeanTable {
    /// 插入条目，名称已被占用时原样返回
    pub(crate) fn insert(&mut self, entry: BeanEntry) -> Result<(), BeanEntry> {
        if self.index.contains_key(&entry.name) {
            return Err(entry);
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// 按名称获取条目
    pub fn get(&self, name: &str) -> Option<&BeanEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// 是否包含指定名称
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 按注册顺序遍历条目
    pub fn entries(&self) -> &[BeanEntry] {
        &self.entries
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按注册顺序列出名称
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }
}

impl BeanLookup for BeanTable {
    fn view_by_name(&self, name: &str, target: TypeId) -> Option<BeanView> {
        self.get(name)?.view(target)
    }

    fn first_view_of(&self, target: TypeId) -> Option<BeanView> {
        self.entries.iter().find_map(|entry| entry.view(target))
    }
}
