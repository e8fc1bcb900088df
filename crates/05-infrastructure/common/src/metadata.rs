//! 元数据定义
//!
//! 提供组件类型的元数据信息以及逻辑名称解析

use std::any::TypeId;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完全限定类型名称
    pub type_name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 判断类型是否位于指定的模块路径之下
    ///
    /// 只在路径段边界上匹配：`app::orders` 不包含 `app::orders_archive`。
    pub fn is_under(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches("::");
        if prefix.is_empty() {
            return true;
        }
        self.type_name.strip_prefix(prefix).is_some_and(|rest| {
            rest.is_empty() || rest.starts_with("::") || rest.starts_with('<')
        })
    }
}

/// 把空白字符串视为未声明
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 解析组件逻辑名称
///
/// 显式声明且非空白时使用声明值，否则使用类型的完全限定名称。
pub fn resolve_bean_name(explicit: Option<&str>, type_info: &TypeInfo) -> String {
    non_blank(explicit).map_or_else(|| type_info.type_name.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sample {
        pub struct OrderService;
        pub struct Wrapper<T>(pub T);
    }

    mod sample_archive {
        pub struct ArchivedOrder;
    }

    #[test]
    fn test_type_info_names() {
        let info = TypeInfo::of::<sample::OrderService>();
        assert!(info.type_name.ends_with("sample::OrderService"));
        assert_eq!(info, TypeInfo::of::<sample::OrderService>());
        assert_ne!(info.id, TypeInfo::of::<sample::Wrapper<u8>>().id);
    }

    #[test]
    fn test_is_under_prefix() {
        let info = TypeInfo::of::<sample::OrderService>();
        assert!(info.is_under(""));
        assert!(info.is_under("infrastructure_common::metadata"));
        assert!(!info.is_under("other_crate"));
    }

    #[test]
    fn test_is_under_respects_module_boundary() {
        let base = module_path!();
        let sample = format!("{base}::sample");
        let archived = TypeInfo::of::<sample_archive::ArchivedOrder>();
        assert!(!archived.is_under(&sample));
        assert!(archived.is_under(&format!("{base}::sample_archive")));

        let info = TypeInfo::of::<sample::OrderService>();
        assert!(info.is_under(&format!("{sample}::")));
        assert!(info.is_under(info.type_name));
        assert!(!info.is_under(&format!("{sample}::Order")));

        let generic = TypeInfo::of::<sample::Wrapper<u8>>();
        assert!(generic.is_under(&format!("{sample}::Wrapper")));
    }

    #[test]
    fn test_resolve_bean_name() {
        let info = TypeInfo::of::<sample::OrderService>();
        assert_eq!(resolve_bean_name(Some("orders"), &info), "orders");
        assert_eq!(resolve_bean_name(Some("   "), &info), info.type_name);
        assert_eq!(resolve_bean_name(None, &info), info.type_name);
    }
}
