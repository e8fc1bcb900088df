//! 宏工具函数

use proc_macro2::Span;
use syn::{Expr, Ident, Lit, LitStr, Result};

/// 生成注册函数名
pub fn registration_fn_name(kind: &str, ident: &Ident) -> Ident {
    Ident::new(
        &format!("__register_{}_{}", kind, to_snake_case(&ident.to_string())),
        Span::call_site(),
    )
}

/// 解析字符串字面量参数，空白字符串视为未设置
pub fn non_blank_str(lit: &LitStr) -> Option<String> {
    let value = lit.value();
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 要求表达式为字符串字面量
pub fn expect_str_lit(expr: &Expr) -> Result<LitStr> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.clone()),
            other => Err(syn::Error::new_spanned(other, "期望字符串字面量")),
        },
        other => Err(syn::Error::new_spanned(other, "期望字符串字面量")),
    }
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 前一个字符为小写，或下一个字符为小写时分词
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("GreetingService"), "greeting_service");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_snake_case("clock"), "clock");
    }

    #[test]
    fn test_registration_fn_name() {
        let ident = Ident::new("UserRepository", Span::call_site());
        assert_eq!(
            registration_fn_name("bean", &ident).to_string(),
            "__register_bean_user_repository"
        );
    }

    #[test]
    fn test_non_blank_str() {
        let blank = LitStr::new("  ", Span::call_site());
        let named = LitStr::new(" mailer ", Span::call_site());
        assert_eq!(non_blank_str(&blank), None);
        assert_eq!(non_blank_str(&named), Some("mailer".to_string()));
    }
}
