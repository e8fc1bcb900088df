//! 组件注册宏实现

use crate::utils::{expect_str_lit, non_blank_str, registration_fn_name};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, ItemStruct,
    Meta, Result, Token, Type,
};

/// 组件宏参数
#[derive(Default)]
pub struct BeanArgs {
    /// 显式逻辑名称
    pub name: Option<String>,
    /// 额外提供的类型视图
    pub provides: Vec<Type>,
    /// 自定义工厂函数
    pub factory: Option<Expr>,
}

impl Parse for BeanArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = BeanArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = non_blank_str(&expect_str_lit(&nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("factory") => {
                    args.factory = Some(nv.value);
                }
                Meta::List(list) if list.path.is_ident("provides") => {
                    let types =
                        list.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
                    args.provides.extend(types);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "不支持的参数，可用参数: name, provides(..), factory",
                    ))
                }
            }
        }

        Ok(args)
    }
}

/// 实现 #[bean] 宏
pub fn bean_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let bean_args = if args.is_empty() {
        BeanArgs::default()
    } else {
        match syn::parse::<BeanArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    if !input_struct.generics.params.is_empty() {
        return syn::Error::new_spanned(&input_struct.generics, "#[bean] 不支持泛型结构体")
            .to_compile_error()
            .into();
    }

    let struct_name = &input_struct.ident;
    let registration_fn = registration_fn_name("bean", struct_name);

    let definition = match &bean_args.factory {
        Some(factory) => quote! {
            ::di_abstractions::BeanDefinition::new::<#struct_name, _>(#factory)
        },
        None => quote! {
            ::di_abstractions::BeanDefinition::of_default::<#struct_name>()
        },
    };

    let named = bean_args.name.as_ref().map(|name| quote! { .named(#name) });

    let provides = bean_args.provides.iter().map(|ty| {
        quote! {
            .provides(|bean: ::std::sync::Arc<#struct_name>| bean as ::std::sync::Arc<#ty>)
        }
    });

    let expanded = quote! {
        #input_struct

        // 使用 ctor 在程序启动时登记组件候选
        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::register_bean(
                #definition
                    #named
                    #(#provides)*
            );
        }
    };

    TokenStream::from(expanded)
}
