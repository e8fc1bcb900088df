//! 初始化器与容器感知注册宏实现

use crate::utils::registration_fn_name;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Expr, ItemStruct,
    Meta, Result, Token,
};

/// 初始化器宏参数
#[derive(Default)]
pub struct InitializerArgs {
    /// 执行顺序，支持负数和常量表达式
    pub order: Option<Expr>,
}

impl Parse for InitializerArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = InitializerArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("order") => {
                    args.order = Some(nv.value);
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "#[initializer] 只支持 order 参数"))
                }
            }
        }

        Ok(args)
    }
}

fn plain_struct(input: TokenStream) -> Result<ItemStruct> {
    let item: ItemStruct = syn::parse(input)?;
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&item.generics, "不支持泛型结构体"));
    }
    Ok(item)
}

/// 实现 #[initializer] 宏
pub fn initializer_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let initializer_args = if args.is_empty() {
        InitializerArgs::default()
    } else {
        match syn::parse::<InitializerArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = match plain_struct(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    let struct_name = &input_struct.ident;
    let registration_fn = registration_fn_name("initializer", struct_name);
    let order = initializer_args
        .order
        .as_ref()
        .map(|order| quote! { .with_order(#order) });

    let expanded = quote! {
        #input_struct

        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::register_initializer(
                ::di_abstractions::InitializerDefinition::of_default::<#struct_name>() #order
            );
        }
    };

    TokenStream::from(expanded)
}

/// 实现 #[container_aware] 宏
pub fn container_aware_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        let args = proc_macro2::TokenStream::from(args);
        return syn::Error::new_spanned(args, "#[container_aware] 不接受参数")
            .to_compile_error()
            .into();
    }

    let input_struct = match plain_struct(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };
    let struct_name = &input_struct.ident;
    let registration_fn = registration_fn_name("aware", struct_name);

    let expanded = quote! {
        #input_struct

        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::register_aware(
                ::di_abstractions::AwareDefinition::of_default::<#struct_name>()
            );
        }
    };

    TokenStream::from(expanded)
}
