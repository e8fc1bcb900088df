//! 注入点派生宏实现
//!
//! 字段上的 `#[autowired]` 生成字段注入点；结构体上的
//! `#[autowired(setter = method, target = Type)]` 生成属性注入点。

use crate::utils::{expect_str_lit, non_blank_str};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Ident, Result, Type};

/// 字段注入参数
#[derive(Default)]
struct FieldArgs {
    name: Option<String>,
}

/// 属性注入参数
struct PropertyArgs {
    setter: Ident,
    target: Type,
    name: Option<String>,
}

fn parse_field_args(attr: &Attribute) -> Result<FieldArgs> {
    let mut args = FieldArgs::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(args);
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let value: Expr = meta.value()?.parse()?;
            args.name = non_blank_str(&expect_str_lit(&value)?);
            Ok(())
        } else {
            Err(meta.error("字段上的 #[autowired] 只支持 name 参数"))
        }
    })?;
    Ok(args)
}

fn parse_property_args(attr: &Attribute) -> Result<PropertyArgs> {
    let mut setter = None;
    let mut target = None;
    let mut name = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("setter") {
            setter = Some(meta.value()?.parse::<Ident>()?);
        } else if meta.path.is_ident("target") {
            target = Some(meta.value()?.parse::<Type>()?);
        } else if meta.path.is_ident("name") {
            let value: Expr = meta.value()?.parse()?;
            name = non_blank_str(&expect_str_lit(&value)?);
        } else {
            return Err(meta.error("结构体上的 #[autowired] 支持 setter, target, name 参数"));
        }
        Ok(())
    })?;

    match (setter, target) {
        (Some(setter), Some(target)) => Ok(PropertyArgs {
            setter,
            target,
            name,
        }),
        _ => Err(syn::Error::new_spanned(
            attr,
            "属性注入需要同时指定 setter 和 target",
        )),
    }
}

fn named_suffix(name: &Option<String>) -> Option<TokenStream2> {
    name.as_ref().map(|name| quote! { .named(#name) })
}

fn collect_points(input: &DeriveInput) -> Result<Vec<TokenStream2>> {
    let mut points = Vec::new();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Injectable)] 只支持结构体",
            ))
        }
    };

    if let Fields::Named(named) = fields {
        for field in &named.named {
            for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("autowired")) {
                let args = parse_field_args(attr)?;
                let ident = field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new_spanned(field, "字段注入需要具名字段")
                })?;
                let member = ident.to_string();
                let named = named_suffix(&args.name);
                points.push(quote! {
                    ::infrastructure_common::InjectionPoint::field(#member, &self.#ident) #named
                });
            }
        }
    } else if fields
        .iter()
        .any(|field| field.attrs.iter().any(|attr| attr.path().is_ident("autowired")))
    {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "字段注入只支持具名字段的结构体",
        ));
    }

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("autowired")) {
        let args = parse_property_args(attr)?;
        let setter = &args.setter;
        let target = &args.target;
        let member = setter.to_string();
        let named = named_suffix(&args.name);
        points.push(quote! {
            ::infrastructure_common::InjectionPoint::property(
                #member,
                ::infrastructure_common::Setter::new(
                    move |value: ::std::sync::Arc<#target>| self.#setter(value)
                ),
            ) #named
        });
    }

    Ok(points)
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> TokenStream {
    let points = match collect_points(&input) {
        Ok(points) => points,
        Err(e) => return e.to_compile_error().into(),
    };

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = if points.is_empty() {
        quote! { ::std::vec::Vec::new() }
    } else {
        quote! { ::std::vec![#(#points),*] }
    };

    let expanded = quote! {
        impl #impl_generics ::infrastructure_common::Injectable for #struct_name #ty_generics #where_clause {
            fn injection_points(&self) -> ::std::vec::Vec<::infrastructure_common::InjectionPoint<'_>> {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}
