use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields, Meta, Type, parse_macro_input};

/// #[derive(Emitter)] 宏实现
pub(crate) fn expand(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_derive(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_derive(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(st) => &st.fields,
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "#[derive(Emitter)] only supports struct",
            ));
        }
    };

    let slots = collect_slots(fields)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::herald::flush::Emitter for #name #ty_generics #where_clause {
            fn events(&self) -> ::std::vec::Vec<&dyn ::herald::flush::Unbind> {
                ::std::vec![#(&self.#slots as &dyn ::herald::flush::Unbind),*]
            }
        }
    })
}

// 按声明顺序收集需要清空的字段（具名字段用字段名，tuple 字段用下标）
fn collect_slots(fields: &Fields) -> syn::Result<Vec<proc_macro2::TokenStream>> {
    let mut slots = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let include = match slot_mode(field)? {
            SlotMode::Skip => false,
            SlotMode::Include => true,
            SlotMode::Auto => is_event_type(&field.ty),
        };
        if !include {
            continue;
        }

        let member = match &field.ident {
            Some(ident) => quote!(#ident),
            None => {
                let index = syn::Index::from(index);
                quote!(#index)
            }
        };
        slots.push(member);
    }

    Ok(slots)
}

enum SlotMode {
    Auto,
    Include,
    Skip,
}

// 解析字段上的 #[event] / #[event(skip)]
fn slot_mode(field: &Field) -> syn::Result<SlotMode> {
    let mut mode = SlotMode::Auto;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("event")) {
        mode = match &attr.meta {
            Meta::Path(_) => SlotMode::Include,
            Meta::List(_) => {
                let mut skip = false;
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown key in attribute; expected 'skip'"))
                    }
                })?;
                if skip {
                    SlotMode::Skip
                } else {
                    SlotMode::Include
                }
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new(
                    nv.span(),
                    "expected #[event] or #[event(skip)]",
                ));
            }
        };
    }

    Ok(mode)
}

fn is_event_type(ty: &Type) -> bool {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => tp
            .path
            .segments
            .last()
            .map(|seg| seg.ident == "Event")
            .unwrap_or(false),
        Type::Group(group) => is_event_type(&group.elem),
        _ => false,
    }
}
