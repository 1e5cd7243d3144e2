extern crate proc_macro;

use case::CaseExt;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, FieldsNamed, Ident, Type};

const CORE_CRATE_NAME: &str = "cotiza-core";

/// Implements `Model<E>` for a struct of models.
///
/// The struct must have a `ctx` field, updated through `Update<E>`; every
/// other field is updated through `UpdateWithCtx<E>` with a reference to it.
/// A `<Name>Field` enum with one variant per field is generated and used to
/// report which fields changed.
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let core = core_crate();
    let env = match input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("model"))
        .map(|attr| attr.parse_args::<Type>())
    {
        Some(Ok(env)) => env,
        Some(Err(error)) => return error.to_compile_error().into(),
        None => {
            return syn::Error::new(Span::call_site(), "#[model(Env)] attribute is required")
                .to_compile_error()
                .into()
        }
    };
    let named = match input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(FieldsNamed { named, .. }),
            ..
        }) => named,
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "#[derive(Model)] is only defined for structs with named fields",
            )
            .to_compile_error()
            .into()
        }
    };
    let name = &input.ident;
    let vis = &input.vis;
    let field_enum = format_ident!("{}Field", name);
    let field_names = named
        .iter()
        .filter_map(|field| field.ident.to_owned())
        .collect::<Vec<_>>();
    if !field_names.iter().any(|field| field == "ctx") {
        return syn::Error::new(Span::call_site(), "#[derive(Model)] requires a `ctx` field")
            .to_compile_error()
            .into();
    }
    let variants = field_names
        .iter()
        .map(|field| Ident::new(&field.to_string().to_camel(), field.span()))
        .collect::<Vec<_>>();
    let field_updates = field_names
        .iter()
        .map(|field| field_update(&core, &env, field))
        .collect::<Vec<_>>();
    let effects_idents = field_names
        .iter()
        .map(|field| format_ident!("{}_effects", field))
        .collect::<Vec<_>>();

    let expanded = quote! {
        #[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        #vis enum #field_enum {
            #(#variants,)*
        }

        impl #core::runtime::Model<#env> for #name {
            type Field = #field_enum;

            fn update(
                &mut self,
                msg: &#core::runtime::msg::Msg,
            ) -> (Vec<#core::runtime::Effect>, Vec<Self::Field>) {
                #(let #effects_idents = #field_updates;)*
                let fields = vec![#((#field_enum::#variants, #effects_idents.has_changed)),*]
                    .into_iter()
                    .filter_map(|(field, has_changed)| if has_changed { Some(field) } else { None })
                    .collect::<Vec<_>>();
                let effects = vec![#(#effects_idents),*]
                    .into_iter()
                    .flat_map(|effects| effects.into_iter())
                    .collect::<Vec<_>>();
                (effects, fields)
            }

            fn update_field(
                &mut self,
                msg: &#core::runtime::msg::Msg,
                field: &Self::Field,
            ) -> (Vec<#core::runtime::Effect>, Vec<Self::Field>) {
                let effects = match field {
                    #(#field_enum::#variants => #field_updates,)*
                };
                let fields = if effects.has_changed {
                    vec![field.to_owned()]
                } else {
                    vec![]
                };
                (effects.into_iter().collect::<Vec<_>>(), fields)
            }
        }
    };

    TokenStream::from(expanded)
}

fn field_update(core: &TokenStream2, env: &Type, field: &Ident) -> TokenStream2 {
    if field == "ctx" {
        quote! {
            #core::runtime::Update::<#env>::update(&mut self.ctx, msg)
        }
    } else {
        quote! {
            #core::runtime::UpdateWithCtx::<#env>::update(&mut self.#field, msg, &self.ctx)
        }
    }
}

fn core_crate() -> TokenStream2 {
    match crate_name(CORE_CRATE_NAME) {
        Ok(FoundCrate::Itself) | Err(_) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote! { ::#ident }
        }
    }
}
