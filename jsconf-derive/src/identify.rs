// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, GenericParam, LitStr};

#[derive(Default)]
struct IdentifyMeta {
    definition: Option<LitStr>,
}

fn parse_identify_meta(input: &DeriveInput) -> syn::Result<IdentifyMeta> {
    let mut meta = IdentifyMeta::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("jsconf") {
            continue;
        }
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("definition") {
                let lit: LitStr = nested.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new(lit.span(), "definition must not be empty"));
                }
                meta.definition = Some(lit);
                Ok(())
            } else {
                Err(nested.error("unsupported jsconf attribute, expected `definition`"))
            }
        })?;
    }
    Ok(meta)
}

pub fn derive_identify(input: &DeriveInput) -> syn::Result<TokenStream> {
    let meta = parse_identify_meta(input)?;
    let name = &input.ident;

    let mut generics = input.generics.clone();
    let has_type_params = generics
        .params
        .iter()
        .any(|param| matches!(param, GenericParam::Type(_)));
    if generics.lifetimes().next().is_some() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Identify requires a 'static type; lifetime parameters are not supported",
        ));
    }
    {
        let where_clause = generics.make_where_clause();
        for param in input.generics.type_params() {
            let ident = &param.ident;
            where_clause.predicates.push(parse_quote!(#ident: 'static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let definition = match (&meta.definition, has_type_params) {
        (Some(path), _) => Some(quote! { #path }),
        (None, true) => {
            let type_name = name.to_string();
            Some(quote! { concat!(module_path!(), "::", #type_name) })
        }
        (None, false) => None,
    };

    let generic_definition = definition.map(|path| {
        quote! {
            #[inline(always)]
            fn generic_definition() -> Option<jsconf_core::types::TypeKey> {
                Some(jsconf_core::types::TypeKey::definition(#path))
            }
        }
    });

    Ok(quote! {
        impl #impl_generics jsconf_core::types::Identify for #name #ty_generics #where_clause {
            #generic_definition
        }
    })
}
