use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, parse_macro_input};

fn is_primary_label(attr: &Attribute) -> bool {
    attr.meta
        .require_list()
        .is_ok_and(|list| list.path.is_ident("label") && list.tokens.to_string() == "primary")
}

fn named_field_with(input: &DeriveInput, pred: impl Fn(&Attribute) -> bool) -> Option<syn::Ident> {
    let syn::Data::Struct(data) = &input.data else {
        return None;
    };
    let syn::Fields::Named(fields) = &data.fields else {
        return None;
    };
    fields
        .named
        .iter()
        .find(|field| field.attrs.iter().any(&pred))
        .and_then(|field| field.ident.clone())
}

fn derive_struct(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Some(primary) = named_field_with(input, is_primary_label) else {
        return Err(syn::Error::new_spanned(
            name,
            "`#[label(primary)]` is required on one span field",
        ));
    };
    Ok(quote! {
        impl ::qp_errors::diag_ext::DiagnosticExt for #name {
            fn module_id(&self) -> ::qp_errors::diag_ext::ModuleID {
                self.#primary.module
            }
        }
    })
}

fn derive_enum(input: &DeriveInput, data: &syn::DataEnum) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match &variant.fields {
            syn::Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                variants.push(&variant.ident);
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "each variant must wrap exactly one diagnostic",
                ));
            }
        }
    }
    Ok(quote! {
        impl ::qp_errors::diag_ext::DiagnosticExt for #name {
            fn module_id(&self) -> ::qp_errors::diag_ext::ModuleID {
                match self {
                    #(Self::#variants(x) => ::qp_errors::diag_ext::DiagnosticExt::module_id(x),)*
                }
            }
        }
    })
}

#[proc_macro_derive(DiagnosticExt, attributes(label))]
pub fn derive_diagnostic_ext(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let output = match &input.data {
        syn::Data::Struct(_) => derive_struct(&input),
        syn::Data::Enum(data) => derive_enum(&input, data),
        syn::Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "unions cannot be diagnostics",
        )),
    };
    output.unwrap_or_else(syn::Error::into_compile_error).into()
}
