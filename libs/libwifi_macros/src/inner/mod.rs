use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields};

/// Make sure the struct has a named `header` field before generating anything.
/// Otherwise the user would get a confusing error from inside the generated impl.
fn ensure_header_field(ast: &DeriveInput) -> syn::Result<()> {
    let Data::Struct(data) = &ast.data else {
        return Err(Error::new_spanned(
            &ast.ident,
            "AddressHeader can only be derived for structs",
        ));
    };

    let has_header = match &data.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .any(|field| field.ident.as_ref().is_some_and(|ident| ident == "header")),
        _ => false,
    };

    if !has_header {
        return Err(Error::new_spanned(
            &ast.ident,
            "AddressHeader requires a `header` field",
        ));
    }

    Ok(())
}

pub fn address_header_inner(ast: &DeriveInput) -> syn::Result<TokenStream> {
    ensure_header_field(ast)?;

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics crate::Addresses for #name #ty_generics #where_clause {
            fn src(&self) -> Option<&crate::frame::components::MacAddress> {
                crate::Addresses::src(&self.header)
            }

            fn dest(&self) -> &crate::frame::components::MacAddress {
                crate::Addresses::dest(&self.header)
            }

            fn bssid(&self) -> Option<&crate::frame::components::MacAddress> {
                crate::Addresses::bssid(&self.header)
            }
        }
    })
}
