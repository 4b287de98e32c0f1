use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod inner;

/// Derive the `libwifi::Addresses` trait for a frame struct that carries a
/// `header: ManagementHeader` field.
///
/// This macro is only meant for internal usage in the libwifi crate.
///
/// How to use:
/// ```rust,ignore
/// #[derive(Clone, Debug, AddressHeader)]
/// pub struct WnmAction {
///     pub header: ManagementHeader,
///     pub body: WnmBody,
/// }
/// ```
///
/// The generated code forwards every accessor to the header:
/// ```rust,ignore
/// impl crate::Addresses for WnmAction {
///     fn src(&self) -> Option<&MacAddress> {
///         crate::Addresses::src(&self.header)
///     }
///
///     fn dest(&self) -> &MacAddress {
///         crate::Addresses::dest(&self.header)
///     }
///
///     fn bssid(&self) -> Option<&MacAddress> {
///         crate::Addresses::bssid(&self.header)
///     }
/// }
/// ```
///
/// Structs without a `header` field are rejected at compile time.
#[proc_macro_derive(AddressHeader)]
pub fn address_header(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let toks = inner::address_header_inner(&input).unwrap_or_else(|err| err.to_compile_error());

    toks.into()
}
