mod model;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

// ============================================================================
// #[derive(Model)]
// ============================================================================

/// Derive macro implementing `hotel_reservations::Model`.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Model)]
/// #[model(collection = "hotels")]
/// struct Hotel {
///     #[model(id)]
///     hotel_id: String,
///     name: String,
/// }
/// ```
///
/// The macro supports:
/// - `#[model(collection = "...")]` on the struct; defaults to the snake_case
///   struct name with an `s` appended
/// - `#[model(id)]` on the key field; defaults to a field named `id`
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
