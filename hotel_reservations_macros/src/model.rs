use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    // #[model(collection = "...")] on the struct, else snake_case name + "s"
    let collection = extract_collection(&input)?;

    // #[model(id)] on a field, else the field named `id`
    let id_field = extract_id_field(&input)?;

    Ok(quote! {
        impl hotel_reservations::Model for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    })
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `collection = \"...\"`"))
            }
        })?;

        if let Some(c) = collection {
            if c.is_empty() {
                return Err(syn::Error::new_spanned(attr, "collection name cannot be empty"));
            }
            return Ok(c);
        }
    }

    Ok(format!("{}s", to_snake_case(&input.ident.to_string())))
}

fn extract_id_field(input: &DeriveInput) -> syn::Result<syn::Ident> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Model derive requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Model derive only supports structs",
            ))
        }
    };

    let mut marked = None;
    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("model") {
                continue;
            }
            let mut is_id = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    is_id = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `id`"))
                }
            })?;
            if is_id {
                if marked.is_some() {
                    return Err(syn::Error::new_spanned(attr, "only one field can be #[model(id)]"));
                }
                marked = field.ident.clone();
            }
        }
    }
    if let Some(ident) = marked {
        return Ok(ident);
    }

    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "Model derive: no field marked with #[model(id)] and no field named `id`",
            )
        })
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_cases_struct_names() {
        assert_eq!(to_snake_case("Hotel"), "hotel");
        assert_eq!(to_snake_case("GuestProfile"), "guest_profile");
    }

    #[test]
    fn expands_with_explicit_collection_and_id() {
        let input: DeriveInput = syn::parse_quote! {
            #[model(collection = "guests")]
            struct Guest {
                #[model(id)]
                guest_id: String,
                name: String,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("\"guests\""));
        assert!(tokens.contains("guest_id"));
    }

    #[test]
    fn defaults_to_pluralised_name_and_id_field() {
        let input: DeriveInput = syn::parse_quote! {
            struct RoomType {
                id: String,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("\"room_types\""));
    }

    #[test]
    fn rejects_struct_without_key() {
        let input: DeriveInput = syn::parse_quote! {
            struct Nameless {
                name: String,
            }
        };
        assert!(expand(input).is_err());
    }
}
