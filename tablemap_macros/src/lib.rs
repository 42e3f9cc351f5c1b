//! Contains tablemap macros
//!
//! used to derive table metadata from struct definitions
extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

#[derive(Default)]
struct FieldOptions {
    primary_key: bool,
    not_null: bool,
    unique: bool,
    skip: bool,
    rename: Option<String>,
    default: Option<String>,
}

fn table_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = input.ident.to_string();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute, expected `name`"))
            }
        })?;
    }
    Ok(name)
}

fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                options.primary_key = true;
            } else if meta.path.is_ident("not_null") {
                options.not_null = true;
            } else if meta.path.is_ident("unique") {
                options.unique = true;
            } else if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else if meta.path.is_ident("default") {
                let value: LitStr = meta.value()?.parse()?;
                options.default = Some(value.value());
            } else {
                return Err(meta.error(
                    "unsupported table attribute, expected one of `primary_key`, `not_null`, `unique`, `skip`, `rename`, `default`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

fn field_quoted(column: &str, ty: &syn::Type, options: &FieldOptions) -> TokenStream2 {
    let mut field = quote! {
        ::tablemap::Field::new(#column, <#ty as ::tablemap::FieldType>::DATA_TYPE)
    };
    if options.primary_key {
        field = quote! { #field.primary_key() };
    }
    if options.not_null {
        field = quote! { #field.not_null() };
    }
    if options.unique {
        field = quote! { #field.unique() };
    }
    if let Some(default) = &options.default {
        field = quote! { #field.default_value(#default) };
    }
    field
}

fn table_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = table_name(&input)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Table can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Table can only be derived for structs",
            ))
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named.iter() {
        let options = field_options(field)?;
        if options.skip {
            continue;
        }
        let column = match &options.rename {
            Some(rename) => rename.clone(),
            // fields are always named here
            None => field
                .ident
                .as_ref()
                .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
                .unwrap_or_default(),
        };
        fields.push(field_quoted(&column, &field.ty, &options));
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::tablemap::Table for #ident #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #name
            }

            fn fields() -> ::std::vec::Vec<::tablemap::Field> {
                ::std::vec![#(#fields),*]
            }
        }
    })
}

/// derives [Table](../tablemap/trait.Table.html) for a struct, mapping each field to a column.
///
/// The table is named after the struct and each column after its field, unless renamed.
/// Exactly one field must be marked as the primary key, otherwise registering the table fails.
///
/// # Attributes
/// - `#[table(name = "...")]` on the struct renames the table
/// - `#[table(primary_key)]` marks the primary key
/// - `#[table(rename = "...")]` renames a column
/// - `#[table(not_null)]`, `#[table(unique)]` and `#[table(default = "...")]` add the matching
///   constraint, the default is copied to the DDL verbatim
/// - `#[table(skip)]` leaves a field out of the table
///
/// # Example
/// ```ignore
/// use tablemap::Table;
///
/// #[derive(Table)]
/// #[table(name = "simple")]
/// struct SimpleModel {
///     #[table(primary_key)]
///     id: i32,
///     name: String,
///     value: f32,
///     #[table(not_null, default = "1")]
///     enabled: bool,
/// }
/// ```
#[proc_macro_derive(Table, attributes(table))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    table_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
