//! Expansion of `#[derive(Error)]`.
//!
//! ```ignore
//! #[derive(Debug, Error)]
//! pub enum ScriptError {
//!     #[error("hex string has odd length {length}")]
//!     OddLength { length: usize },
//!     #[error("wrapped: {0}")]
//!     Wrapped(CommonError),
//!     #[error("unknown opcode")]
//!     Unknown,
//! }
//! ```
//!
//! Only the fields a message mentions are bound and passed to `write!`, so
//! variants may carry data that is not part of their display text.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Meta};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let arms = match &input.data {
        Data::Enum(data) => data
            .variants
            .iter()
            .map(|variant| {
                let message = find_message(&variant.attrs, variant.ident.span(), "variant")?;
                let ident = &variant.ident;
                display_arm(quote!(Self::#ident), &variant.fields, &message)
            })
            .collect::<syn::Result<Vec<_>>>()?,
        Data::Struct(data) => {
            let message = find_message(&input.attrs, name.span(), "struct")?;
            vec![display_arm(quote!(Self), &data.fields, &message)?]
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "`Error` cannot be derived for unions",
            ));
        }
    };

    let body = if arms.is_empty() {
        quote!(match *self {})
    } else {
        quote!(match self { #(#arms)* })
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                #body
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

/// Builds one `match self` arm that writes `message` with the fields it names.
fn display_arm(path: TokenStream, fields: &Fields, message: &LitStr) -> syn::Result<TokenStream> {
    let text = message.value();
    let names = placeholders(&text).map_err(|reason| syn::Error::new(message.span(), reason))?;

    match fields {
        Fields::Unit => Ok(quote! { #path => write!(f, #message), }),
        Fields::Named(named) => {
            let mut used = Vec::new();
            for field in &named.named {
                if let Some(ident) = &field.ident
                    && names.iter().any(|n| ident == n)
                {
                    used.push(ident.clone());
                }
            }
            Ok(quote! {
                #path { #(#used,)* .. } => write!(f, #message, #(#used = #used),*),
            })
        }
        Fields::Unnamed(unnamed) => {
            let bindings: Vec<_> = (0..unnamed.unnamed.len())
                .map(|i| format_ident!("_{}", i))
                .collect();
            let used: Vec<_> = bindings
                .iter()
                .filter(|b| names.iter().any(|n| format!("_{n}") == b.to_string()))
                .collect();
            let rewritten = LitStr::new(&prefix_positional(&text), message.span());
            Ok(quote! {
                #path(#(#bindings),*) => write!(f, #rewritten, #(#used = #used),*),
            })
        }
    }
}

/// Reads the string literal out of the `#[error("...")]` attribute.
fn find_message(attrs: &[Attribute], span: Span, target: &str) -> syn::Result<LitStr> {
    let attr = attrs
        .iter()
        .find(|attr| attr.path().is_ident("error"))
        .ok_or_else(|| {
            syn::Error::new(
                span,
                format!("missing #[error(\"...\")] on {target}; every error needs a message"),
            )
        })?;

    match &attr.meta {
        Meta::List(list) => list.parse_args::<LitStr>().map_err(|_| {
            syn::Error::new_spanned(list, "expected a string literal, e.g. #[error(\"bad push\")]")
        }),
        other => Err(syn::Error::new_spanned(
            other,
            "expected #[error(\"message\")]",
        )),
    }
}

/// Returns the argument names referenced by a format string.
///
/// `{{` escapes are skipped. Bare `{}` is rejected because fields are always
/// referenced explicitly.
fn placeholders(text: &str) -> Result<Vec<String>, String> {
    let mut names = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => {
                let mut name = String::new();
                for c in chars.by_ref() {
                    if c == '}' || c == ':' {
                        break;
                    }
                    name.push(c);
                }
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(format!(
                        "implicit `{{}}` placeholder in \"{text}\"; name the field, e.g. {{0}}"
                    ));
                }
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }
    Ok(names)
}

/// Rewrites `{0}` / `{0:?}` into `{_0}` / `{_0:?}` so tuple fields can be passed
/// as named arguments.
fn prefix_positional(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c != '{' {
            continue;
        }
        if chars.peek() == Some(&'{') {
            out.push('{');
            chars.next();
            continue;
        }
        if chars.peek().is_some_and(|d| d.is_ascii_digit()) {
            out.push('_');
        }
    }
    out
}
