use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Lit, parse_macro_input};

/// Derives the `CommandCode` trait for protocol command enums.
///
/// Every variant must carry an explicit integer discriminant that fits in a
/// `u8`. That discriminant is the byte a client writes to select the command.
///
/// # Example
///
/// ```ignore
/// use tmr_clock_macros::CommandCode;
///
/// #[derive(Copy, Clone, PartialEq, Eq, CommandCode)]
/// #[repr(u8)]
/// pub enum Command {
///     ResetDecims = 4,
///     ResetMs = 8,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl CommandCode for Command {
///     fn from_code(code: u8) -> Option<Self> {
///         match code {
///             4 => Some(Self::ResetDecims),
///             8 => Some(Self::ResetMs),
///             _ => None,
///         }
///     }
///
///     fn code(&self) -> u8 {
///         match self {
///             Self::ResetDecims => 4,
///             Self::ResetMs => 8,
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::ResetDecims => "ResetDecims",
///             Self::ResetMs => "ResetMs",
///         }
///     }
/// }
/// ```
///
/// # Requirements
///
/// - The type must be an enum
/// - All variants must be unit variants (no fields)
/// - All variants need a literal discriminant in `0..=255`, unique per enum
#[proc_macro_derive(CommandCode)]
pub fn derive_command_code(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return syn::Error::new_spanned(&input, "CommandCode can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    // Collect (variant ident, command byte) pairs, rejecting anything we can't map
    let mut codes: Vec<(&syn::Ident, u8)> = Vec::with_capacity(variants.len());
    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "CommandCode can only be derived for enums with unit variants (no fields)",
            )
            .to_compile_error()
            .into();
        }

        let code = match &variant.discriminant {
            Some((
                _,
                Expr::Lit(ExprLit {
                    lit: Lit::Int(lit), ..
                }),
            )) => match lit.base10_parse::<u8>() {
                Ok(code) => code,
                Err(_) => {
                    return syn::Error::new_spanned(lit, "command code must fit in a u8")
                        .to_compile_error()
                        .into();
                }
            },
            _ => {
                return syn::Error::new_spanned(
                    variant,
                    "CommandCode variants need an explicit integer discriminant",
                )
                .to_compile_error()
                .into();
            }
        };

        if codes.iter().any(|&(_, existing)| existing == code) {
            return syn::Error::new_spanned(variant, "duplicate command code")
                .to_compile_error()
                .into();
        }

        codes.push((&variant.ident, code));
    }

    let from_code_arms = codes.iter().map(|(ident, code)| {
        quote! {
            #code => Some(Self::#ident)
        }
    });

    let code_arms = codes.iter().map(|(ident, code)| {
        quote! {
            Self::#ident => #code
        }
    });

    let name_arms = codes.iter().map(|(ident, _)| {
        let ident_str = ident.to_string();
        quote! {
            Self::#ident => #ident_str
        }
    });

    let expanded = quote! {
        impl ::tmr_clock::protocol::CommandCode for #name {
            fn from_code(code: u8) -> Option<Self> {
                match code {
                    #(#from_code_arms,)*
                    _ => None,
                }
            }

            fn code(&self) -> u8 {
                match self {
                    #(#code_arms,)*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
