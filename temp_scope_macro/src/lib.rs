extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse::Parser, spanned::Spanned, Expr, FnArg, ItemFn, LitStr};

/// Turns `fn name(dir: &Path) -> std::io::Result<()>` into a `#[test]` that runs
/// inside a fresh temporary scope.
///
/// Optional arguments: `prefix = "..."` names the directory, `root = <expr>` is the
/// existing directory the scope is created in. `root` takes a string literal or any
/// expression whose value converts to a path, such as `std::env::temp_dir()`.
#[proc_macro_attribute]
pub fn temp_scope_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    match expand(attr.into(), item.into()) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn parse_attr(stream: TokenStream2) -> syn::Result<(Option<LitStr>, Option<Expr>)> {
    let mut prefix: Option<LitStr> = None;
    let mut root: Option<Expr> = None;

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("prefix") {
            prefix = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("root") {
            root = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported attribute, expected `prefix` or `root`"));
        }
        Ok(())
    });

    parser.parse2(stream)?;
    Ok((prefix, root))
}

fn expand(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let input_fn: ItemFn = syn::parse2(item)?;
    let fn_name = &input_fn.sig.ident;
    let fn_attrs = &input_fn.attrs;
    let fn_block = &input_fn.block;

    let (prefix, root) = parse_attr(attr)?;

    // The test body receives the scope directory through its single argument.
    let dir_arg = match input_fn.sig.inputs.len() {
        0 => quote! { _: &::std::path::Path },
        1 => match &input_fn.sig.inputs[0] {
            FnArg::Typed(arg) => {
                let pat = &arg.pat;
                let ty = &arg.ty;
                quote! { #pat: #ty }
            }
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new(
                    receiver.span(),
                    "test function cannot take self",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input_fn.sig.inputs.span(),
                "test function takes at most one argument, the scope directory",
            ))
        }
    };

    let prefix = match prefix {
        Some(lit) => quote! { ::std::option::Option::Some(#lit) },
        None => quote! { ::std::option::Option::None },
    };
    let root = match root {
        Some(expr) => quote! { ::std::option::Option::Some(::std::path::Path::new(&#expr)) },
        None => quote! { ::std::option::Option::None },
    };

    Ok(quote! {
        #[test]
        #(#fn_attrs)*
        fn #fn_name() {
            let scope = ::temp_scope::TemporaryScope::create(#root, #prefix)
                .unwrap_or_else(|e| panic!("failed to create temporary scope: {}", e));

            scope.perform_test(|#dir_arg| -> ::std::io::Result<()> #fn_block);
        }
    })
}
