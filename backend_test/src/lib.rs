use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Transform an asynchronous test into a synchronous one and inject a
/// [`rocket::local::asynchronous::Client`] wrapping a fresh, empty ledger.
///
/// `#[backend_test(organizer)]` additionally registers the example organizer
/// before the test body runs.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract type information and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Register the organizer if needed.
    let arg = parse_macro_input!(args as Option<Ident>);
    let maybe_register = match arg {
        Some(arg) if arg == "organizer" => quote! {
            let response = rocket_client
                .post("/organizers")
                .header(rocket::http::ContentType::JSON)
                .header(rocket::http::Header::new(
                    crate::model::api::CALLER_HEADER,
                    crate::model::common::Address::organizer().to_string(),
                ))
                .body(rocket::serde::json::json!(crate::model::api::OrganizerSpec::example()).to_string())
                .dispatch()
                .await;
            assert_eq!(rocket::http::Status::Ok, response.status());
            // Release the borrow on the client before handing it over.
            drop(response);
        },
        Some(arg) => {
            return syn::Error::new(arg.span(), "Expected no argument or `organizer`")
                .into_compile_error()
                .into();
        }
        None => TokenStream2::new(),
    };

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup.
            async fn setup() -> rocket::local::asynchronous::Client {
                let rocket_client = rocket::local::asynchronous::Client::tracked(
                    crate::rocket_for_config(crate::Config::example()),
                )
                .await
                .unwrap();

                #maybe_register

                rocket_client
            }

            /// The test itself.
            #item_fn

            let runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("rocket-worker-test-thread")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let rocket_client = setup().await;
                #new_name(#(#test_args),*).await;
            });
        }
    }
    .into()
}

/// Ensure the wrapped test is async, extract parameters to inject, and reject unknown parameters.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut has_client = false;
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let Pat::Ident(_) = &*pat_type.pat {
                if let Type::Path(type_path) = &*pat_type.ty {
                    if let Some(type_ident) = type_path.path.get_ident() {
                        if type_ident == "Client" {
                            if has_client {
                                return Err(syn::Error::new(input.span(), "Test cannot accept more than one `rocket::local::asynchronous::Client`"));
                            }
                            has_client = true;
                            args.push(quote! { rocket_client });
                            continue;
                        }
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected `client_ident: Client`",
        ));
    }

    Ok(args)
}
