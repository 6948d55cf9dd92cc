/// Wraps an error with the call site, debug-printed arguments and a chain of contexts.
///
/// The last context must be the `ErrorKind` of the error type in scope, the ones before it
/// are usually an `ErrorSource`.
///
/// * `ectx!(err e, ErrorSource::X, ErrorKind::Y => arg1, arg2)` - wraps `e` right away
/// * `ectx!(try err e, ErrorKind::Y)` - same, pinned to the local `Error` type
/// * `ectx!(ErrorSource::X, ErrorKind::Y => arg)` - closure for `map_err`
/// * `ectx!(try ErrorKind::Y => arg)` - closure for `map_err` followed by `?`
macro_rules! ectx {
    (err $e:expr $(,$context:expr)* $(=> $($arg:expr),*)*) => {{
        #[allow(unused_mut)]
        let mut msg = format!("at {}:{}", file!(), line!());
        $(
            $(
                msg.push_str(&format!("\nargs - {}: {:?}", stringify!($arg), $arg));
            )*
        )*
        let err = $e.context(msg);
        $(
            let err = err.context($context);
        )*
        err.into()
    }};
    (try err $e:expr $(,$context:expr)* $(=> $($arg:expr),*)*) => {{
        let e: Error = ectx!(err $e $(,$context)* $(=> $($arg),*)*);
        e
    }};
    (try $($context:expr),* $(=> $($arg:expr),*)*) => {{
        move |e| -> Error { ectx!(err e $(,$context)* $(=> $($arg),*)*) }
    }};
    ($($context:expr),* $(=> $($arg:expr),*)*) => {{
        move |e| ectx!(err e $(,$context)* $(=> $($arg),*)*)
    }};
}

/// Implements `Fail`, `Display`, `kind()` and conversions for a module `Error`
/// that wraps `Context<ErrorKind>`.
macro_rules! derive_error_impls {
    () => {
        impl Fail for Error {
            fn cause(&self) -> Option<&Fail> {
                self.inner.cause()
            }

            fn backtrace(&self) -> Option<&Backtrace> {
                self.inner.backtrace()
            }
        }

        impl fmt::Display for Error {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.inner, f)
            }
        }

        impl Error {
            #[allow(dead_code)]
            pub fn kind(&self) -> ErrorKind {
                self.inner.get_context().clone()
            }
        }

        impl From<ErrorKind> for Error {
            fn from(kind: ErrorKind) -> Error {
                Error {
                    inner: Context::new(kind),
                }
            }
        }

        impl From<Context<ErrorKind>> for Error {
            fn from(inner: Context<ErrorKind>) -> Error {
                Error { inner }
            }
        }
    };
}
