//! Call-site identity
//!
//! The logger tags each record with the name of the function that issued
//! it. The name is captured at compile time by [`function_name!`]: the macro
//! declares a marker fn inside the caller and reads its type path, so the
//! result survives inlining and needs no stack walking.
//!
//! [`function_name!`]: crate::function_name

/// Name of the marker fn declared by [`crate::function_name!`].
#[doc(hidden)]
pub const MARKER: &str = "__svckit_callsite";

/// Expands to the short name of the enclosing function as a `&'static str`.
///
/// ```
/// fn handle_login() -> &'static str {
///     svckit_logging::function_name!()
/// }
/// assert_eq!(handle_login(), "handle_login");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __svckit_callsite() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::callsite::short_function_name(__type_name_of(__svckit_callsite))
    }};
}

/// Reduce a marker type path to the enclosing function's short name.
///
/// `my_service::api::login::handle::__svckit_callsite` becomes `handle`.
/// Closure and async frames are skipped. Returns an empty string when
/// nothing usable is left.
pub fn short_function_name(path: &str) -> &str {
    let mut path = path
        .strip_suffix(MARKER)
        .map(|p| p.strip_suffix("::").unwrap_or(p))
        .unwrap_or(path);

    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }

    let name = match path.rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    };

    if name.starts_with("{{") || name.ends_with('>') {
        return "";
    }
    name
}
