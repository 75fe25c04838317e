//! Call-site ergonomics for the generic dispatcher.

/// Invoke a remote procedure by writing its name as an identifier.
///
/// The identifier is captured with `stringify!` and forwarded to
/// [`Client::call`](crate::Client::call) as the method name, so any name the
/// API understands is valid here without this crate declaring it anywhere.
/// Arguments go through [`serde_json::json!`]: an object merges with the
/// session defaults, an array is sent as-is, and the bare form sends the
/// defaults alone.
///
/// # Example
///
/// ```no_run
/// use wialon_client::{remote_call, Client, SessionConfig};
///
/// let client = Client::new(SessionConfig::default())?;
/// let units = remote_call!(client, core_search_items, {
///     "spec": {
///         "itemsType": "avl_unit",
///         "propName": "sys_name",
///         "propValueMask": "*",
///         "sortType": "sys_name",
///     },
///     "force": 1,
///     "flags": 1,
///     "from": 0,
///     "to": 0,
/// })?;
/// let _ = remote_call!(client, core_logout)?;
/// # Ok::<(), wialon_client::Error>(())
/// ```
#[macro_export]
macro_rules! remote_call {
    ($client:expr, $method:ident $(,)?) => {
        $client.call(stringify!($method), $crate::Value::Null)
    };
    ($client:expr, $method:ident, { $($args:tt)* } $(,)?) => {
        $client.call(stringify!($method), $crate::json!({ $($args)* }))
    };
    ($client:expr, $method:ident, $args:expr $(,)?) => {
        $client.call(stringify!($method), $crate::json!($args))
    };
}
