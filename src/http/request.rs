/// HTTP version spoken by every request.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Builds the field list for one fuzzed GET request.
///
/// A request is a flat, ordered list of strings: method, path and version,
/// then header name/value pairs. The serializer checks the shape at send
/// time, so nothing here can fail.
///
/// Every request pins `Connection: keep-alive` so a single connection can
/// carry a worker's whole slice, with `Host` naming the target.
///
/// # Example
///
/// ```
/// # use prowl::http::request::get_request;
/// let fields = get_request("/admin", "example.com:8080");
/// assert_eq!(fields[0], "GET");
/// assert_eq!(fields[1], "/admin");
/// assert_eq!(fields.len(), 7);
/// ```
pub fn get_request(path: &str, host: &str) -> Vec<String> {
    vec![
        "GET".to_string(),
        path.to_string(),
        HTTP_VERSION.to_string(),
        "Host".to_string(),
        host.to_string(),
        "Connection".to_string(),
        "keep-alive".to_string(),
    ]
}
