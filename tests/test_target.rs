use prowl::target::{Scheme, Target, UrlError, parse_url};

#[test]
fn test_parse_url_defaults_to_http() {
    let parsed = parse_url("example.com/FUZZ").unwrap();

    assert_eq!(parsed.scheme, Scheme::Http);
    assert_eq!(parsed.host, "example.com");
    assert_eq!(parsed.port, 80);
    assert_eq!(parsed.name, "example.com");
    assert_eq!(parsed.path, "/FUZZ");
}

#[test]
fn test_parse_url_https_default_port() {
    let parsed = parse_url("https://example.com/FUZZ").unwrap();

    assert_eq!(parsed.scheme, Scheme::Https);
    assert_eq!(parsed.port, 443);
    assert_eq!(parsed.name, "example.com");
}

#[test]
fn test_parse_url_explicit_port_lands_in_name() {
    let parsed = parse_url("http://example.com:8080/FUZZ").unwrap();

    assert_eq!(parsed.port, 8080);
    // The Host header keeps the port only when the URL spelled it out.
    assert_eq!(parsed.name, "example.com:8080");
}

#[test]
fn test_parse_url_empty_path_normalizes_to_slash() {
    let parsed = parse_url("http://example.com").unwrap();

    assert_eq!(parsed.path, "/");
}

#[test]
fn test_parse_url_keeps_query_and_fragment_in_template() {
    let parsed = parse_url("http://example.com/search?q=FUZZ#frag").unwrap();

    assert_eq!(parsed.path, "/search?q=FUZZ#frag");
}

#[test]
fn test_parse_url_ipv6_brackets() {
    let parsed = parse_url("http://[::1]:8080/FUZZ").unwrap();

    assert_eq!(parsed.host, "::1");
    assert_eq!(parsed.name, "[::1]:8080");
}

#[test]
fn test_parse_url_rejects_unknown_scheme() {
    let result = parse_url("ftp://example.com/FUZZ");

    assert!(matches!(result, Err(UrlError::UnsupportedScheme(scheme)) if scheme == "ftp"));
}

#[test]
fn test_parse_url_rejects_out_of_range_port() {
    let result = parse_url("http://example.com:99999/FUZZ");

    assert!(matches!(result, Err(UrlError::Parse(_))));
}

#[test]
fn test_scheme_default_ports() {
    assert_eq!(Scheme::Http.default_port(), 80);
    assert_eq!(Scheme::Https.default_port(), 443);
}

#[tokio::test]
async fn test_resolve_loopback_literal() {
    let parsed = parse_url("http://127.0.0.1:8080/FUZZ").unwrap();
    let target = Target::resolve(&parsed, false).await.unwrap();

    assert_eq!(target.addr, "127.0.0.1:8080".parse().unwrap());
    assert_eq!(target.scheme, Scheme::Http);
    assert_eq!(target.name, "127.0.0.1:8080");
    assert!(!target.insecure);
}

#[tokio::test]
async fn test_resolve_unresolvable_host() {
    let parsed = parse_url("http://host.invalid/FUZZ").unwrap();
    let result = Target::resolve(&parsed, false).await;

    assert!(result.is_err());
}
