pub mod http;
pub mod page;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

pub use http::ReqwestSource;

/// Identifies us to the catalog operators.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Educational/Research Download Bot; Contact: bookfetch@example.org)";

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    // Declared charset is ignored; hrefs are ASCII so a lossy decode is enough.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Plain GET access to the catalog and file servers.
#[async_trait]
pub trait HttpSource: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// Address of the catalog page for `id` under `base`.
pub fn catalog_url(base: &Url, id: u64) -> Result<Url, url::ParseError> {
    let root = base.as_str().trim_end_matches('/');
    Url::parse(&format!("{}/ebooks/{}", root, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_url_ignores_trailing_slash() {
        let with = Url::parse("https://www.gutenberg.org/").unwrap();
        let without = Url::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(catalog_url(&with, 84).unwrap().as_str(), "https://www.gutenberg.org/ebooks/84");
        assert_eq!(catalog_url(&without, 1).unwrap().as_str(), "http://127.0.0.1:8080/ebooks/1");
    }

    #[test]
    fn catalog_url_keeps_base_path() {
        let base = Url::parse("https://mirror.example/pg").unwrap();
        assert_eq!(catalog_url(&base, 7).unwrap().as_str(), "https://mirror.example/pg/ebooks/7");
    }

    #[test]
    fn only_2xx_counts_as_success() {
        let ok = HttpResponse { status: 200, body: vec![] };
        let moved = HttpResponse { status: 304, body: vec![] };
        let missing = HttpResponse { status: 404, body: b"gone".to_vec() };
        assert!(ok.is_success());
        assert!(!moved.is_success());
        assert!(!missing.is_success());
        assert_eq!(missing.text(), "gone");
    }
}
