use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub format: String,
    pub href: String,
}

/// First anchor whose href carries `.{format}`, trying formats in order.
///
/// Matching is a case-insensitive substring test so links such as
/// `/ebooks/84.txt.utf-8` still count as `txt`.
pub fn find_download_link(html: &str, formats: &[String]) -> Option<DownloadLink> {
    let document = Html::parse_document(html);
    let hrefs: Vec<&str> = document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .collect();

    formats.iter().find_map(|format| {
        let needle = format!(".{}", format.to_lowercase());
        hrefs
            .iter()
            .find(|href| href.to_lowercase().contains(&needle))
            .map(|href| DownloadLink {
                format: format.clone(),
                href: href.trim().to_string(),
            })
    })
}

/// Absolute hrefs pass through; relative ones resolve under `base`.
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    base.join(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <a>no target</a>
          <a href="/ebooks/84.epub3.images">EPUB3</a>
          <a href="/ebooks/84.TXT.utf-8">Plain Text UTF-8</a>
          <a href="https://www.gutenberg.org/ebooks/84.kf8.images">Kindle</a>
        </body></html>
    "#;

    fn formats(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_extension_case_insensitively() {
        let link = find_download_link(PAGE, &formats(&["txt"])).unwrap();
        assert_eq!(link.format, "txt");
        assert_eq!(link.href, "/ebooks/84.TXT.utf-8");
    }

    #[test]
    fn earlier_format_wins_over_document_order() {
        let link = find_download_link(PAGE, &formats(&["kf8", "epub3"])).unwrap();
        assert_eq!(link.format, "kf8");
    }

    #[test]
    fn falls_through_to_later_formats() {
        let link = find_download_link(PAGE, &formats(&["pdf", "epub3"])).unwrap();
        assert_eq!(link.format, "epub3");
        assert_eq!(link.href, "/ebooks/84.epub3.images");
    }

    #[test]
    fn no_match_for_unlisted_format() {
        let html = r#"<a href="/ebooks/1.epub.noimages">EPUB</a>"#;
        assert_eq!(find_download_link(html, &formats(&["txt"])), None);
    }

    #[test]
    fn bare_token_without_dot_does_not_match() {
        let html = r#"<a href="/help/txt-files">About text files</a>"#;
        assert_eq!(find_download_link(html, &formats(&["txt"])), None);
    }

    #[test]
    fn relative_links_land_under_catalog_origin() {
        let base = Url::parse("https://www.gutenberg.org").unwrap();
        let url = resolve_link(&base, "/cache/epub/84/pg84.txt").unwrap();
        assert_eq!(url.as_str(), "https://www.gutenberg.org/cache/epub/84/pg84.txt");

        let bare = resolve_link(&base, "files/84.txt").unwrap();
        assert_eq!(bare.as_str(), "https://www.gutenberg.org/files/84.txt");
    }

    #[test]
    fn absolute_links_are_kept() {
        let base = Url::parse("https://www.gutenberg.org").unwrap();
        let url = resolve_link(&base, "https://mirror.example/84.txt").unwrap();
        assert_eq!(url.as_str(), "https://mirror.example/84.txt");
    }
}
