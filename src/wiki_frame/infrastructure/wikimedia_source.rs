use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};

use super::error::InfrastructureError;
use super::http_client::HttpClient;
use crate::config::SourceConfig;
use crate::domain::caption::{normalize_whitespace, strip_language_prefix};
use crate::domain::image_resource::ImageResource;
use crate::domain::image_source_trait::ImageSource;

// ファイルページ上の「元のファイル」リンクと説明欄
static FILE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.internal").expect("file link selector is valid"));
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.description").expect("description selector is valid"));

/// Picks a random file from Wikimedia Commons via its `Special:Random/File` redirect.
pub struct WikimediaSource {
    http: Box<dyn HttpClient>,
    random_file_url: String,
    placeholder_caption: String,
}

impl WikimediaSource {
    pub fn new(http: Box<dyn HttpClient>, config: &SourceConfig) -> Self {
        Self {
            http,
            random_file_url: config.random_file_url.clone(),
            placeholder_caption: config.placeholder_caption.clone(),
        }
    }
}

impl ImageSource for WikimediaSource {
    fn resolve(&self) -> Result<ImageResource, InfrastructureError> {
        log::info!("Fetching a random file page via {}", self.random_file_url);
        // リダイレクト後のレスポンス本文がそのままファイルページになる
        let page = self.http.get(&self.random_file_url)?;
        log::info!("Redirected to file page: {}", page.final_url);

        let markup = String::from_utf8_lossy(&page.body);
        let resource = parse_file_page(&page.final_url, &markup, &self.placeholder_caption)?;
        log::info!("Found image URL: {}", resource.url);
        log::info!("Extracted description: {}", resource.caption);
        Ok(resource)
    }
}

/// Extracts the direct file URL and the cleaned description from a file page.
pub fn parse_file_page(
    page_url: &str,
    markup: &str,
    placeholder_caption: &str,
) -> Result<ImageResource, InfrastructureError> {
    let document = Html::parse_document(markup);

    let link = document
        .select(&FILE_LINK)
        .next()
        .ok_or_else(|| InfrastructureError::ParseError(format!("no direct file link on {}", page_url)))?;
    let href = link
        .value()
        .attr("href")
        .ok_or_else(|| InfrastructureError::ParseError(format!("direct file link on {} has no href", page_url)))?;
    let url = absolute_image_url(page_url, href)?;

    let description = document
        .select(&DESCRIPTION)
        .next()
        .map(|div| normalize_whitespace(&div.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| placeholder_caption.to_string());

    Ok(ImageResource::new(url, strip_language_prefix(&description)))
}

fn absolute_image_url(page_url: &str, href: &str) -> Result<String, InfrastructureError> {
    // プロトコル相対 (//upload.wikimedia.org/...) は常に https
    if href.starts_with("//") {
        return Ok(format!("https:{}", href));
    }

    let base = Url::parse(page_url)
        .map_err(|e| InfrastructureError::ParseError(format!("invalid page URL {:?}: {}", page_url, e)))?;
    let url = base
        .join(href)
        .map_err(|e| InfrastructureError::ParseError(format!("invalid file link {:?}: {}", href, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url.into()),
        other => Err(InfrastructureError::ParseError(format!(
            "file link {:?} uses unsupported scheme {:?}",
            href, other
        ))),
    }
}
