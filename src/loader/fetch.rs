//! Document and category fetching
//!
//! One transfer per call, no retries. Transport failures, blank payloads
//! and malformed markup are reported as distinct errors.

use tracing::{debug, warn};

use super::transport::{Headers, HttpClient, HttpError};
use crate::core::tokenizer::is_blank;
use crate::dom::SvgDocument;
use crate::engine::category::ProductCategory;
use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn accept(value: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert("accept".to_string(), value.to_string());
    headers
}

/// Fetch and parse the vector document at `url`
///
/// A blank body (empty or whitespace only, a leading BOM aside) is
/// rejected before parsing.
pub async fn fetch_document<C>(client: &C, url: &str) -> Result<SvgDocument>
where
    C: HttpClient + ?Sized,
{
    debug!(url, "fetching document");
    let response = client.get(url, &accept("image/svg+xml")).await?;

    if !response.is_success() {
        warn!(url, status = response.status, "document fetch failed");
        return Err(HttpError::Status {
            status: response.status,
            url: url.to_string(),
        }
        .into());
    }

    let body = response.body.strip_prefix(UTF8_BOM).unwrap_or(&response.body[..]);
    if is_blank(body) {
        warn!(url, "document payload is empty");
        return Err(Error::EmptyPayload {
            url: url.to_string(),
        });
    }

    let doc = SvgDocument::parse(&response.body)?;
    debug!(
        url,
        bytes = response.body.len(),
        elements = doc.element_count(),
        "document parsed"
    );
    Ok(doc)
}

/// Fetch the area/category associations at `url`
pub async fn fetch_categories<C>(client: &C, url: &str) -> Result<Vec<ProductCategory>>
where
    C: HttpClient + ?Sized,
{
    debug!(url, "fetching product categories");
    let response = client.get(url, &accept("application/json")).await?;

    if !response.is_success() {
        warn!(url, status = response.status, "category fetch failed");
        return Err(HttpError::Status {
            status: response.status,
            url: url.to_string(),
        }
        .into());
    }

    let categories: Vec<ProductCategory> = response.json()?;
    debug!(url, rows = categories.len(), "product categories loaded");
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::mock::{MockHttpClient, MockResponse};

    const URL: &str = "http://api.test/venue/v1/image/default.svg";

    #[tokio::test]
    async fn test_fetch_document_success() {
        let client = MockHttpClient::new();
        client.set_body(URL, r#"<svg><path data-area-id="A12"/></svg>"#);

        let doc = fetch_document(&client, URL).await.unwrap();
        assert_eq!(doc.element_count(), 2);
        assert_eq!(client.requested_urls(), vec![URL]);
    }

    #[tokio::test]
    async fn test_fetch_document_status_failure() {
        let client = MockHttpClient::new();
        let err = fetch_document(&client, URL).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(HttpError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_document_transport_failure() {
        let client = MockHttpClient::new();
        client.set_response(
            URL,
            MockResponse::Error(HttpError::ConnectionFailed("refused".into())),
        );
        let err = fetch_document(&client, URL).await.unwrap_err();
        assert!(matches!(err, Error::Transport(HttpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_fetch_document_empty_payload() {
        let client = MockHttpClient::new();
        client.set_body(URL, "");
        assert!(matches!(
            fetch_document(&client, URL).await,
            Err(Error::EmptyPayload { .. })
        ));

        client.set_body(URL, "  \n\t ");
        assert!(matches!(
            fetch_document(&client, URL).await,
            Err(Error::EmptyPayload { .. })
        ));

        for body in [&b"\xEF\xBB\xBF"[..], &b"\xEF\xBB\xBF  \r\n"[..]] {
            client.set_body(URL, body);
            assert!(matches!(
                fetch_document(&client, URL).await,
                Err(Error::EmptyPayload { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_fetch_document_with_bom() {
        let client = MockHttpClient::new();
        client.set_body(URL, &b"\xEF\xBB\xBF<svg/>"[..]);
        let doc = fetch_document(&client, URL).await.unwrap();
        assert_eq!(doc.element_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_document_parse_failure() {
        let client = MockHttpClient::new();
        client.set_body(URL, "<svg><g></svg>");
        assert!(matches!(
            fetch_document(&client, URL).await,
            Err(Error::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_categories() {
        let url = "http://api.test/product/p1/salesChannel/s1/areas";
        let client = MockHttpClient::new();
        client.set_body(
            url,
            r##"[{"areaId":"A12","categoryId":"cat-1","categoryActiveColor":"#FF0000"}]"##,
        );

        let rows = fetch_categories(&client, url).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].area_id, "A12");
        assert_eq!(rows[0].category_active_color, "#FF0000");
    }

    #[tokio::test]
    async fn test_fetch_categories_failures() {
        let url = "http://api.test/product/p1/salesChannel/s1/areas";
        let client = MockHttpClient::new();
        assert!(matches!(
            fetch_categories(&client, url).await,
            Err(Error::Transport(HttpError::Status { status: 404, .. }))
        ));

        client.set_body(url, "not json");
        assert!(matches!(
            fetch_categories(&client, url).await,
            Err(Error::Transport(HttpError::Decode(_)))
        ));
    }
}
