use super::error::InfrastructureError;
use base64::decode;

pub struct DefaultExternalImageFetcher;

impl DefaultExternalImageFetcher {
    pub fn new() -> Self {
        Self
    }

    // `http(s)://` と `data:` はこのフェッチャーで取得する
    pub fn handles(source: &str) -> bool {
        source.starts_with("data:") || source.starts_with("http://") || source.starts_with("https://")
    }

    pub async fn fetch_image_from_url_impl(&self, url: &str) -> Result<Vec<u8>, InfrastructureError> {
        if url.starts_with("data:") {
            let base64_data = url
                .split(',')
                .nth(1)
                .ok_or_else(|| InfrastructureError::DecodingError("Invalid data URL: missing comma".to_string()))?;
            Ok(decode(base64_data)?)
        } else {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(InfrastructureError::ExternalApiError(format!("{} returned {}", url, status)));
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}
