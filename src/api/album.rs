use crate::api::{AssetError, AssetMetadata, PostsPage, SignedUrl};
use crate::asset_dialog::{AssetIdentifier, AssetSource};
use crate::config::AppConfig;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumClient {
    base_url: String,
    page_size: u32,
    #[cfg(not(target_arch = "wasm32"))]
    timeout: Duration,
}

impl AlbumClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            #[cfg(not(target_arch = "wasm32"))]
            timeout: config.request_timeout(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn asset_url(&self, asset_id: &AssetIdentifier) -> String {
        self.endpoint(&format!(
            "api/album/assets/{}",
            urlencoding::encode(asset_id.as_str())
        ))
    }

    fn signed_url_endpoint(&self, asset_id: &AssetIdentifier) -> String {
        self.endpoint(&format!(
            "api/asset/signed-url?id={}",
            urlencoding::encode(asset_id.as_str())
        ))
    }

    fn posts_url(&self, page: u32, category: &str) -> String {
        let mut url = self.endpoint(&format!(
            "api/album/posts?page={}&limit={}",
            page.max(1),
            self.page_size
        ));
        let category = category.trim();
        if !category.is_empty() {
            url.push_str(&format!("&categoryId={}", urlencoding::encode(category)));
        }
        url
    }

    async fn get_json<T>(&self, url: String) -> Result<T, AssetError>
    where
        T: DeserializeOwned,
    {
        let request = HTTP_CLIENT.get(&url);
        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(self.timeout);

        let response = request.send().await.map_err(AssetError::transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::from_status(status.as_u16()));
        }
        response.json::<T>().await.map_err(AssetError::transport)
    }

    pub async fn fetch_posts(&self, page: u32, category: &str) -> Result<PostsPage, AssetError> {
        self.get_json(self.posts_url(page, category)).await
    }
}

#[async_trait(?Send)]
impl AssetSource for AlbumClient {
    async fn fetch_metadata(&self, asset_id: &AssetIdentifier) -> Result<AssetMetadata, AssetError> {
        self.get_json(self.asset_url(asset_id)).await
    }

    async fn fetch_signed_url(&self, asset_id: &AssetIdentifier) -> Result<SignedUrl, AssetError> {
        let signed: SignedUrl = self.get_json(self.signed_url_endpoint(asset_id)).await?;
        validate_signed(signed)
    }
}

/// A signed-URL response without a URL is as useless as a failed request.
fn validate_signed(signed: SignedUrl) -> Result<SignedUrl, AssetError> {
    if signed.url.trim().is_empty() {
        return Err(AssetError::transport("signed url response was empty"));
    }
    Ok(signed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> AlbumClient {
        AlbumClient::new(&AppConfig {
            api_base_url: base.to_string(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn asset_ids_are_percent_encoded() {
        let client = client("https://dino.example/");
        let id = AssetIdentifier::from("a b/c");
        assert_eq!(
            client.asset_url(&id),
            "https://dino.example/api/album/assets/a%20b%2Fc"
        );
        assert_eq!(
            client.signed_url_endpoint(&id),
            "https://dino.example/api/asset/signed-url?id=a%20b%2Fc"
        );
    }

    #[test]
    fn empty_base_url_yields_same_origin_paths() {
        let client = client("");
        assert_eq!(
            client.asset_url(&"65f0c1".into()),
            "/api/album/assets/65f0c1"
        );
    }

    #[test]
    fn blank_signed_url_is_a_transport_error() {
        for url in ["", "   "] {
            assert!(matches!(
                validate_signed(SignedUrl { url: url.to_string() }),
                Err(AssetError::Transport(_))
            ));
        }

        let signed = SignedUrl {
            url: "https://storage.example/album/x.jpg?signature=abc".to_string(),
        };
        assert_eq!(validate_signed(signed.clone()), Ok(signed));
    }

    #[test]
    fn posts_url_skips_blank_category_and_clamps_page() {
        let client = client("https://dino.example");
        assert_eq!(
            client.posts_url(0, "  "),
            "https://dino.example/api/album/posts?page=1&limit=10"
        );
        assert_eq!(
            client.posts_url(3, "travel"),
            "https://dino.example/api/album/posts?page=3&limit=10&categoryId=travel"
        );
    }
}
