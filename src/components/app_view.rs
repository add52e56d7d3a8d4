//! Routes of the album app.

use crate::asset_dialog::AssetIdentifier;
use crate::components::views::AlbumPosts;
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[redirect("/", || AppView::AlbumPosts { page: 1, category: String::new(), asset: String::new() })]
        #[route("/album?:page&:category&:asset")]
        AlbumPosts { page: u32, category: String, asset: String },
}

/// Query parameters of the post page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostPageQueryParams {
    pub page: u32,
    pub category: String,
    pub asset: String,
}

impl PostPageQueryParams {
    pub fn new(page: u32, category: String, asset: String) -> Self {
        Self {
            page: page.max(1),
            category,
            asset,
        }
    }

    /// Another page of the same listing. Paging closes any open asset.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            category: self.category.clone(),
            asset: String::new(),
        }
    }

    pub fn with_asset(&self, asset_id: &AssetIdentifier) -> Self {
        Self {
            asset: asset_id.as_str().to_string(),
            ..self.clone()
        }
    }

    pub fn to_route(&self) -> AppView {
        AppView::AlbumPosts {
            page: self.page,
            category: self.category.clone(),
            asset: self.asset.clone(),
        }
    }
}
