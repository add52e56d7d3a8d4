use crate::asset_dialog::{AssetIdentifier, QueryParamStore};
use crate::components::PostPageQueryParams;
use dioxus::prelude::*;

/// Query-parameter store backed by the router. Dialog writes replace the
/// current history entry so opening and closing does not pile up history.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQueryParams {
    params: PostPageQueryParams,
}

impl RouteQueryParams {
    pub fn new(params: PostPageQueryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PostPageQueryParams {
        &self.params
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.params = self.params.at_page(page);
        if let Some(failure) = navigator().push(self.params.to_route()) {
            tracing::warn!(page = self.params.page, "page navigation failed: {failure:?}");
        }
    }
}

impl QueryParamStore for RouteQueryParams {
    fn read(&self) -> AssetIdentifier {
        AssetIdentifier::parse(Some(&self.params.asset))
    }

    fn write(&mut self, asset_id: AssetIdentifier) {
        self.params = self.params.with_asset(&asset_id);
        if let Some(failure) = navigator().replace(self.params.to_route()) {
            tracing::warn!(asset_id = %asset_id, "asset query update failed: {failure:?}");
        }
    }
}
