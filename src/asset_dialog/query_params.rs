use super::identifier::AssetIdentifier;

/// Where the selected asset id lives (the page URL in the app).
pub trait QueryParamStore {
    fn read(&self) -> AssetIdentifier;
    fn write(&mut self, asset_id: AssetIdentifier);
}

/// In-memory store that counts writes.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryParams {
    asset: AssetIdentifier,
    writes: usize,
}

#[cfg(test)]
impl MemoryQueryParams {
    pub fn writes(&self) -> usize {
        self.writes
    }
}

#[cfg(test)]
impl QueryParamStore for MemoryQueryParams {
    fn read(&self) -> AssetIdentifier {
        self.asset.clone()
    }

    fn write(&mut self, asset_id: AssetIdentifier) {
        self.asset = asset_id;
        self.writes += 1;
    }
}
