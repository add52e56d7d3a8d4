use std::fmt;

/// Asset id taken from the `asset` query parameter. Empty means no asset is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AssetIdentifier(String);

impl AssetIdentifier {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn parse(raw: Option<&str>) -> Self {
        Self(raw.map(str::trim).unwrap_or_default().to_string())
    }

    pub fn is_selected(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetIdentifier {
    fn from(value: &str) -> Self {
        Self::parse(Some(value))
    }
}

impl fmt::Display for AssetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token for one fetch sequence: the identifier that started it plus a
/// monotonically increasing epoch, so `X -> Y -> X` yields three distinct
/// generations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Generation {
    epoch: u64,
    asset_id: AssetIdentifier,
}

impl Generation {
    pub(crate) fn new(epoch: u64, asset_id: AssetIdentifier) -> Self {
        Self { epoch, asset_id }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn asset_id(&self) -> &AssetIdentifier {
        &self.asset_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_empty_and_blank_values_select_nothing() {
        assert!(!AssetIdentifier::parse(None).is_selected());
        assert!(!AssetIdentifier::parse(Some("")).is_selected());
        assert!(!AssetIdentifier::parse(Some("   ")).is_selected());
        assert_eq!(AssetIdentifier::parse(Some("   ")), AssetIdentifier::none());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let id = AssetIdentifier::parse(Some(" 65f0c1 "));
        assert!(id.is_selected());
        assert_eq!(id.as_str(), "65f0c1");
        assert_eq!(id, AssetIdentifier::from("65f0c1"));
    }

    #[test]
    fn generations_with_same_asset_differ_by_epoch() {
        let first = Generation::new(1, "X".into());
        let again = Generation::new(3, "X".into());
        assert_ne!(first, again);
        assert_eq!(first.asset_id(), again.asset_id());
    }
}
