use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reactions {
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

impl Reactions {
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Like => "👍",
            Self::Love => "❤️",
            Self::Haha => "😆",
            Self::Wow => "😮",
            Self::Sad => "😢",
            Self::Angry => "😠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionItem {
    #[serde(rename = "type")]
    pub kind: Reactions,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Reaction {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<Reactions>,
    #[serde(default)]
    pub items: Vec<ReactionItem>,
}

impl Reaction {
    pub fn total(&self) -> u32 {
        self.items.iter().map(|item| item.total).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub reaction: Reaction,
}

/// Asset reference embedded in a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefault {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub assets: Vec<AssetDefault>,
    #[serde(default)]
    pub reaction: Reaction,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: u32,
}

/// Asset details as returned by the metadata service. Carries no content URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub reaction: Reaction,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrl {
    pub url: String,
}

/// The asset shown by the detail dialog: metadata plus, once signed, its content URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedAsset {
    #[serde(flatten)]
    pub metadata: AssetMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl RefinedAsset {
    pub fn metadata_only(metadata: AssetMetadata) -> Self {
        Self {
            metadata,
            src: None,
        }
    }

    pub fn with_src(metadata: AssetMetadata, signed: SignedUrl) -> Self {
        Self {
            metadata,
            src: Some(signed.url),
        }
    }
}
