use serde::{Deserialize, Serialize};

/// One generated caption: the persona it was written for plus the caption
/// text. The operator may rewrite `post` before it is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionVariant {
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub post: String,
}

/// Product text extracted from the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub title: String,
    pub description: String,
}
