//! Lexicon reference types shared by records and views.
//!
//! Open unions on the wire carry a `$type` field naming the NSID of the
//! variant; [`decode_typed`] picks out the variants this client understands.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Types that have a lexicon NSID.
pub trait HasNsid {
    const NSID: &'static str;
}

/// Decode `value` as `T` if its `$type` names `T`.
pub fn decode_typed<T>(value: &serde_json::Value) -> Option<T>
where
    T: HasNsid + DeserializeOwned,
{
    let kind = value.get("$type")?.as_str()?;
    if kind != T::NSID {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

/// Pointer to a specific version of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongRef {
    pub uri: String,
    pub cid: String,
}

impl HasNsid for StrongRef {
    const NSID: &'static str = "com.atproto.repo.strongRef";
}

/// Reply threading on a post record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRef {
    pub root: StrongRef,
    pub parent: StrongRef,
}

/// Link card attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalView {
    pub external: ExternalViewExternal,
}

impl HasNsid for ExternalView {
    const NSID: &'static str = "app.bsky.embed.external#view";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalViewExternal {
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// Mention of an account inside post text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetMention {
    pub did: String,
}

impl HasNsid for FacetMention {
    const NSID: &'static str = "app.bsky.richtext.facet#mention";
}

/// Byte range of post text a facet applies to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteSlice {
    pub byte_start: usize,
    pub byte_end: usize,
}

/// Rich-text annotation; `features` is an open union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub index: ByteSlice,
    #[serde(default)]
    pub features: Vec<serde_json::Value>,
}

impl Facet {
    /// DIDs mentioned by this facet.
    pub fn mentions(&self) -> impl Iterator<Item = FacetMention> + '_ {
        self.features.iter().filter_map(decode_typed::<FacetMention>)
    }
}
