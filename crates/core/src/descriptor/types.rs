use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The host's structured representation of one searchable indexer.
///
/// The `id` is derived (`"jackett_" + lowercase(raw id)`) and stable across
/// sync passes, which is what makes replace-on-sync idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerDescriptor {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub url: String,
    pub encoding: String,
    pub public: bool,
    pub proxy: bool,
    pub builtin: bool,
    pub category: CategorySet,
    pub search: SearchSpec,
    pub torrents: TorrentsSpec,
}

/// Newznab category tables advertised per media kind, so the host's
/// category-based dispatch can route both movie and TV queries here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySet {
    pub movie: Vec<Category>,
    pub tv: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub desc: String,
}

impl Category {
    pub fn new(id: &str, desc: &str) -> Self {
        Self {
            id: id.to_string(),
            desc: desc.to_string(),
        }
    }
}

/// How to issue a search against this indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    pub paths: Vec<SearchPath>,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPath {
    pub path: String,
    pub method: HttpMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

/// Field selectors for picking results out of the torznab response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentsSpec {
    pub list: ListSelector,
    pub fields: ResultFieldMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSelector {
    pub selector: String,
}

/// Mapping from the host's logical result fields to torznab/RSS selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFieldMap {
    pub id: FieldRule,
    pub title: FieldRule,
    pub details: FieldRule,
    pub download: FieldRule,
    pub size: FieldRule,
    pub date_added: FieldRule,
    pub seeders: FieldRule,
    pub leechers: FieldRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<FieldRule>,
    pub downloadvolumefactor: CaseRule,
    pub uploadvolumefactor: CaseRule,
}

/// One extraction rule: a selector plus an optional default value for
/// fields the feed may omit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl FieldRule {
    pub fn selector(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            default: None,
            optional: false,
        }
    }

    pub fn with_default(selector: &str, default: &str) -> Self {
        Self {
            selector: selector.to_string(),
            default: Some(default.to_string()),
            optional: false,
        }
    }

    pub fn optional(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            default: None,
            optional: true,
        }
    }
}

/// A constant-valued field expressed as the host's `case` rule: every
/// result (`"*"`) gets the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRule {
    pub case: BTreeMap<String, f32>,
}

impl CaseRule {
    pub fn constant(value: f32) -> Self {
        let mut case = BTreeMap::new();
        case.insert("*".to_string(), value);
        Self { case }
    }
}
