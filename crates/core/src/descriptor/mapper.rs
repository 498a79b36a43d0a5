//! Pure mapping from raw Jackett indexer records to host descriptors.

use std::collections::BTreeMap;

use crate::jackett::RawIndexerRecord;

use super::types::{
    CaseRule, Category, CategorySet, FieldRule, HttpMethod, IndexerDescriptor, ListSelector,
    ResultFieldMap, SearchPath, SearchSpec, TorrentsSpec,
};

/// Id prefix for every descriptor this bridge owns in the host registry.
pub const DESCRIPTOR_ID_PREFIX: &str = "jackett_";

/// Volume factors advertised in descriptors. Jackett does not expose
/// free-leech state, so these are deployment policy, not indexer data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePolicy {
    pub download_factor: f32,
    pub upload_factor: f32,
}

impl Default for VolumePolicy {
    fn default() -> Self {
        Self {
            download_factor: 0.0,
            upload_factor: 1.0,
        }
    }
}

/// Convert one raw Jackett indexer record into a host descriptor.
///
/// Returns `None` when the record has no id or no name; callers skip such
/// records rather than registering a malformed descriptor.
///
/// The descriptor id lower-cases the raw id: the host registry matches ids
/// case-sensitively and Jackett ids mix case, so a non-canonical id would
/// orphan the previous registration on the next sync. The search path keeps
/// the original case because it must match Jackett's own routing.
pub fn map_indexer(
    raw: &RawIndexerRecord,
    host: &str,
    api_key: &str,
    policy: VolumePolicy,
) -> Option<IndexerDescriptor> {
    if raw.id.is_empty() || raw.name.is_empty() {
        return None;
    }

    let host = host.trim_end_matches('/');

    let mut params = BTreeMap::new();
    params.insert("t".to_string(), "search".to_string());
    params.insert("q".to_string(), "{keyword}".to_string());
    params.insert("cat".to_string(), "{cat}".to_string());
    params.insert("apikey".to_string(), api_key.to_string());

    Some(IndexerDescriptor {
        id: format!("{}{}", DESCRIPTOR_ID_PREFIX, raw.id.to_lowercase()),
        name: format!("[Jackett] {}", raw.name),
        domain: host.to_string(),
        url: host.to_string(),
        encoding: "UTF-8".to_string(),
        public: raw.kind.is_public(),
        proxy: true,
        builtin: false,
        category: category_set(),
        search: SearchSpec {
            paths: vec![SearchPath {
                path: format!("/api/v2.0/indexers/{}/results/torznab", raw.id),
                method: HttpMethod::Get,
            }],
            params,
        },
        torrents: TorrentsSpec {
            list: ListSelector {
                selector: "item".to_string(),
            },
            fields: ResultFieldMap {
                id: FieldRule::selector("guid"),
                title: FieldRule::selector("title"),
                details: FieldRule::selector("guid"),
                download: FieldRule::selector("link"),
                size: FieldRule::selector("size"),
                date_added: FieldRule::optional("pubDate"),
                seeders: FieldRule::with_default("torznab|attr[name=seeders]", "0"),
                leechers: FieldRule::with_default("torznab|attr[name=peers]", "0"),
                imdb_id: Some(FieldRule::optional("torznab|attr[name=imdbid]")),
                downloadvolumefactor: CaseRule::constant(policy.download_factor),
                uploadvolumefactor: CaseRule::constant(policy.upload_factor),
            },
        },
    })
}

/// The Newznab movie and TV category tables every Jackett descriptor
/// advertises, so the host routes both kinds of query to it.
fn category_set() -> CategorySet {
    CategorySet {
        movie: vec![
            Category::new("2000", "Movies"),
            Category::new("2010", "Movies/Foreign"),
            Category::new("2020", "Movies/BluRay"),
            Category::new("2030", "Movies/DVD"),
            Category::new("2040", "Movies/HD"),
            Category::new("2045", "Movies/UHD"),
            Category::new("2050", "Movies/3D"),
            Category::new("2060", "Movies/SD"),
        ],
        tv: vec![
            Category::new("5000", "TV"),
            Category::new("5020", "TV/Blu-ray"),
            Category::new("5030", "TV/DVD"),
            Category::new("5040", "TV/HD"),
            Category::new("5050", "TV/SD"),
            Category::new("5060", "TV/Foreign"),
            Category::new("5070", "TV/Sport"),
        ],
    }
}
