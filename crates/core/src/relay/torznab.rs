//! Torznab/RSS feed parsing.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::types::{RelayError, SearchHit};

/// Parse a torznab RSS document into normalized hits.
///
/// Field conventions follow the descriptor mapping: `link` is the download
/// URL, `guid` the details page, seeders/peers come from namespaced
/// `<torznab:attr>` elements and default to 0 when absent, `pubDate` is
/// optional. A document that is not well-formed XML is an error; a single
/// item with odd field values is not.
pub fn parse_torznab(xml: &str, indexer: &str) -> Result<Vec<SearchHit>, RelayError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut hits = Vec::new();
    let mut item: Option<ItemBuilder> = None;
    let mut current_element: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                if name == "item" {
                    item = Some(ItemBuilder::default());
                    current_element = None;
                } else if item.is_some() {
                    current_element = Some(name);
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(builder) = item.as_mut() {
                    if local_name(&e) == "attr" {
                        builder.apply_torznab_attr(&e);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(builder), Some(element)) = (item.as_mut(), current_element.as_deref())
                {
                    if let Ok(text) = t.unescape() {
                        builder.apply_element(element, text.trim());
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if let (Some(builder), Some(element)) = (item.as_mut(), current_element.as_deref())
                {
                    if let Ok(text) = std::str::from_utf8(t.as_ref()) {
                        builder.apply_element(element, text.trim());
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if name.as_ref() == b"item" {
                    if let Some(builder) = item.take() {
                        if let Some(hit) = builder.build(indexer) {
                            hits.push(hit);
                        }
                    }
                }
                current_element = None;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(RelayError::Parse(e.to_string())),
        }
    }

    Ok(hits)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Accumulates one `<item>`'s fields as events stream past.
#[derive(Default)]
struct ItemBuilder {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    guid: Option<String>,
    size: Option<u64>,
    category: Option<String>,
    pub_date: Option<DateTime<Utc>>,
    seeders: Option<u32>,
    peers: Option<u32>,
    imdb_id: Option<String>,
}

impl ItemBuilder {
    fn apply_element(&mut self, element: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        match element {
            "title" => self.title = Some(text.to_string()),
            "description" => self.description = Some(text.to_string()),
            "link" => self.link = Some(text.to_string()),
            "guid" => self.guid = Some(text.to_string()),
            "size" => self.size = text.parse().ok(),
            "category" if self.category.is_none() => self.category = Some(text.to_string()),
            "pubDate" => self.pub_date = parse_feed_date(text),
            _ => {}
        }
    }

    fn apply_torznab_attr(&mut self, e: &BytesStart<'_>) {
        let mut name = None;
        let mut value = None;
        for attr in e.attributes().flatten() {
            let text = attr.unescape_value().unwrap_or_default().into_owned();
            match attr.key.as_ref() {
                b"name" => name = Some(text),
                b"value" => value = Some(text),
                _ => {}
            }
        }
        let (Some(name), Some(value)) = (name, value) else {
            return;
        };
        match name.as_str() {
            "seeders" => self.seeders = value.parse().ok(),
            "peers" => self.peers = value.parse().ok(),
            "imdbid" => self.imdb_id = Some(value),
            "size" if self.size.is_none() => self.size = value.parse().ok(),
            _ => {}
        }
    }

    fn build(self, indexer: &str) -> Option<SearchHit> {
        // An item without a title or a download link is unusable.
        let title = self.title?;
        let download_link = self.link?;

        Some(SearchHit {
            title,
            description: self.description,
            download_link,
            size_bytes: self.size.unwrap_or(0),
            seeders: self.seeders.unwrap_or(0),
            leechers: self.peers.unwrap_or(0),
            details_url: self.guid,
            indexer: indexer.to_string(),
            category: self.category,
            pub_date: self.pub_date,
            imdb_id: self.imdb_id,
        })
    }
}

/// Feeds mostly use RFC 2822 dates; some indexers emit ISO 8601, with or
/// without a timezone.
fn parse_feed_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(text)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:torznab="http://torznab.com/schemas/2015/feed">
  <channel>
    <title>YTS</title>
    <description>Jackett feed</description>
    <item>
      <title>Ubuntu 24.04 LTS</title>
      <guid>https://example.org/details/1</guid>
      <link>https://example.org/dl/1.torrent</link>
      <size>4294967296</size>
      <category>2000</category>
      <pubDate>Sat, 15 Jun 2024 10:30:00 +0000</pubDate>
      <torznab:attr name="seeders" value="120" />
      <torznab:attr name="peers" value="30" />
      <torznab:attr name="imdbid" value="tt0137523" />
    </item>
    <item>
      <title><![CDATA[Ubuntu Server & Desktop]]></title>
      <link>https://example.org/dl/2.torrent</link>
      <size>1073741824</size>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_valid_feed() {
        let hits = parse_torznab(FEED, "yts").unwrap();
        assert_eq!(hits.len(), 2);

        let first = &hits[0];
        assert_eq!(first.title, "Ubuntu 24.04 LTS");
        assert_eq!(first.download_link, "https://example.org/dl/1.torrent");
        assert_eq!(first.details_url.as_deref(), Some("https://example.org/details/1"));
        assert_eq!(first.size_bytes, 4294967296);
        assert_eq!(first.seeders, 120);
        assert_eq!(first.leechers, 30);
        assert_eq!(first.imdb_id.as_deref(), Some("tt0137523"));
        assert_eq!(first.category.as_deref(), Some("2000"));
        assert_eq!(first.indexer, "yts");

        let date = first.pub_date.unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_missing_attrs_default_to_zero() {
        let hits = parse_torznab(FEED, "yts").unwrap();
        let second = &hits[1];
        assert_eq!(second.seeders, 0);
        assert_eq!(second.leechers, 0);
        assert!(second.pub_date.is_none());
        assert!(second.imdb_id.is_none());
        // CDATA title survives intact.
        assert_eq!(second.title, "Ubuntu Server & Desktop");
    }

    #[test]
    fn test_item_without_title_is_dropped() {
        let xml = r#"<rss><channel><item>
            <link>https://example.org/dl/x.torrent</link>
        </item></channel></rss>"#;
        let hits = parse_torznab(xml, "x").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = parse_torznab("<rss><item></channel></rss>", "x");
        assert!(matches!(result, Err(RelayError::Parse(_))));
    }

    #[test]
    fn test_non_numeric_size_tolerated() {
        let xml = r#"<rss><channel><item>
            <title>Odd</title>
            <link>https://example.org/odd.torrent</link>
            <size>unknown</size>
        </item></channel></rss>"#;
        let hits = parse_torznab(xml, "x").unwrap();
        assert_eq!(hits[0].size_bytes, 0);
    }

    #[test]
    fn test_iso_pub_date_fallback() {
        let xml = r#"<rss xmlns:torznab="http://torznab.com/schemas/2015/feed"><channel><item>
            <title>Iso</title>
            <link>https://example.org/iso.torrent</link>
            <pubDate>2024-06-15T10:30:00</pubDate>
        </item></channel></rss>"#;
        let hits = parse_torznab(xml, "x").unwrap();
        assert!(hits[0].pub_date.is_some());
    }

    #[test]
    fn test_size_attr_used_when_element_missing() {
        let xml = r#"<rss xmlns:torznab="http://torznab.com/schemas/2015/feed"><channel><item>
            <title>AttrSize</title>
            <link>https://example.org/a.torrent</link>
            <torznab:attr name="size" value="2048" />
        </item></channel></rss>"#;
        let hits = parse_torznab(xml, "x").unwrap();
        assert_eq!(hits[0].size_bytes, 2048);
    }
}
