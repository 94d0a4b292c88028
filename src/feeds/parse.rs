//! Feed document parsing.
//!
//! Turns a fetched body into [`RawEntry`] values via serde models over
//! `quick_xml`. RSS 2.0 is tried first, then Atom; a body that is neither
//! is a parse failure for the endpoint.
//!
//! Only the handful of elements the pipeline consumes are modelled; every
//! other element in the document is ignored.

use crate::models::RawEntry;
use chrono::{DateTime, FixedOffset};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::error::Error;

/// An element whose text content is all we care about.
///
/// Deserializing into `$text` tolerates attributes (`type="html"`) and CDATA
/// sections on the element.
#[derive(Debug, Default, Deserialize)]
struct TextValue {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<TextValue>,
    link: Option<TextValue>,
    #[serde(rename = "pubDate")]
    pub_date: Option<TextValue>,
    #[serde(rename = "date")]
    dc_date: Option<TextValue>,
    description: Option<TextValue>,
    #[serde(rename = "encoded")]
    content_encoded: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    // Mandatory in Atom; requiring it keeps arbitrary XML documents from
    // deserializing as an empty feed.
    #[serde(rename = "title")]
    _title: TextValue,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<TextValue>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    published: Option<TextValue>,
    updated: Option<TextValue>,
    summary: Option<TextValue>,
    content: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Parse a feed body into raw entries, in document order.
///
/// # Errors
///
/// Fails when the body parses as neither RSS nor Atom; the error carries
/// both parser messages.
pub fn entries(body: &str) -> Result<Vec<RawEntry>, Box<dyn Error>> {
    match from_str::<Rss>(body) {
        Ok(rss) => Ok(rss.channel.items.into_iter().map(from_rss).collect()),
        Err(rss_err) => match from_str::<AtomFeed>(body) {
            Ok(feed) => Ok(feed.entries.into_iter().map(from_atom).collect()),
            Err(atom_err) => {
                Err(format!("not RSS ({rss_err}) and not Atom ({atom_err})").into())
            }
        },
    }
}

/// Parse a feed timestamp, RFC 3339 first, then RFC 2822.
pub fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
}

fn from_rss(item: RssItem) -> RawEntry {
    let pub_date = text(item.pub_date);
    let dc_date = text(item.dc_date);
    let published = [pub_date.as_deref(), dc_date.as_deref()]
        .into_iter()
        .flatten()
        .find_map(parse_datetime);
    let published_text = pub_date.or(dc_date);

    RawEntry {
        title: text(item.title),
        link: text(item.link),
        published,
        published_text,
        snippet: text(item.description),
        content: text(item.content_encoded),
    }
}

fn from_atom(entry: AtomEntry) -> RawEntry {
    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .and_then(|l| l.href.clone());

    let published_raw = text(entry.published);
    let updated_raw = text(entry.updated);
    let published = [published_raw.as_deref(), updated_raw.as_deref()]
        .into_iter()
        .flatten()
        .find_map(parse_datetime);
    let published_text = published_raw.or(updated_raw);

    RawEntry {
        title: text(entry.title),
        link,
        published,
        published_text,
        snippet: text(entry.summary),
        content: text(entry.content),
    }
}

fn text(value: Option<TextValue>) -> Option<String> {
    value
        .and_then(|v| v.value)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <link>https://blog.example.com</link>
    <item>
      <title>First post</title>
      <link>https://blog.example.com/first</link>
      <pubDate>Wed, 30 Jul 2025 10:00:00 GMT</pubDate>
      <description><![CDATA[<p>Hello <b>feeds</b></p>]]></description>
    </item>
    <item>
      <title>Second post</title>
      <link>https://blog.example.com/second</link>
      <content:encoded>Full body only</content:encoded>
    </item>
  </channel>
</rss>"#;

    const ATOM_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Releases</title>
  <link href="https://releases.example.org/"/>
  <entry>
    <title>v1.2 released</title>
    <link rel="self" href="https://releases.example.org/self"/>
    <link rel="alternate" href="https://releases.example.org/v1.2"/>
    <published>2025-08-01T12:30:00Z</published>
    <updated>2025-08-02T08:00:00Z</updated>
    <summary>Bug fixes and a new importer.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_rss_entries_parsed_in_order() {
        let entries = entries(RSS_BODY).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("First post"));
        assert_eq!(entries[1].title.as_deref(), Some("Second post"));
    }

    #[test]
    fn test_rss_item_fields() {
        let entries = entries(RSS_BODY).unwrap();
        let first = &entries[0];
        assert_eq!(first.link.as_deref(), Some("https://blog.example.com/first"));
        assert_eq!(
            first.published_text.as_deref(),
            Some("Wed, 30 Jul 2025 10:00:00 GMT")
        );
        let published = first.published.expect("pubDate parses");
        assert_eq!(published.to_rfc3339(), "2025-07-30T10:00:00+00:00");
        assert_eq!(
            first.snippet.as_deref(),
            Some("<p>Hello <b>feeds</b></p>")
        );
    }

    #[test]
    fn test_rss_item_without_dates_or_snippet() {
        let entries = entries(RSS_BODY).unwrap();
        let second = &entries[1];
        assert!(second.published.is_none());
        assert!(second.published_text.is_none());
        assert!(second.snippet.is_none());
        assert_eq!(second.content.as_deref(), Some("Full body only"));
    }

    #[test]
    fn test_rss_channel_without_items() {
        let body = r#"<rss><channel><title>Empty</title></channel></rss>"#;
        assert!(entries(body).unwrap().is_empty());
    }

    #[test]
    fn test_atom_entry_fields() {
        let parsed = entries(ATOM_BODY).unwrap();
        assert_eq!(parsed.len(), 1);
        let entry = &parsed[0];
        assert_eq!(entry.title.as_deref(), Some("v1.2 released"));
        assert_eq!(
            entry.link.as_deref(),
            Some("https://releases.example.org/v1.2")
        );
        assert_eq!(
            entry.published_text.as_deref(),
            Some("2025-08-01T12:30:00Z")
        );
        assert_eq!(
            entry.published.unwrap().to_rfc3339(),
            "2025-08-01T12:30:00+00:00"
        );
        assert_eq!(entry.snippet.as_deref(), Some("Bug fixes and a new importer."));
    }

    #[test]
    fn test_atom_updated_when_published_absent() {
        let body = r#"<feed>
          <title>Rolling feed</title>
          <entry>
            <title>Rolling entry</title>
            <link href="https://releases.example.org/rolling"/>
            <updated>2025-08-03T00:00:00Z</updated>
          </entry>
        </feed>"#;
        let parsed = entries(body).unwrap();
        assert_eq!(
            parsed[0].published_text.as_deref(),
            Some("2025-08-03T00:00:00Z")
        );
        assert!(parsed[0].published.is_some());
    }

    #[test]
    fn test_non_feed_body_is_an_error() {
        assert!(entries("<html><body>nope</body></html>").is_err());
        assert!(entries("definitely not xml").is_err());
    }

    #[test]
    fn test_parse_datetime_both_formats() {
        assert!(parse_datetime("2025-08-01T12:30:00Z").is_some());
        assert!(parse_datetime("Fri, 01 Aug 2025 12:30:00 +0000").is_some());
        assert!(parse_datetime("yesterday-ish").is_none());
    }
}
