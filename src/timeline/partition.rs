use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use super::SortOrder;
use crate::store::Post;

/// Legacy platform timestamp format, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const LEGACY_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A post with its parsed creation instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedPost {
    pub posted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub post: Post,
}

/// All posts created on one calendar day in the archive's time zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub posts: Vec<DatedPost>,
}

/// A post excluded from partitioning because its timestamp did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedPost {
    pub post_id: String,
    pub account_id: String,
    pub created_at: String,
    pub reason: String,
}

/// Result of [`partition`]: the buckets plus every post that was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub buckets: Vec<DateBucket>,
    pub malformed: Vec<MalformedPost>,
}

impl Partition {
    /// Total number of bucketed posts.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.posts.len()).sum()
    }
}

/// Parse a stored creation timestamp.
///
/// Accepts RFC 3339 and the legacy platform format.
///
/// # Errors
///
/// Returns the parse error of the legacy format if neither format matches.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT))
        .map(|instant| instant.with_timezone(&Utc))
}

/// Group posts into calendar-day buckets.
///
/// Posts are ordered by creation instant in the requested `order`; posts with
/// equal instants keep their input order in both directions. Each instant is
/// projected into `tz` and consecutive posts sharing a day form one bucket, so
/// the bucket sequence follows the same direction as the posts.
///
/// Posts whose timestamp does not parse are left out of every bucket and
/// listed in [`Partition::malformed`].
pub fn partition(posts: impl IntoIterator<Item = Post>, order: SortOrder, tz: Tz) -> Partition {
    let mut dated = Vec::new();
    let mut malformed = Vec::new();

    for post in posts {
        match parse_instant(&post.created_at) {
            Ok(posted_at) => dated.push(DatedPost { posted_at, post }),
            Err(e) => {
                warn!(
                    post_id = %post.id,
                    account = %post.account_id,
                    created_at = %post.created_at,
                    error = %e,
                    "Excluding post with malformed timestamp"
                );
                malformed.push(MalformedPost {
                    post_id: post.id,
                    account_id: post.account_id,
                    created_at: post.created_at,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Both sorts are stable.
    match order {
        SortOrder::Ascending => dated.sort_by_key(|p| p.posted_at),
        SortOrder::Descending => dated.sort_by_key(|p| Reverse(p.posted_at)),
    }

    let mut buckets: Vec<DateBucket> = Vec::new();
    for post in dated {
        let date = post.posted_at.with_timezone(&tz).date_naive();
        match buckets.last_mut() {
            Some(bucket) if bucket.date == date => bucket.posts.push(post),
            _ => buckets.push(DateBucket {
                date,
                posts: vec![post],
            }),
        }
    }

    Partition { buckets, malformed }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::store::Entities;

    fn post(id: &str, account: &str, created_at: &str) -> Post {
        Post {
            id: id.to_string(),
            created_at: created_at.to_string(),
            text: format!("post {id}"),
            entities: Entities::default(),
            account_id: account.to_string(),
        }
    }

    fn ids(partition: &Partition) -> Vec<&str> {
        partition
            .buckets
            .iter()
            .flat_map(|b| b.posts.iter().map(|p| p.post.id.as_str()))
            .collect()
    }

    fn dates(result: &Partition) -> Vec<NaiveDate> {
        result.buckets.iter().map(|bucket| bucket.date).collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_instant_formats() {
        let rfc = parse_instant("2024-03-01T10:00:00Z").unwrap();
        let offset = parse_instant("2024-03-01T19:00:00+09:00").unwrap();
        let legacy = parse_instant("Fri Mar 01 10:00:00 +0000 2024").unwrap();
        assert_eq!(rfc, offset);
        assert_eq!(rfc, legacy);
        assert!(parse_instant("yesterday").is_err());
        assert!(parse_instant("").is_err());
    }

    #[test]
    fn test_tokyo_projection_crosses_midnight() {
        let posts = vec![
            post("1", "alice", "2024-03-01T10:00:00Z"),
            post("2", "bob", "2024-03-02T23:30:00Z"),
        ];
        let result = partition(posts, SortOrder::Ascending, chrono_tz::Asia::Tokyo);

        let labels: Vec<String> = dates(&result).iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["2024-03-01", "2024-03-03"]);
    }

    #[test]
    fn test_same_day_posts_share_bucket() {
        let posts = vec![
            post("a", "alice", "2024-03-01T15:30:00Z"), // 03-02 00:30 JST
            post("b", "bob", "2024-03-02T14:59:00Z"),   // 03-02 23:59 JST
            post("c", "alice", "2024-03-01T14:59:00Z"), // 03-01 23:59 JST
        ];
        let result = partition(posts, SortOrder::Descending, chrono_tz::Asia::Tokyo);

        assert_eq!(result.buckets.len(), 2);
        assert_eq!(result.buckets[0].date, date("2024-03-02"));
        assert_eq!(ids(&result), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_order_and_uniqueness() {
        let posts = vec![
            post("3", "a", "2024-01-05T01:00:00Z"),
            post("1", "b", "2024-01-01T01:00:00Z"),
            post("4", "a", "2024-01-05T02:00:00Z"),
            post("2", "c", "2024-01-03T01:00:00Z"),
        ];

        let asc = partition(posts.clone(), SortOrder::Ascending, chrono_tz::UTC);
        let desc = partition(posts, SortOrder::Descending, chrono_tz::UTC);

        assert_eq!(ids(&asc), vec!["1", "2", "3", "4"]);
        assert_eq!(ids(&desc), vec!["4", "3", "2", "1"]);

        for result in [&asc, &desc] {
            let unique: HashSet<NaiveDate> = dates(result).into_iter().collect();
            assert_eq!(unique.len(), result.buckets.len());
            assert_eq!(result.post_count(), 4);
        }
        assert!(dates(&asc).windows(2).all(|w| w[0] < w[1]));
        assert!(dates(&desc).windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let posts = vec![
            post("first", "a", "2024-01-01T00:00:00Z"),
            post("second", "b", "2024-01-01T00:00:00Z"),
        ];
        let asc = partition(posts.clone(), SortOrder::Ascending, chrono_tz::UTC);
        let desc = partition(posts, SortOrder::Descending, chrono_tz::UTC);
        assert_eq!(ids(&asc), vec!["first", "second"]);
        assert_eq!(ids(&desc), vec!["first", "second"]);
    }

    #[test]
    fn test_malformed_posts_are_reported() {
        let posts = vec![
            post("good", "a", "2024-01-01T00:00:00Z"),
            post("bad", "b", "not a date"),
            post("empty", "c", ""),
        ];
        let result = partition(posts, SortOrder::Descending, chrono_tz::UTC);

        assert_eq!(ids(&result), vec!["good"]);
        let rejected: Vec<&str> = result.malformed.iter().map(|m| m.post_id.as_str()).collect();
        assert_eq!(rejected, vec!["bad", "empty"]);
        assert_eq!(result.malformed[0].account_id, "b");
        assert_eq!(result.malformed[0].created_at, "not a date");
    }

    #[test]
    fn test_empty_input() {
        let result = partition(Vec::new(), SortOrder::Ascending, chrono_tz::UTC);
        assert!(result.buckets.is_empty());
        assert!(result.malformed.is_empty());
    }
}
