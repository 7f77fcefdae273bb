//! Discovery feed

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Photo, PhotoId, User, UserId};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// Feed filters, all optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    /// Matched against caption, location and author name
    pub search: Option<String>,
    pub tag: Option<String>,
    pub user_id: Option<UserId>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

/// A photo joined with its author, as the feed shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCard {
    pub photo_id: PhotoId,
    pub image_url: String,
    pub caption: String,
    pub location_name: Option<String>,
    pub tags: Vec<String>,
    pub likes: u32,
    pub author_id: UserId,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Filter, sort newest-first and paginate
#[must_use]
pub fn discovery_feed(photos: Vec<Photo>, users: &[User], query: &FeedQuery) -> Vec<FeedCard> {
    let authors: HashMap<UserId, &User> = users.iter().map(|u| (u.id, u)).collect();
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let tag = query
        .tag
        .as_deref()
        .map(|t| t.trim().trim_start_matches('#'))
        .filter(|t| !t.is_empty());
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let mut cards: Vec<FeedCard> = photos
        .into_iter()
        .filter(|photo| query.user_id.is_none_or(|id| photo.user_id == id))
        .filter(|photo| tag.is_none_or(|t| photo.has_tag(t)))
        .filter_map(|photo| {
            let author = authors.get(&photo.user_id).copied();
            if let Some(needle) = &search {
                if !matches_search(&photo, author, needle) {
                    return None;
                }
            }
            Some(card(photo, author))
        })
        .collect();

    cards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.photo_id.cmp(&a.photo_id)));
    cards.into_iter().skip(query.offset).take(limit).collect()
}

fn matches_search(photo: &Photo, author: Option<&User>, needle: &str) -> bool {
    photo.caption.to_lowercase().contains(needle)
        || photo
            .location_name
            .as_deref()
            .is_some_and(|l| l.to_lowercase().contains(needle))
        || author.is_some_and(|a| a.name.to_lowercase().contains(needle))
}

fn card(photo: Photo, author: Option<&User>) -> FeedCard {
    FeedCard {
        photo_id: photo.id,
        image_url: photo.image_url,
        caption: photo.caption,
        location_name: photo.location_name,
        tags: photo.tags,
        likes: photo.likes,
        author_id: photo.user_id,
        author_name: author
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown traveller".to_string()),
        author_avatar_url: author.and_then(|a| a.avatar_url.clone()),
        created_at: photo.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn feed(query: FeedQuery) -> Vec<FeedCard> {
        discovery_feed(seed::photos(), &seed::users(), &query)
    }

    #[test]
    fn test_newest_first() {
        let cards = feed(FeedQuery::default());
        assert_eq!(cards.len(), 5);
        assert!(cards.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(cards[0].caption, "Neon nights in Dotonbori");
        assert_eq!(cards[0].author_name, "Mei Tanaka");
    }

    #[test]
    fn test_search_matches_caption_location_and_author() {
        let by_location = feed(FeedQuery {
            search: Some("portugal".into()),
            ..Default::default()
        });
        assert_eq!(by_location.len(), 2);

        let by_author = feed(FeedQuery {
            search: Some("jonas".into()),
            ..Default::default()
        });
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].caption, "Fog lifting off the fjord");
    }

    #[test]
    fn test_tag_and_user_filters() {
        let japan = feed(FeedQuery {
            tag: Some("#Japan".into()),
            ..Default::default()
        });
        assert_eq!(japan.len(), 2);

        let alex = feed(FeedQuery {
            user_id: Some(1),
            ..Default::default()
        });
        assert!(alex.iter().all(|c| c.author_id == 1));
        assert_eq!(alex.len(), 2);
    }

    #[test]
    fn test_pagination() {
        let page = feed(FeedQuery {
            limit: Some(2),
            offset: 2,
            ..Default::default()
        });
        let all = feed(FeedQuery::default());
        assert_eq!(page, all[2..4].to_vec());

        let clamped = feed(FeedQuery {
            limit: Some(0),
            ..Default::default()
        });
        assert_eq!(clamped.len(), 1);
    }
}
