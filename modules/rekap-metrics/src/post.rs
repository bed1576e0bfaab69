//! Platform post normalizer: one raw post of unknown shape into a
//! [`CanonicalPost`].
//!
//! Platform exports disagree on everything — id fields, metric names,
//! timestamp encodings — so every field is probed defensively and missing
//! pieces are synthesized from the platform key and the post's position in
//! its export.

use serde_json::Value;

use rekap_common::{CanonicalPost, PostMetrics};

use crate::fields::{pick, pick_count, pick_str};
use crate::temporal::parse_instant;

const ID_PATHS: &[&str] = &["id", "post_id", "pk", "code", "shortcode", "short_code"];
const TITLE_PATHS: &[&str] = &["title", "judul"];
const CAPTION_PATHS: &[&str] = &["caption", "message", "text", "description"];
const PERMALINK_PATHS: &[&str] = &["permalink", "url", "link", "post_url", "web_video_url"];
const THUMBNAIL_PATHS: &[&str] = &[
    "thumbnail",
    "thumbnail_url",
    "display_url",
    "image_url",
    "media_url",
    "cover",
];
const TYPE_PATHS: &[&str] = &["type", "media_type", "post_type", "content_type"];
const PUBLISHED_PATHS: &[&str] = &[
    "published_at",
    "created_at",
    "taken_at",
    "timestamp",
    "create_time",
    "tanggal",
];

const LIKE_PATHS: &[&str] = &["like_count", "likes", "total_like", "digg_count"];
const COMMENT_PATHS: &[&str] = &["comment_count", "comments", "total_komentar"];
const SHARE_PATHS: &[&str] = &["share_count", "shares", "total_share"];
const SAVE_PATHS: &[&str] = &["save_count", "saves", "collect_count"];

/// Normalize one raw post. `None` only when the input is not an object.
pub fn normalize_post(
    raw: &Value,
    platform_key: &str,
    platform_label: &str,
    index: usize,
) -> Option<CanonicalPost> {
    if !raw.is_object() {
        return None;
    }

    let id = pick_str(raw, ID_PATHS).unwrap_or_else(|| format!("{platform_key}-{}", index + 1));
    let title = pick_str(raw, TITLE_PATHS)
        .unwrap_or_else(|| format!("{platform_label} #{}", index + 1));

    let likes = pick_count(raw, LIKE_PATHS);
    let comments = pick_count(raw, COMMENT_PATHS);
    let shares = pick_count(raw, SHARE_PATHS);
    let saves = pick_count(raw, SAVE_PATHS);

    Some(CanonicalPost {
        id,
        title,
        caption: pick_str(raw, CAPTION_PATHS),
        permalink: pick_str(raw, PERMALINK_PATHS),
        thumbnail: pick_str(raw, THUMBNAIL_PATHS),
        post_type: pick_str(raw, TYPE_PATHS)
            .map(|raw_type| humanize_type(&raw_type))
            .unwrap_or_else(|| "Post".to_string()),
        platform: platform_label.to_string(),
        published_at: pick(raw, PUBLISHED_PATHS).and_then(parse_instant),
        metrics: PostMetrics {
            likes,
            comments,
            shares,
            saves,
            interactions: likes + comments + shares + saves,
        },
    })
}

/// `carousel_album` → `Carousel Album`, `igtv` → `Igtv`, `ad` → `AD`.
/// Words of three characters or fewer are treated as acronyms.
fn humanize_type(raw: &str) -> String {
    raw.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.chars().count() <= 3 {
                word.to_uppercase()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
