use std::cmp::Reverse;

use crate::raw::{MediaEntity, UrlEntity};

/// Swap shortened links in `text` for their targets.
///
/// Each link entity's short URL is replaced by its expanded URL. Short
/// URLs pointing at attached media are removed instead, since the media
/// is listed separately, and any whitespace left trailing is trimmed.
/// Longer short URLs are rewritten first so one that extends another is
/// never split.
pub fn expand_urls(text: &str, urls: &[UrlEntity], media: &[MediaEntity]) -> String {
    // `None` removes the short URL
    let mut rewrites: Vec<(&str, Option<&str>)> = urls
        .iter()
        .map(|entity| (entity.url.as_str(), Some(entity.expanded_url.as_str())))
        .chain(media.iter().filter_map(|m| m.url.as_deref()).map(|url| (url, None)))
        .filter(|(short, _)| !short.is_empty())
        .collect();
    rewrites.sort_by_key(|(short, _)| Reverse(short.len()));

    let mut expanded = text.to_owned();
    let mut removed_media = false;
    for (short, target) in rewrites {
        if !expanded.contains(short) {
            continue;
        }
        expanded = expanded.replace(short, target.unwrap_or_default());
        removed_media |= target.is_none();
    }

    if removed_media {
        expanded.truncate(expanded.trim_end().len());
    }
    expanded
}
