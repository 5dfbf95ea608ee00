use crate::raw::{MediaEntity, MediaType, VideoVariant};

const STREAMING_MANIFEST: &str = "application/x-mpegURL";

/// Highest declared bit rate among non-manifest variants, falling back to
/// the first variant when none declares one.
pub fn best_variant(variants: &[VideoVariant]) -> Option<&VideoVariant> {
    variants
        .iter()
        .filter(|v| v.content_type.as_deref() != Some(STREAMING_MANIFEST))
        .filter(|v| v.bitrate.is_some_and(|rate| rate > 0))
        .fold(None, |best: Option<&VideoVariant>, v| match best {
            Some(b) if b.bitrate >= v.bitrate => Some(b),
            _ => Some(v),
        })
        .or_else(|| variants.first())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMedia {
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

/// Photo URLs and best video URLs, in entity order.
pub fn extract_media(entities: &[MediaEntity]) -> ExtractedMedia {
    let mut media = ExtractedMedia::default();
    for entity in entities {
        match entity.media_type {
            MediaType::Photo => {
                if let Some(url) = &entity.media_url_https {
                    media.images.push(url.clone());
                }
            }
            MediaType::Video | MediaType::AnimatedGif => {
                let variants = entity
                    .video_info
                    .as_ref()
                    .map(|info| info.variants.as_slice())
                    .unwrap_or_default();
                if let Some(variant) = best_variant(variants) {
                    media.videos.push(variant.url.clone());
                }
            }
            MediaType::Other => {}
        }
    }
    media
}
