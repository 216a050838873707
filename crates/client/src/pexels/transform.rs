//! Normalization of Pexels video records into [`MediaItem`]s.

use std::sync::LazyLock;

use chrono::Utc;
use pexwall_core::{MediaItem, MediaKind, MediaVariant};
use regex::Regex;

use crate::pexels::request::VideoQuality;
use crate::pexels::response::{VideoFile, VideoRecord};

pub const PROVIDER: &str = "pexels";

static VIDEO_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|mov|webm|m4v)(\?.*)?$").expect("valid regex"));

/// A record that cannot become a displayable item.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("video {0} has no playable file")]
    NoPlayableFile(u64),
}

/// Renditions picked for display.
struct Selection<'a> {
    files: Vec<&'a VideoFile>,
    best: &'a VideoFile,
    preview: &'a VideoFile,
}

fn select_files(record: &VideoRecord, quality: VideoQuality) -> Result<Selection<'_>, TransformError> {
    let mut files: Vec<&VideoFile> = record
        .video_files
        .iter()
        .flatten()
        .filter(|file| file.playable_link().is_some())
        .collect();
    files.sort_by_key(|file| std::cmp::Reverse(file.pixels()));

    let largest = *files.first().ok_or(TransformError::NoPlayableFile(record.id))?;

    let hd = files
        .iter()
        .copied()
        .find(|f| f.has_quality("hd") || (f.width.unwrap_or(0) >= 1280 && f.height.unwrap_or(0) >= 720));
    let sd = files
        .iter()
        .copied()
        .find(|f| f.has_quality("sd") || (640..1280).contains(&f.width.unwrap_or(0)));

    // largest is always the last resort
    let best = match quality {
        VideoQuality::Hd => hd.or(sd),
        VideoQuality::Sd => sd.or(hd),
        VideoQuality::Original => files.iter().copied().find(|f| f.has_quality("original")).or(Some(largest)),
    }
    .unwrap_or(largest);

    let preview = sd.or(hd).unwrap_or(largest);

    Ok(Selection { files, best, preview })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn poster_url(record: &VideoRecord, best_link: &str) -> String {
    if let Some(image) = non_blank(record.image.as_deref()) {
        return image.to_string();
    }

    if VIDEO_EXTENSION.is_match(best_link) {
        return VIDEO_EXTENSION.replace(best_link, ".jpg").into_owned();
    }

    record
        .video_pictures
        .iter()
        .flatten()
        .find_map(|picture| non_blank(picture.picture.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://images.pexels.com/videos/{id}/free-video-{id}.jpg", id = record.id))
}

fn to_variant(file: &VideoFile) -> MediaVariant {
    MediaVariant {
        url: file.playable_link().unwrap_or_default().to_string(),
        quality: file.quality.clone().unwrap_or_else(|| "unknown".to_string()),
        width: file.width.unwrap_or(0),
        height: file.height.unwrap_or(0),
        file_type: file.file_type.clone().unwrap_or_else(|| "video/mp4".to_string()),
        size: file.size.unwrap_or(0),
    }
}

fn whole_seconds(duration: Option<f64>) -> u32 {
    match duration {
        Some(secs) if secs.is_finite() && secs > 0.0 => secs.floor().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Convert one API record into a video item.
///
/// `quality` picks the rendition behind `videoUrl`; every playable file still
/// lands in `variants`.
pub fn to_media_item(record: &VideoRecord, quality: VideoQuality) -> Result<MediaItem, TransformError> {
    let selection = select_files(record, quality)?;
    let best_link = selection.best.playable_link().unwrap_or_default();
    let poster = poster_url(record, best_link);

    let user = record.user.as_ref();
    let author = non_blank(user.and_then(|u| u.name.as_deref())).unwrap_or("Anonymous").to_string();

    let mut item = MediaItem::new(format!("pexels_{}", record.id), MediaKind::Video, format!("Pexels video #{}", record.id))
        .with_duration(whole_seconds(record.duration));

    item.description = format!("High-quality free footage by {author}");
    item.provider = PROVIDER.to_string();
    item.cover_url = Some(poster);
    item.video_url = Some(best_link.to_string());
    item.preview_url = selection.preview.playable_link().map(str::to_string);
    item.link = Some(
        non_blank(record.url.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("https://www.pexels.com/video/{}/", record.id)),
    );
    item.genre_title = Some("Stock footage".to_string());
    item.author_url = non_blank(user.and_then(|u| u.url.as_deref())).map(str::to_string);
    item.author = Some(author);
    item.tags = record.tags.as_ref().map(|tags| tags.to_vec()).unwrap_or_default();
    item.variants = selection.files.iter().map(|file| to_variant(file)).collect();
    item.width = record.width.or(selection.best.width);
    item.height = record.height.or(selection.best.height);
    item.release_date = Some(Utc::now().date_naive().format("%Y-%m-%d").to_string());

    Ok(item)
}

/// Convert a batch, dropping records that cannot be normalized.
pub fn transform_videos(records: &[VideoRecord], quality: VideoQuality) -> Vec<MediaItem> {
    records
        .iter()
        .filter_map(|record| match to_media_item(record, quality) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("dropping video: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pexels::response::{Tags, VideoPicture, VideoUser};

    fn file(quality: &str, width: u32, height: u32, link: &str) -> VideoFile {
        VideoFile {
            quality: Some(quality.to_string()),
            file_type: Some("video/mp4".to_string()),
            width: Some(width),
            height: Some(height),
            link: Some(link.to_string()),
            ..Default::default()
        }
    }

    fn record(id: u64, files: Vec<VideoFile>) -> VideoRecord {
        VideoRecord {
            id,
            width: None,
            height: None,
            url: None,
            image: None,
            duration: Some(12.6),
            user: None,
            video_files: Some(files),
            video_pictures: None,
            tags: None,
        }
    }

    #[test]
    fn test_best_is_first_hd_sized_file() {
        let rec = record(
            1,
            vec![
                file("sd", 960, 540, "https://v/1-sd.mp4"),
                file("uhd", 3840, 2160, "https://v/1-uhd.mp4"),
                file("hd", 1920, 1080, "https://v/1-hd.mp4"),
            ],
        );
        let item = to_media_item(&rec, VideoQuality::Hd).unwrap();
        // largest first; uhd already clears 1280x720
        assert_eq!(item.video_url.as_deref(), Some("https://v/1-uhd.mp4"));
        assert_eq!(item.preview_url.as_deref(), Some("https://v/1-sd.mp4"));
        assert_eq!(item.variants.len(), 3);
        assert_eq!(item.variants[0].width, 3840);
    }

    #[test]
    fn test_best_falls_back_to_largest() {
        let rec = record(2, vec![file("tiny", 320, 180, "https://v/2-a.mp4"), file("low", 480, 270, "https://v/2-b.mp4")]);
        let item = to_media_item(&rec, VideoQuality::Hd).unwrap();
        assert_eq!(item.video_url.as_deref(), Some("https://v/2-b.mp4"));
        assert_eq!(item.preview_url.as_deref(), Some("https://v/2-b.mp4"));
    }

    #[test]
    fn test_preview_by_width_band() {
        let rec = record(3, vec![file("hd", 1920, 1080, "https://v/3-hd.mp4"), file("x", 640, 360, "https://v/3-m.mp4")]);
        let item = to_media_item(&rec, VideoQuality::Hd).unwrap();
        assert_eq!(item.preview_url.as_deref(), Some("https://v/3-m.mp4"));
    }

    #[test]
    fn test_quality_preference() {
        let rec = record(
            9,
            vec![
                file("hd", 1920, 1080, "https://v/9-hd.mp4"),
                file("sd", 960, 540, "https://v/9-sd.mp4"),
                file("original", 3840, 2160, "https://v/9-orig.mp4"),
            ],
        );

        let sd = to_media_item(&rec, VideoQuality::Sd).unwrap();
        assert_eq!(sd.video_url.as_deref(), Some("https://v/9-sd.mp4"));
        assert_eq!(sd.width, Some(960));
        assert_eq!(sd.variants.len(), 3);

        let original = to_media_item(&rec, VideoQuality::Original).unwrap();
        assert_eq!(original.video_url.as_deref(), Some("https://v/9-orig.mp4"));

        // the 4k file clears the hd size check first
        let hd = to_media_item(&rec, VideoQuality::Hd).unwrap();
        assert_eq!(hd.video_url.as_deref(), Some("https://v/9-orig.mp4"));
    }

    #[test]
    fn test_quality_fallbacks() {
        let hd_only = record(13, vec![file("hd", 1920, 1080, "https://v/13-hd.mp4")]);
        let item = to_media_item(&hd_only, VideoQuality::Sd).unwrap();
        assert_eq!(item.video_url.as_deref(), Some("https://v/13-hd.mp4"));

        let sd_only = record(14, vec![file("sd", 960, 540, "https://v/14-sd.mp4")]);
        let item = to_media_item(&sd_only, VideoQuality::Hd).unwrap();
        assert_eq!(item.video_url.as_deref(), Some("https://v/14-sd.mp4"));

        let untagged = record(15, vec![file("mobile", 320, 180, "https://v/15-a.mp4"), file("x", 1920, 1080, "https://v/15-b.mp4")]);
        let item = to_media_item(&untagged, VideoQuality::Original).unwrap();
        assert_eq!(item.video_url.as_deref(), Some("https://v/15-b.mp4"));
    }

    #[test]
    fn test_no_playable_file_is_dropped() {
        let rec = record(4, vec![file("hd", 1920, 1080, "  ")]);
        assert_eq!(to_media_item(&rec, VideoQuality::Hd).unwrap_err(), TransformError::NoPlayableFile(4));

        let rec = VideoRecord { video_files: None, ..record(5, vec![]) };
        assert!(to_media_item(&rec, VideoQuality::Hd).is_err());
    }

    #[test]
    fn test_poster_preference_order() {
        let mut rec = record(6, vec![file("hd", 1920, 1080, "https://v/6-hd.MOV?token=abc")]);
        rec.image = Some("https://img/6.jpg".into());
        assert_eq!(to_media_item(&rec, VideoQuality::Hd).unwrap().cover_url.as_deref(), Some("https://img/6.jpg"));

        rec.image = None;
        assert_eq!(to_media_item(&rec, VideoQuality::Hd).unwrap().cover_url.as_deref(), Some("https://v/6-hd.jpg"));

        let mut rec = record(7, vec![file("hd", 1920, 1080, "https://v/stream/7")]);
        rec.video_pictures = Some(vec![VideoPicture { picture: Some("https://p/7-0.jpg".into()), ..Default::default() }]);
        assert_eq!(to_media_item(&rec, VideoQuality::Hd).unwrap().cover_url.as_deref(), Some("https://p/7-0.jpg"));

        rec.video_pictures = None;
        assert_eq!(
            to_media_item(&rec, VideoQuality::Hd).unwrap().cover_url.as_deref(),
            Some("https://images.pexels.com/videos/7/free-video-7.jpg")
        );
    }

    #[test]
    fn test_identity_and_attribution() {
        let mut rec = record(8, vec![file("hd", 1920, 1080, "https://v/8.mp4")]);
        let item = to_media_item(&rec, VideoQuality::Hd).unwrap();
        assert_eq!(item.id, "pexels_8");
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.title, "Pexels video #8");
        assert_eq!(item.provider, "pexels");
        assert_eq!(item.author.as_deref(), Some("Anonymous"));
        assert_eq!(item.link.as_deref(), Some("https://www.pexels.com/video/8/"));
        assert_eq!(item.duration, 12);
        assert_eq!(item.duration_text, "00:12");
        assert_eq!(item.width, Some(1920));
        assert_eq!(item.release_date.as_deref().map(str::len), Some(10));

        rec.user = Some(VideoUser { name: Some("Jane".into()), url: Some("https://www.pexels.com/@jane".into()), id: None });
        rec.url = Some("https://www.pexels.com/video/sea-8/".into());
        rec.tags = Some(Tags::Csv("sea, waves".into()));
        let item = to_media_item(&rec, VideoQuality::Hd).unwrap();
        assert_eq!(item.author.as_deref(), Some("Jane"));
        assert_eq!(item.author_url.as_deref(), Some("https://www.pexels.com/@jane"));
        assert_eq!(item.description, "High-quality free footage by Jane");
        assert_eq!(item.link.as_deref(), Some("https://www.pexels.com/video/sea-8/"));
        assert_eq!(item.tags, vec!["sea", "waves"]);
    }

    #[test]
    fn test_duration_edge_cases() {
        assert_eq!(whole_seconds(None), 0);
        assert_eq!(whole_seconds(Some(-3.0)), 0);
        assert_eq!(whole_seconds(Some(f64::NAN)), 0);
        assert_eq!(whole_seconds(Some(59.5)), 59);
        assert_eq!(whole_seconds(Some(12.99)), 12);
    }

    #[test]
    fn test_transform_videos_drops_bad_records() {
        let records = vec![
            record(10, vec![file("hd", 1920, 1080, "https://v/10.mp4")]),
            record(11, vec![]),
            record(12, vec![file("sd", 960, 540, "https://v/12.mp4")]),
        ];
        let items = transform_videos(&records, VideoQuality::Hd);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["pexels_10", "pexels_12"]);
    }
}
