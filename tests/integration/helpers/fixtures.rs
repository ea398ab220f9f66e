// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// One `ytd-rich-item-renderer` cell as rendered on a hashtag feed
pub fn hashtag_item(video_id: &str, views: &str) -> String {
    format!(
        r#"<ytd-rich-item-renderer>
            <div id="thumbnail"><a id="thumbnail" href="/shorts/{video_id}">
                <yt-image><img src="https://i.ytimg.com/vi/{video_id}/frame0.jpg"></yt-image>
            </a></div>
            <div id="details"><div id="meta">
                <h3><a id="video-title">Video {video_id}</a></h3>
                <div id="channel-name"><div id="text"><a>Channel {video_id}</a></div></div>
                <div id="metadata-line">
                    <span>Shorts</span><span>·</span><span>{views}</span><span>2주 전</span>
                </div>
            </div></div>
        </ytd-rich-item-renderer>"#
    )
}

/// A hashtag feed whose cells carry the given view-count texts in order
///
/// Item `i` gets the id `v{i}`.
pub fn hashtag_feed(views: &[&str]) -> String {
    let items: String = views
        .iter()
        .enumerate()
        .map(|(i, v)| hashtag_item(&format!("v{}", i), v))
        .collect();
    format!(
        r#"<html><body><ytd-app><div id="contents">{}</div></ytd-app></body></html>"#,
        items
    )
}
