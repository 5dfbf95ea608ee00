//! End-to-end tests for the post pipeline, driven by inline JSON payloads.

use serde_json::{Value, json};
use xtract_renderer::post::{PostKind, TextEncoding};
use xtract_renderer::{TransformConfig, TransformError, transform_json, transform_post};
use xtract_renderer::{PostResponse, RawPost};

fn user() -> Value {
    json!({
        "user_results": {"result": {
            "is_blue_verified": true,
            "core": {"name": "Ada Lovelace", "screen_name": "ada"},
            "legacy": {
                "profile_image_url_https": "https://pbs.example/ada.jpg",
                "followers_count": 1200,
                "friends_count": 80,
                "statuses_count": 4000,
                "description": "analyst",
                "created_at": "Tue Mar 21 20:50:14 +0000 2006"
            }
        }}
    })
}

fn legacy(text: &str) -> Value {
    json!({
        "full_text": text,
        "created_at": "Wed Oct 10 20:19:24 +0000 2018",
        "favorite_count": 10,
        "retweet_count": 4,
        "reply_count": 2
    })
}

fn standard(id: &str, text: &str) -> Value {
    json!({
        "rest_id": id,
        "core": user(),
        "views": {"count": "5321"},
        "legacy": legacy(text)
    })
}

fn article(id: &str, result: Value) -> Value {
    json!({
        "rest_id": id,
        "core": user(),
        "legacy": legacy("https://t.co/article"),
        "article": {"article_results": {"result": result}}
    })
}

fn block(key: &str, kind: &str, text: &str) -> Value {
    json!({
        "key": key, "text": text, "type": kind, "depth": 0,
        "inlineStyleRanges": [], "entityRanges": [], "data": {}
    })
}

fn atomic(key: &str, entity_key: u32) -> Value {
    json!({
        "key": key, "text": " ", "type": "atomic", "depth": 0,
        "inlineStyleRanges": [],
        "entityRanges": [{"offset": 0, "length": 1, "key": entity_key}],
        "data": {}
    })
}

fn image_entity(media_id: &str) -> Value {
    json!({
        "type": "MEDIA", "mutability": "IMMUTABLE",
        "data": {"mediaItems": [{"localMediaId": "", "mediaCategory": "DraftTweetImage", "mediaId": media_id}]}
    })
}

fn transform(value: Value) -> xtract_renderer::NormalizedPost {
    transform_post(&RawPost::from_value(value).unwrap())
}

#[test]
fn test_article_end_to_end() {
    let mut hello = block("a1", "unstyled", "Hello");
    hello["inlineStyleRanges"] = json!([{"offset": 0, "length": 5, "style": "BOLD"}]);

    let post = transform(article(
        "1",
        json!({
            "title": "T",
            "content_state": {
                "blocks": [hello, atomic("a2", 0)],
                "entityMap": [{"key": "0", "value": image_entity("900")}]
            },
            "media_entities": [
                {"media_id": "900", "media_info": {"original_img_url": "http://x/i.png"}}
            ]
        }),
    ));

    assert_eq!(post.kind, PostKind::Article);
    assert_eq!(post.text_encoding, TextEncoding::Markdown);
    assert_eq!(post.text, "T\n\n**Hello**\n\n![Image](http://x/i.png)");
    assert_eq!(post.images, vec!["http://x/i.png"]);
    assert!(post.videos.is_empty());
    assert_eq!(post.stats.likes, 10);
    assert_eq!(post.created_at, "Wed Oct 10 20:19:24 +0000 2018");
}

#[test]
fn test_article_with_cover_links_and_unresolved_media() {
    let mut intro = block("b1", "unstyled", "See the docs for details.");
    intro["entityRanges"] = json!([{"offset": 8, "length": 4, "key": 1}]);
    intro["inlineStyleRanges"] = json!([{"offset": 17, "length": 7, "style": "ITALIC"}]);

    let post = transform(article(
        "2",
        json!({
            "title": "Field Notes",
            "cover_media": {"media_info": {"original_img_url": "http://x/cover.jpg"}},
            "content_state": {
                "blocks": [
                    block("b0", "header-two", "Overview"),
                    intro,
                    atomic("b2", 0),
                    atomic("b3", 7),
                    atomic("b4", 2),
                    block("b5", "ordered-list-item", "first"),
                    block("b6", "ordered-list-item", "second")
                ],
                "entityMap": {
                    "0": image_entity("missing"),
                    "1": {"type": "LINK", "mutability": "MUTABLE", "data": {"url": "https://docs.example"}},
                    "2": {"type": "DIVIDER", "mutability": "IMMUTABLE", "data": {}}
                }
            },
            "media_entities": []
        }),
    ));

    insta::assert_snapshot!(post.text, @r"
    Field Notes

    ## Overview

    See the [docs](https://docs.example) for *details*.

    ![Image](Unresolved)

    ---

    1. first

    1. second
    ");
    assert_eq!(post.images, vec!["http://x/cover.jpg"]);
}

#[test]
fn test_article_with_malformed_ranges_and_entities() {
    let mut intro = block("m1", "unstyled", "Plain words here");
    intro["inlineStyleRanges"] = json!([
        {"offset": 0, "length": 2.0, "style": "BOLD"},
        {"offset": 6, "length": 5, "style": "BOLD"}
    ]);
    intro["entityRanges"] = json!([{"offset": 0, "length": 5, "key": null}]);

    let post = transform_json(
        &article(
            "5",
            json!({
                "title": "Scuffed",
                "content_state": {
                    "blocks": [intro, atomic("m2", 0), {"key": "m3", "text": "untyped"}],
                    "entityMap": {"0": {"mutability": "MUTABLE", "data": {}}}
                }
            }),
        )
        .to_string(),
        &TransformConfig::default(),
    )
    .unwrap();

    assert_eq!(post.text, "Scuffed\n\nPlain **words** here");
}

#[test]
fn test_article_without_content_state() {
    let post = transform(article("3", json!({"title": "Draft"})));
    assert_eq!(post.text, "Draft\n\n");
    assert!(post.images.is_empty());
}

#[test]
fn test_article_video_block() {
    let post = transform(article(
        "4",
        json!({
            "title": "Clip",
            "content_state": {
                "blocks": [atomic("v", 0)],
                "entityMap": [{"key": "0", "value": {
                    "type": "MEDIA", "mutability": "IMMUTABLE",
                    "data": {"mediaItems": [{"mediaCategory": "DraftTweetVideo", "mediaId": "31"}]}
                }}]
            },
            "media_entities": [{"media_id": "31", "media_info": {
                "original_img_url": "http://x/poster.jpg",
                "variants": [
                    {"bit_rate": 100, "content_type": "video/mp4", "url": "http://x/a.mp4"},
                    {"bit_rate": 500, "content_type": "video/mp4", "url": "http://x/b.mp4"},
                    {"bit_rate": 900, "content_type": "application/x-mpegURL", "url": "http://x/c.m3u8"}
                ]
            }}]
        }),
    ));

    assert_eq!(post.text, "Clip\n\n[Video: http://x/b.mp4]");
    assert_eq!(post.videos, vec!["http://x/b.mp4"]);
    assert!(post.images.is_empty());
}

#[test]
fn test_standard_post() {
    let mut value = standard("10", "short https://t.co/s https://t.co/m");
    value["legacy"]["entities"] = json!({
        "hashtags": [{"text": "rust", "indices": [0, 5]}, {"text": "parsing", "indices": [6, 14]}],
        "urls": [{"url": "https://t.co/s", "expanded_url": "https://short.example", "indices": [6, 20]}],
        "media": [
            {"type": "photo", "url": "https://t.co/m", "media_url_https": "https://pbs.example/p.jpg"},
            {"type": "video", "url": "https://t.co/m", "video_info": {"variants": [
                {"bitrate": 100, "content_type": "video/mp4", "url": "A"},
                {"bitrate": 500, "content_type": "video/mp4", "url": "B"},
                {"content_type": "application/x-mpegURL", "bitrate": 900, "url": "C"}
            ]}}
        ]
    });

    let post = transform(value);
    assert_eq!(post.kind, PostKind::Post);
    assert_eq!(post.text_encoding, TextEncoding::Plain);
    assert_eq!(post.text, "short https://short.example");
    assert_eq!(post.images, vec!["https://pbs.example/p.jpg"]);
    assert_eq!(post.videos, vec!["B"]);
    assert_eq!(post.hashtags, vec!["rust", "parsing"]);
    assert_eq!(post.stats.views, Some(5321));
    assert_eq!(post.stats.reposts, 4);
    assert_eq!(post.stats.replies, 2);
    assert_eq!(post.author.screen_name, "ada");
    assert_eq!(post.author.is_blue_verified, Some(true));
    assert_eq!(post.author.stats.followers, 1200);
    assert_eq!(post.author.stats.listed, 0);
    assert_eq!(post.author.joined.as_deref(), Some("Tue Mar 21 20:50:14 +0000 2006"));
}

#[test]
fn test_long_form_post_uses_note_entities() {
    let mut value = standard("11", "truncated… https://t.co/legacy");
    value["note_tweet"] = json!({"note_tweet_results": {"result": {
        "text": "the whole thing, see https://t.co/note",
        "entity_set": {"urls": [{"url": "https://t.co/note", "expanded_url": "https://note.example/full"}]}
    }}});

    let post = transform(value);
    assert_eq!(post.text, "the whole thing, see https://note.example/full");
}

#[test]
fn test_url_expansion_can_be_disabled() {
    let mut value = standard("12", "go https://t.co/s");
    value["legacy"]["entities"] = json!({
        "urls": [{"url": "https://t.co/s", "expanded_url": "https://short.example"}]
    });
    let config = TransformConfig {
        expand_urls: false,
        ..Default::default()
    };

    let post = transform_json(&value.to_string(), &config).unwrap();
    assert_eq!(post.text, "go https://t.co/s");
}

#[test]
fn test_quoted_post_is_inlined() {
    let mut value = standard("20", "quoting");
    value["quoted_status_result"] = json!({"result": article("21", json!({"title": "Quoted"}))});

    let post = transform(value);
    let quoted = post.quoted_post.expect("quoted post");
    assert_eq!(quoted.id, "21");
    assert_eq!(quoted.kind, PostKind::Article);
    assert_eq!(quoted.text, "Quoted\n\n");
    assert!(quoted.quoted_post.is_none());
}

#[test]
fn test_broken_quote_is_omitted() {
    let mut value = standard("30", "parent survives");
    // has an id but is missing `core` and `legacy`
    value["quoted_status_result"] = json!({"result": {"rest_id": "31"}});

    let post = transform(value);
    assert_eq!(post.id, "30");
    assert_eq!(post.text, "parent survives");
    assert!(post.quoted_post.is_none());
}

#[test]
fn test_tombstoned_quote_is_skipped() {
    let mut value = standard("40", "quote is gone");
    value["quoted_status_result"] = json!({"result": {"__typename": "TweetTombstone"}});

    assert!(transform(value).quoted_post.is_none());
}

#[test]
fn test_quote_depth_limit() {
    let mut innermost = standard("53", "level three");
    let mut middle = standard("52", "level two");
    let mut outer = standard("51", "level one");
    let mut root = standard("50", "root");
    innermost["quoted_status_result"] = Value::Null;
    middle["quoted_status_result"] = json!({"result": innermost});
    outer["quoted_status_result"] = json!({"result": middle});
    root["quoted_status_result"] = json!({"result": outer});

    let config = TransformConfig {
        max_quote_depth: 2,
        ..Default::default()
    };
    let post = transform_json(&root.to_string(), &config).unwrap();

    let first = post.quoted_post.expect("first level");
    let second = first.quoted_post.expect("second level");
    assert_eq!(second.id, "52");
    assert!(second.quoted_post.is_none());

    let unbounded = transform(root);
    let third = unbounded
        .quoted_post
        .and_then(|p| p.quoted_post)
        .and_then(|p| p.quoted_post)
        .expect("third level");
    assert_eq!(third.id, "53");
}

#[test]
fn test_deep_quote_chain_is_cut_at_the_limit() {
    let levels = 80;
    let mut chain = standard(&format!("{}", 1000 + levels), "deepest");
    for level in (0..levels).rev() {
        let mut parent = standard(&format!("{}", 1000 + level), "level");
        parent["quoted_status_result"] = json!({"result": chain});
        chain = parent;
    }

    let root = transform_json(&chain.to_string(), &TransformConfig::default()).unwrap();
    assert_eq!(root.id, "1000");

    let mut followed = 0;
    let mut current = &root;
    while let Some(quoted) = current.quoted_post.as_deref() {
        followed += 1;
        current = quoted;
    }
    assert_eq!(followed, TransformConfig::DEFAULT_MAX_QUOTE_DEPTH);
    assert_eq!(current.id, format!("{}", 1000 + followed));
}

#[test]
fn test_malformed_top_level_is_fatal() {
    let err = transform_json(r#"{"rest_id": "1", "legacy": {}}"#, &TransformConfig::default())
        .unwrap_err();
    assert!(matches!(err, TransformError::MalformedPost(_)));
}

#[test]
fn test_response_envelope() {
    let response = PostResponse::from_value(json!({
        "data": {"tweetResult": {"result": standard("60", "enveloped")}}
    }))
    .unwrap();
    let post = response.into_post().unwrap().expect("post");
    assert_eq!(transform_post(&post).text, "enveloped");
}

#[test]
fn test_serialized_field_names() {
    let mut value = standard("70", "hello");
    value["quoted_status_result"] = json!({"result": standard("71", "inner")});
    let json = serde_json::to_value(transform(value)).unwrap();

    assert_eq!(json["type"], "post");
    assert_eq!(json["textType"], "text");
    assert_eq!(json["createdAt"], "Wed Oct 10 20:19:24 +0000 2018");
    assert_eq!(json["author"]["screenName"], "ada");
    assert_eq!(json["stats"]["views"], 5321);
    assert_eq!(json["quotedPost"]["id"], "71");
    assert!(json["quotedPost"].get("quotedPost").is_none());
}
