mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waxwing_twitter::{DEFAULT_ERROR_MESSAGE, Intent, Payload};

fn error_envelope(code: u32, message: &str) -> serde_json::Value {
    json!({ "errors": [{ "code": code, "message": message }] })
}

#[tokio::test]
async fn verify_credentials_returns_account_object() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/account/verify_credentials.json"))
        .and(header_regex("authorization", "oauth_token=\"primarytoken\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_str": "42",
            "screen_name": "waxwing",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let account = api.verify_credentials().await.unwrap();
    assert_eq!(account["screen_name"], "waxwing");
}

#[tokio::test]
async fn home_timeline_sends_paging_parameters() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/home_timeline.json"))
        .and(query_param("count", "200"))
        .and(query_param("tweet_mode", "extended"))
        .and(query_param("include_ext_alt_text", "true"))
        .and(query_param("max_id", "900"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_str": "899", "full_text": "older" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let statuses = api.home_timeline(Some("900")).await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["id_str"], "899");
}

#[tokio::test]
async fn vendor_errors_surface_their_message() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/users/show.json"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(error_envelope(64, "Account suspended.")),
        )
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let err = api.show_user("gone").await.unwrap_err();
    assert_eq!(err.api_code(), Some(64));
    assert_eq!(err.user_message(), "Account suspended.");
}

#[tokio::test]
async fn unexpected_shape_gets_the_generic_message() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    // An array where an object is expected.
    Mock::given(method("GET"))
        .and(path("/1.1/users/show.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let err = api.show_user("weird").await.unwrap_err();
    assert_eq!(err.user_message(), DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn blocked_user_timeline_falls_back_to_secret_identity_once() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(header_regex("authorization", "oauth_token=\"primarytoken\""))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope(136, "You have been blocked")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(header_regex("authorization", "oauth_token=\"secrettoken\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_str": "77", "full_text": "visible after all" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_with_secret_against(&server.uri());
    let statuses = api.user_timeline("hostile").await.unwrap();
    assert_eq!(statuses[0]["id_str"], "77");
}

#[tokio::test]
async fn blocked_without_secret_identity_stays_an_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope(136, "You have been blocked")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let err = api.user_timeline("hostile").await.unwrap_err();
    assert_eq!(err.api_code(), Some(136));
}

#[tokio::test]
async fn blocked_secret_identity_does_not_fall_back_again() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    // Both identities are blocked. Exactly two requests, then give up.
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope(136, "You have been blocked")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let api = common::api_with_secret_against(&server.uri());
    let err = api.user_timeline("hostile").await.unwrap_err();
    assert_eq!(err.api_code(), Some(136));
}

#[tokio::test]
async fn unloadable_status_becomes_a_placeholder_tweet() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/show.json"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(error_envelope(144, "No status found")),
        )
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let tweet = api.show_status("123?ref_src=whatever").await.unwrap();
    assert_eq!(tweet["fakeTweet"], true);
    assert_eq!(tweet["id_str"], "123");
    assert_eq!(tweet["full_text"], "No status found");
}

#[tokio::test]
async fn follow_response_is_patched_to_following() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    // The endpoint is known to report the stale pre-request value.
    Mock::given(method("POST"))
        .and(path("/1.1/friendships/create.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "screen_name": "newfriend",
            "following": false,
        })))
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let user = api.follow_user("newfriend").await.unwrap();
    assert_eq!(user["following"], true);
}

#[tokio::test]
async fn tweet_search_dedupes_retweets_and_skips_empty_queries() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/search/tweets.json"))
        .and(query_param("q", "waxwing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": [
                { "id_str": "2", "retweeted_status": { "id_str": "1" } },
                { "id_str": "3", "retweeted_status": { "id_str": "1" } },
                { "id_str": "4" },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let results = api.search_tweets("waxwing").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id_str"], "2");
    assert_eq!(results[1]["id_str"], "4");

    let empty = api.search_tweets("").await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn tweet_search_without_statuses_key_is_an_empty_result() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/search/tweets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_metadata": { "count": 100, "query": "nothing" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let results = api.search_tweets("nothing").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn direct_message_travels_as_json_event_body() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/direct_messages/events/new.json"))
        .and(body_partial_json(json!({
            "event": {
                "type": "message_create",
                "message_create": {
                    "target": { "recipient_id": "99" },
                    "message_data": { "text": "hello there" },
                },
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event": { "id": "555" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let event = api.direct_messages_new("hello there", "99").await.unwrap();
    assert_eq!(event["event"]["id"], "555");
}

#[tokio::test]
async fn image_upload_posts_multipart_to_the_upload_host() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "media_id_string": "777",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("cat.png");
    tokio::fs::write(&image, b"not really a png").await.unwrap();

    let api = common::api_against(&server.uri());
    let media = api.upload_image(&image).await.unwrap();
    assert_eq!(media["media_id_string"], "777");
}

#[tokio::test]
async fn dispatcher_reports_events_in_submission_order() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/home_timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_str": "1" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/retweets/5.json"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(error_envelope(144, "No status found")),
        )
        .mount(&server)
        .await;

    let api = common::api_against(&server.uri());
    let (intents, mut events, handle) = waxwing_twitter::dispatch::spawn(api);

    intents
        .send(Intent::HomeTimeline {
            max_id: Some("900".into()),
        })
        .await
        .unwrap();
    intents
        .send(Intent::RetweetsFor {
            status_id: "5".into(),
        })
        .await
        .unwrap();
    drop(intents);

    let first = events.recv().await.unwrap();
    assert_eq!(first.intent, "home_timeline");
    assert!(first.incremental);
    match first.outcome.unwrap() {
        Payload::Items(items) => assert_eq!(items.len(), 1),
        other => panic!("expected items, got {other:?}"),
    }

    let second = events.recv().await.unwrap();
    assert_eq!(second.intent, "retweets_for");
    assert_eq!(second.context.as_deref(), Some("5"));
    assert_eq!(second.outcome.unwrap_err(), "No status found");

    assert!(events.recv().await.is_none());
    handle.await.unwrap();
}
