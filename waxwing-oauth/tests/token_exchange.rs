use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waxwing_oauth::{OAuthError, OAuthFlow};

#[tokio::test]
async fn full_token_dance_against_a_local_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/request_token"))
        .and(header_regex("authorization", "^OAuth oauth_consumer_key="))
        .and(body_string_contains("oauth_callback=oob"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "oauth_token=req-1&oauth_token_secret=req-secret&oauth_callback_confirmed=true",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(body_string_contains("oauth_verifier=424242"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "oauth_token=acc-1&oauth_token_secret=acc-secret&user_id=7&screen_name=waxwing",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let flow = OAuthFlow::new("ck", "cs").with_base_url(server.uri());

    let request_token = flow.request_token().await.unwrap();
    assert_eq!(request_token.token, "req-1");
    assert!(request_token.callback_confirmed);
    assert_eq!(
        flow.authorize_url(&request_token),
        format!("{}/oauth/authorize?oauth_token=req-1", server.uri())
    );

    let access_token = flow.access_token(&request_token, "424242").await.unwrap();
    assert_eq!(access_token.token, "acc-1");
    assert_eq!(access_token.token_secret, "acc-secret");
    assert_eq!(access_token.screen_name.as_deref(), Some("waxwing"));
}

#[tokio::test]
async fn refused_exchange_surfaces_the_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/request_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Failed to validate signature"))
        .mount(&server)
        .await;

    let flow = OAuthFlow::new("ck", "wrong").with_base_url(server.uri());
    match flow.request_token().await {
        Err(OAuthError::Exchange(message)) => {
            assert!(message.contains("Failed to validate signature"));
        }
        other => panic!("expected exchange error, got {other:?}"),
    }
}
