//! Response shaping: expected-shape checks and the handful of field patches
//! the original client applied before handing payloads to the UI.

use serde_json::{Map, Value, json};

use crate::error::{Result, TwitterError};

/// Accept only a JSON object.
pub fn expect_object(value: Value) -> Result<Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(TwitterError::UnexpectedShape)
    }
}

/// Accept only a JSON array, unwrapped into its elements.
pub fn expect_array(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(TwitterError::UnexpectedShape),
    }
}

/// The API sometimes reports the stale `following` value right after a
/// follow/unfollow; overwrite it with what we know just happened.
pub fn force_following(mut user: Value, following: bool) -> Value {
    if let Some(map) = user.as_object_mut() {
        map.insert("following".to_string(), Value::Bool(following));
    }
    user
}

/// Drop duplicate search results caused by retweets: two statuses are the
/// same result when their underlying `retweeted_status.id_str` (or their own
/// `id_str`) match. First occurrence wins, order preserved.
pub fn dedupe_search_statuses(statuses: Vec<Value>) -> Vec<Value> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::with_capacity(statuses.len());
    for status in statuses {
        let id = status
            .get("retweeted_status")
            .and_then(|rt| rt.get("id_str"))
            .or_else(|| status.get("id_str"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        if !seen.contains(&id) {
            seen.push(id);
            out.push(status);
        }
    }
    out
}

/// Placeholder tweet delivered when a status cannot be loaded at all, so the
/// conversation view never loses a node. Carries the requested id and the
/// error message as the tweet text.
pub fn placeholder_tweet(status_id: &str, message: &str) -> Value {
    let mut entities = Map::new();
    entities.insert("hashtags".into(), json!([]));
    entities.insert("symbols".into(), json!([]));
    entities.insert("urls".into(), json!([]));
    entities.insert("user_mentions".into(), json!([]));

    json!({
        "fakeTweet": true,
        "user": {
            "name": "",
            "verified": false,
            "protected": false,
            "profile_image_url_https": "",
        },
        "source": "Waxwing",
        "retweeted": false,
        "favorited": false,
        "entities": entities,
        "created_at": "Sun Jan 05 13:05:00 +0000 2020",
        "id_str": status_id,
        "full_text": message,
    })
}

/// Some status ids arrive with a query string attached; keep only the id.
pub fn sanitize_status_id(status_id: &str) -> &str {
    match status_id.find('?') {
        Some(idx) => &status_id[..idx],
        None => status_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_and_array_shapes_are_enforced() {
        assert!(expect_object(json!({"ok": true})).is_ok());
        assert!(expect_object(json!([1, 2])).is_err());
        assert_eq!(expect_array(json!([1, 2])).unwrap().len(), 2);
        assert!(expect_array(json!({"ok": true})).is_err());
    }

    #[test]
    fn following_flag_is_overwritten() {
        let user = json!({"screen_name": "ferris", "following": false});
        let patched = force_following(user, true);
        assert_eq!(patched["following"], json!(true));
    }

    #[test]
    fn retweets_of_the_same_status_collapse() {
        let statuses = vec![
            json!({"id_str": "1", "retweeted_status": {"id_str": "9"}}),
            json!({"id_str": "2", "retweeted_status": {"id_str": "9"}}),
            json!({"id_str": "9"}),
            json!({"id_str": "3"}),
        ];
        let deduped = dedupe_search_statuses(statuses);
        // "2" duplicates the retweeted status, and the bare "9" is the same
        // underlying status as the first retweet.
        let ids: Vec<&str> = deduped.iter().map(|s| s["id_str"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn placeholder_tweet_carries_id_and_message() {
        let tweet = placeholder_tweet("42", "You have been blocked");
        assert_eq!(tweet["fakeTweet"], json!(true));
        assert_eq!(tweet["id_str"], json!("42"));
        assert_eq!(tweet["full_text"], json!("You have been blocked"));
        assert!(tweet["entities"]["urls"].as_array().unwrap().is_empty());
    }

    #[test]
    fn status_ids_lose_query_suffixes() {
        assert_eq!(sanitize_status_id("123?s=20"), "123");
        assert_eq!(sanitize_status_id("123"), "123");
    }
}
