//! Twitter v1.1 endpoint paths.
//!
//! Endpoints on the main API host are paths resolved against the client's
//! base URL, so tests can point the façade at a local server. Media uploads
//! live on a separate host and resolve against the upload base. Path-templated
//! endpoints carry an `:id` placeholder; [`with_id`] fills it.

pub const API_BASE: &str = "https://api.twitter.com";
pub const UPLOAD_BASE: &str = "https://upload.twitter.com";

pub const VERIFY_CREDENTIALS: &str = "/1.1/account/verify_credentials.json";
pub const ACCOUNT_SETTINGS: &str = "/1.1/account/settings.json";

pub const HELP_CONFIGURATION: &str = "/1.1/help/configuration.json";
pub const HELP_PRIVACY: &str = "/1.1/help/privacy.json";
pub const HELP_TOS: &str = "/1.1/help/tos.json";

pub const STATUSES_UPDATE: &str = "/1.1/statuses/update.json";
pub const STATUSES_HOME_TIMELINE: &str = "/1.1/statuses/home_timeline.json";
pub const STATUSES_MENTIONS_TIMELINE: &str = "/1.1/statuses/mentions_timeline.json";
pub const STATUSES_RETWEETS_OF_ME: &str = "/1.1/statuses/retweets_of_me.json";
pub const STATUSES_USER_TIMELINE: &str = "/1.1/statuses/user_timeline.json";
pub const STATUSES_SHOW: &str = "/1.1/statuses/show.json";
pub const STATUSES_RETWEET: &str = "/1.1/statuses/retweet/:id.json";
pub const STATUSES_RETWEETS_FOR: &str = "/1.1/statuses/retweets/:id.json";
pub const STATUSES_UNRETWEET: &str = "/1.1/statuses/unretweet/:id.json";
pub const STATUSES_DESTROY: &str = "/1.1/statuses/destroy/:id.json";

pub const USERS_SHOW: &str = "/1.1/users/show.json";
pub const USERS_SEARCH: &str = "/1.1/users/search.json";

pub const FOLLOWERS_LIST: &str = "/1.1/followers/list.json";
pub const FRIENDS_LIST: &str = "/1.1/friends/list.json";
pub const FRIENDSHIPS_CREATE: &str = "/1.1/friendships/create.json";
pub const FRIENDSHIPS_DESTROY: &str = "/1.1/friendships/destroy.json";

pub const SEARCH_TWEETS: &str = "/1.1/search/tweets.json";
pub const GEO_SEARCH: &str = "/1.1/geo/search.json";

pub const FAVORITES_CREATE: &str = "/1.1/favorites/create.json";
pub const FAVORITES_DESTROY: &str = "/1.1/favorites/destroy.json";
pub const FAVORITES_LIST: &str = "/1.1/favorites/list.json";

pub const MEDIA_UPLOAD: &str = "/1.1/media/upload.json";
pub const MEDIA_METADATA_CREATE: &str = "/1.1/media/metadata/create.json";

pub const DIRECT_MESSAGES_LIST: &str = "/1.1/direct_messages/events/list.json";
pub const DIRECT_MESSAGES_NEW: &str = "/1.1/direct_messages/events/new.json";

pub const TRENDS_PLACE: &str = "/1.1/trends/place.json";
pub const TRENDS_CLOSEST: &str = "/1.1/trends/closest.json";

pub const LISTS_LIST: &str = "/1.1/lists/list.json";
pub const LISTS_MEMBERSHIPS: &str = "/1.1/lists/memberships.json";
pub const LISTS_MEMBERS: &str = "/1.1/lists/members.json";
pub const LISTS_STATUSES: &str = "/1.1/lists/statuses.json";

pub const SAVED_SEARCHES_LIST: &str = "/1.1/saved_searches/list.json";
pub const SAVED_SEARCHES_CREATE: &str = "/1.1/saved_searches/create.json";
pub const SAVED_SEARCHES_DESTROY: &str = "/1.1/saved_searches/destroy/:id.json";

pub const IP_INFO: &str = "https://ipinfo.io/json";

/// Fill the `:id` placeholder of a path-templated endpoint.
pub fn with_id(template: &str, id: &str) -> String {
    template.replace(":id", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_id_placeholder() {
        assert_eq!(
            with_id(STATUSES_RETWEET, "1234"),
            "/1.1/statuses/retweet/1234.json"
        );
        assert_eq!(
            with_id(SAVED_SEARCHES_DESTROY, "77"),
            "/1.1/saved_searches/destroy/77.json"
        );
    }
}
