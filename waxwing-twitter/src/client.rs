//! The API façade: one method per Twitter v1.1 endpoint.
//!
//! Every operation shapes its parameter set, signs the request under one of
//! two identities, and hands back parsed JSON (`Value` for object-shaped
//! endpoints, `Vec<Value>` for array-shaped ones). Responses are forwarded
//! unmodified apart from the field patches in [`crate::shape`].

use reqwest::header::HeaderValue;
use serde_json::{Value, json};
use waxwing_http::{Auth, HttpClient, HttpError, RequestOpts};
use waxwing_oauth::Credentials;

use crate::endpoints;
use crate::error::{ERROR_CODE_BLOCKED, Result, TwitterError};
use crate::shape::{
    dedupe_search_statuses, expect_array, expect_object, force_following, placeholder_tweet,
    sanitize_status_id,
};

/// Which credential set signs a request.
///
/// `Secret` requests are the product of a blocked-requester fallback and are
/// terminal: the fallback branch only ever fires for `Primary` requests, so
/// the resubmission depth is bounded to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identity {
    Primary,
    Secret,
}

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    upload: HttpClient,
    primary: Credentials,
    secret: Option<Credentials>,
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl TwitterApi {
    pub fn new(primary: Credentials) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(endpoints::API_BASE)?,
            upload: HttpClient::new(endpoints::UPLOAD_BASE)?,
            primary,
            secret: None,
        })
    }

    /// Build the façade from loaded configuration, wiring up the secret
    /// identity when one is configured.
    pub fn from_config(config: &waxwing_config::WaxwingConfig) -> Result<Self> {
        let primary = Credentials::new(
            config.consumer_key.clone(),
            config.consumer_secret.clone(),
            config.primary.token.clone(),
            config.primary.token_secret.clone(),
        );
        let mut api = Self::new(primary)?;
        if let Some(tokens) = &config.secret_identity {
            api = api.with_secret_identity(Credentials::new(
                config.consumer_key.clone(),
                config.consumer_secret.clone(),
                tokens.token.clone(),
                tokens.token_secret.clone(),
            ));
        }
        Ok(api)
    }

    /// Configure the secondary identity used when the primary is blocked.
    pub fn with_secret_identity(mut self, secret: Credentials) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn has_secret_identity(&self) -> bool {
        self.secret.is_some()
    }

    /// Point all requests, uploads included, at a different host. Intended
    /// for tests.
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        self.http = HttpClient::new(base)?;
        self.upload = HttpClient::new(base)?;
        Ok(self)
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    pub(crate) fn upload_http(&self) -> &HttpClient {
        &self.upload
    }

    fn credentials(&self, identity: Identity) -> &Credentials {
        match identity {
            Identity::Primary => &self.primary,
            Identity::Secret => self.secret.as_ref().unwrap_or(&self.primary),
        }
    }

    /// Whether a failed primary request should be resubmitted under the
    /// secret identity. Only vendor code 136 (blocked) qualifies, and only
    /// when a secret identity exists.
    fn can_fall_back(&self, err: &TwitterError, identity: Identity) -> bool {
        identity == Identity::Primary
            && self.secret.is_some()
            && err.api_code() == Some(ERROR_CODE_BLOCKED)
    }

    fn auth_header(
        &self,
        method: &str,
        url: &str,
        request_params: &[(String, String)],
        identity: Identity,
    ) -> Result<Auth> {
        self.auth_for(&self.http, method, url, request_params, identity)
    }

    pub(crate) fn auth_for(
        &self,
        http: &HttpClient,
        method: &str,
        url: &str,
        request_params: &[(String, String)],
        identity: Identity,
    ) -> Result<Auth> {
        let rel = http.resolve(url)?;
        let header = waxwing_oauth::sign(
            method,
            rel.as_str(),
            request_params,
            self.credentials(identity),
        )?;
        let value = HeaderValue::from_str(&header)
            .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
        Ok(Auth::Signed(value))
    }

    async fn get(
        &self,
        url: &str,
        query: Vec<(String, String)>,
        identity: Identity,
    ) -> Result<Value> {
        let auth = self.auth_header("GET", url, &query, identity)?;
        let opts = RequestOpts {
            auth,
            query,
            ..Default::default()
        };
        Ok(self.http.get_json(url, opts).await?)
    }

    async fn post_form(
        &self,
        url: &str,
        form: Vec<(String, String)>,
        identity: Identity,
    ) -> Result<Value> {
        let auth = self.auth_header("POST", url, &form, identity)?;
        let opts = RequestOpts {
            auth,
            ..Default::default()
        };
        Ok(self.http.post_form(url, &form, opts).await?)
    }

    async fn post_json(&self, url: &str, body: Value, identity: Identity) -> Result<Value> {
        // JSON bodies contribute no parameters to the OAuth signature.
        let auth = self.auth_header("POST", url, &[], identity)?;
        let opts = RequestOpts {
            auth,
            ..Default::default()
        };
        Ok(self.http.post_json(url, &body, opts).await?)
    }

    // ---- account & help ----

    pub async fn verify_credentials(&self) -> Result<Value> {
        tracing::debug!("verify_credentials");
        let value = self
            .get(endpoints::VERIFY_CREDENTIALS, vec![], Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn account_settings(&self) -> Result<Value> {
        tracing::debug!("account_settings");
        let value = self
            .get(endpoints::ACCOUNT_SETTINGS, vec![], Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn help_configuration(&self) -> Result<Value> {
        let value = self
            .get(endpoints::HELP_CONFIGURATION, vec![], Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn help_privacy(&self) -> Result<Value> {
        let value = self
            .get(endpoints::HELP_PRIVACY, vec![], Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn help_tos(&self) -> Result<Value> {
        let value = self
            .get(endpoints::HELP_TOS, vec![], Identity::Primary)
            .await?;
        expect_object(value)
    }

    // ---- posting statuses ----

    pub async fn tweet(&self, text: &str, place_id: Option<&str>) -> Result<Value> {
        tracing::debug!(?place_id, "tweet");
        let mut form = params(&[("status", text)]);
        if let Some(place) = place_id {
            form.push(("place_id".into(), place.into()));
        }
        let value = self
            .post_form(endpoints::STATUSES_UPDATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn reply_to_tweet(
        &self,
        text: &str,
        reply_to_status_id: &str,
        place_id: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!(reply_to_status_id, ?place_id, "reply_to_tweet");
        let mut form = params(&[
            ("status", text),
            ("in_reply_to_status_id", reply_to_status_id),
            ("auto_populate_reply_metadata", "true"),
        ]);
        if let Some(place) = place_id {
            form.push(("place_id".into(), place.into()));
        }
        let value = self
            .post_form(endpoints::STATUSES_UPDATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    /// Quote-tweet: the quoted status travels as `attachment_url`.
    pub async fn retweet_with_comment(
        &self,
        text: &str,
        attachment_url: &str,
        place_id: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!(attachment_url, ?place_id, "retweet_with_comment");
        let mut form = params(&[("status", text), ("attachment_url", attachment_url)]);
        if let Some(place) = place_id {
            form.push(("place_id".into(), place.into()));
        }
        let value = self
            .post_form(endpoints::STATUSES_UPDATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    /// `media_ids` is the comma-joined id list from prior media uploads.
    pub async fn tweet_with_images(
        &self,
        text: &str,
        media_ids: &str,
        place_id: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!(?place_id, "tweet_with_images");
        let mut form = params(&[("status", text), ("media_ids", media_ids)]);
        if let Some(place) = place_id {
            form.push(("place_id".into(), place.into()));
        }
        let value = self
            .post_form(endpoints::STATUSES_UPDATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn reply_to_tweet_with_images(
        &self,
        text: &str,
        reply_to_status_id: &str,
        media_ids: &str,
        place_id: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!(reply_to_status_id, ?place_id, "reply_to_tweet_with_images");
        let mut form = params(&[
            ("status", text),
            ("in_reply_to_status_id", reply_to_status_id),
            ("auto_populate_reply_metadata", "true"),
            ("media_ids", media_ids),
        ]);
        if let Some(place) = place_id {
            form.push(("place_id".into(), place.into()));
        }
        let value = self
            .post_form(endpoints::STATUSES_UPDATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    // ---- timelines ----

    /// Home timeline. `max_id` pages backwards; callers distinguish initial
    /// load from load-more by whether they supplied it.
    pub async fn home_timeline(&self, max_id: Option<&str>) -> Result<Vec<Value>> {
        tracing::debug!(?max_id, "home_timeline");
        let mut query = params(&[
            ("tweet_mode", "extended"),
            ("exclude_replies", "false"),
            ("count", "200"),
            ("include_ext_alt_text", "true"),
        ]);
        if let Some(max) = max_id {
            query.push(("max_id".into(), max.into()));
        }
        let value = self
            .get(endpoints::STATUSES_HOME_TIMELINE, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    pub async fn mentions_timeline(&self) -> Result<Vec<Value>> {
        tracing::debug!("mentions_timeline");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("include_entities", "true"),
            ("count", "200"),
            ("include_ext_alt_text", "true"),
        ]);
        let value = self
            .get(
                endpoints::STATUSES_MENTIONS_TIMELINE,
                query,
                Identity::Primary,
            )
            .await?;
        expect_array(value)
    }

    /// Own tweets that were recently retweeted by others.
    pub async fn retweet_timeline(&self) -> Result<Vec<Value>> {
        tracing::debug!("retweet_timeline");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("include_entities", "true"),
            ("trim_user", "false"),
            ("count", "10"),
            ("include_ext_alt_text", "true"),
        ]);
        let value = self
            .get(
                endpoints::STATUSES_RETWEETS_OF_ME,
                query,
                Identity::Primary,
            )
            .await?;
        expect_array(value)
    }

    /// A user's timeline, with the blocked-requester fallback: when the
    /// primary identity gets vendor code 136 and a secret identity is
    /// configured, the request is resubmitted once under the secret identity.
    pub async fn user_timeline(&self, screen_name: &str) -> Result<Vec<Value>> {
        match self.user_timeline_as(screen_name, Identity::Primary).await {
            Err(err) if self.can_fall_back(&err, Identity::Primary) => {
                tracing::debug!(screen_name, "blocked, retrying with secret identity");
                self.user_timeline_as(screen_name, Identity::Secret).await
            }
            other => other,
        }
    }

    async fn user_timeline_as(
        &self,
        screen_name: &str,
        identity: Identity,
    ) -> Result<Vec<Value>> {
        tracing::debug!(screen_name, ?identity, "user_timeline");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("count", "200"),
            ("include_rts", "true"),
            ("exclude_replies", "false"),
            ("screen_name", screen_name),
            ("include_ext_alt_text", "true"),
        ]);
        let value = self
            .get(endpoints::STATUSES_USER_TIMELINE, query, identity)
            .await?;
        expect_array(value)
    }

    pub async fn list_timeline(&self, list_id: &str, max_id: Option<&str>) -> Result<Vec<Value>> {
        tracing::debug!(list_id, ?max_id, "list_timeline");
        let mut query = params(&[
            ("tweet_mode", "extended"),
            ("list_id", list_id),
            ("count", "200"),
            ("include_ext_alt_text", "true"),
        ]);
        if let Some(max) = max_id {
            query.push(("max_id".into(), max.into()));
        }
        let value = self
            .get(endpoints::LISTS_STATUSES, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    pub async fn favorites(&self, screen_name: &str) -> Result<Vec<Value>> {
        tracing::debug!(screen_name, "favorites");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("count", "200"),
            ("include_entities", "true"),
            ("screen_name", screen_name),
            ("include_ext_alt_text", "true"),
        ]);
        let value = self
            .get(endpoints::FAVORITES_LIST, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    // ---- single statuses ----

    /// Load one status. Falls back to the secret identity on vendor code
    /// 136; if the status still cannot be loaded, a placeholder tweet is
    /// returned as a success so conversation views keep their node.
    pub async fn show_status(&self, status_id: &str) -> Result<Value> {
        let id = sanitize_status_id(status_id);
        let first = self.show_status_as(id, Identity::Primary).await;
        let terminal = match first {
            Ok(value) => return Ok(value),
            Err(err) if self.can_fall_back(&err, Identity::Primary) => {
                tracing::debug!(status_id = id, "blocked, retrying with secret identity");
                match self.show_status_as(id, Identity::Secret).await {
                    Ok(value) => return Ok(value),
                    Err(err) => err,
                }
            }
            Err(err) => err,
        };
        match terminal {
            err @ (TwitterError::Http(HttpError::Api { .. })
            | TwitterError::Http(HttpError::Network(_))) => {
                tracing::warn!(status_id = id, message = %err.user_message(), "status unavailable, delivering placeholder");
                Ok(placeholder_tweet(id, &err.user_message()))
            }
            err => Err(err),
        }
    }

    async fn show_status_as(&self, status_id: &str, identity: Identity) -> Result<Value> {
        tracing::debug!(status_id, ?identity, "show_status");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("include_entities", "true"),
            ("trim_user", "false"),
            ("id", status_id),
            ("include_ext_alt_text", "true"),
        ]);
        let value = self
            .get(endpoints::STATUSES_SHOW, query, identity)
            .await?;
        expect_object(value)
    }

    pub async fn retweet(&self, status_id: &str) -> Result<Value> {
        tracing::debug!(status_id, "retweet");
        let url = endpoints::with_id(endpoints::STATUSES_RETWEET, status_id);
        let form = params(&[("tweet_mode", "extended")]);
        let value = self.post_form(&url, form, Identity::Primary).await?;
        expect_object(value)
    }

    /// The most recent retweets of a status, together with the id they
    /// belong to so completion events can be routed.
    pub async fn retweets_for(&self, status_id: &str) -> Result<(String, Vec<Value>)> {
        tracing::debug!(status_id, "retweets_for");
        let url = endpoints::with_id(endpoints::STATUSES_RETWEETS_FOR, status_id);
        let query = params(&[
            ("tweet_mode", "extended"),
            ("count", "21"),
            ("trim_user", "false"),
        ]);
        let value = self.get(&url, query, Identity::Primary).await?;
        Ok((status_id.to_string(), expect_array(value)?))
    }

    pub async fn unretweet(&self, status_id: &str) -> Result<Value> {
        tracing::debug!(status_id, "unretweet");
        let url = endpoints::with_id(endpoints::STATUSES_UNRETWEET, status_id);
        let form = params(&[("tweet_mode", "extended")]);
        let value = self.post_form(&url, form, Identity::Primary).await?;
        expect_object(value)
    }

    pub async fn destroy_tweet(&self, status_id: &str) -> Result<Value> {
        tracing::debug!(status_id, "destroy_tweet");
        let url = endpoints::with_id(endpoints::STATUSES_DESTROY, status_id);
        let form = params(&[("tweet_mode", "extended")]);
        let value = self.post_form(&url, form, Identity::Primary).await?;
        expect_object(value)
    }

    // ---- users & relationships ----

    pub async fn show_user(&self, screen_name: &str) -> Result<Value> {
        tracing::debug!(screen_name, "show_user");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("include_entities", "true"),
            ("screen_name", screen_name),
        ]);
        let value = self
            .get(endpoints::USERS_SHOW, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn show_user_by_id(&self, user_id: &str) -> Result<Value> {
        tracing::debug!(user_id, "show_user_by_id");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("include_entities", "true"),
            ("user_id", user_id),
        ]);
        let value = self
            .get(endpoints::USERS_SHOW, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn followers(&self, screen_name: &str) -> Result<Value> {
        tracing::debug!(screen_name, "followers");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("screen_name", screen_name),
            ("count", "200"),
            ("skip_status", "true"),
            ("include_user_entities", "true"),
        ]);
        let value = self
            .get(endpoints::FOLLOWERS_LIST, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn friends(&self, screen_name: &str, cursor: Option<&str>) -> Result<Value> {
        tracing::debug!(screen_name, ?cursor, "friends");
        let mut query = params(&[
            ("tweet_mode", "extended"),
            ("screen_name", screen_name),
            ("count", "200"),
            ("skip_status", "true"),
            ("include_user_entities", "true"),
        ]);
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("cursor".into(), cursor.into()));
        }
        let value = self
            .get(endpoints::FRIENDS_LIST, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    /// Follow a user. The returned object is patched to `following: true`;
    /// the API sometimes still reports the pre-request value.
    pub async fn follow_user(&self, screen_name: &str) -> Result<Value> {
        tracing::debug!(screen_name, "follow_user");
        let form = params(&[("tweet_mode", "extended"), ("screen_name", screen_name)]);
        let value = self
            .post_form(endpoints::FRIENDSHIPS_CREATE, form, Identity::Primary)
            .await?;
        Ok(force_following(expect_object(value)?, true))
    }

    /// Unfollow a user; patched to `following: false`, mirroring
    /// [`TwitterApi::follow_user`].
    pub async fn unfollow_user(&self, screen_name: &str) -> Result<Value> {
        tracing::debug!(screen_name, "unfollow_user");
        let form = params(&[("tweet_mode", "extended"), ("screen_name", screen_name)]);
        let value = self
            .post_form(endpoints::FRIENDSHIPS_DESTROY, form, Identity::Primary)
            .await?;
        Ok(force_following(expect_object(value)?, false))
    }

    // ---- search ----

    /// Search recent tweets. An empty query short-circuits to an empty
    /// result without touching the network; duplicates caused by retweets
    /// are collapsed to the first occurrence.
    pub async fn search_tweets(&self, query: &str) -> Result<Vec<Value>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(query, "search_tweets");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("q", query),
            ("count", "100"),
            ("include_entities", "true"),
            ("include_ext_alt_text", "true"),
        ]);
        let value = self
            .get(endpoints::SEARCH_TWEETS, query, Identity::Primary)
            .await?;
        if !value.is_object() {
            return Err(TwitterError::UnexpectedShape);
        }
        // A response object without "statuses" is a valid empty result.
        let statuses = match value.get("statuses") {
            Some(statuses) => expect_array(statuses.clone())?,
            None => Vec::new(),
        };
        Ok(dedupe_search_statuses(statuses))
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<Value>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(query, "search_users");
        let query = params(&[
            ("tweet_mode", "extended"),
            ("q", query),
            ("count", "20"),
            ("include_entities", "true"),
        ]);
        let value = self
            .get(endpoints::USERS_SEARCH, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    /// Reverse-geocode a coordinate to the single nearest place.
    pub async fn search_geo(&self, latitude: &str, longitude: &str) -> Result<Value> {
        tracing::debug!(latitude, longitude, "search_geo");
        let query = params(&[
            ("lat", latitude),
            ("long", longitude),
            ("max_results", "1"),
        ]);
        let value = self
            .get(endpoints::GEO_SEARCH, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    // ---- engagement ----

    pub async fn favorite(&self, status_id: &str) -> Result<Value> {
        tracing::debug!(status_id, "favorite");
        let form = params(&[("tweet_mode", "extended"), ("id", status_id)]);
        let value = self
            .post_form(endpoints::FAVORITES_CREATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn unfavorite(&self, status_id: &str) -> Result<Value> {
        tracing::debug!(status_id, "unfavorite");
        let form = params(&[("tweet_mode", "extended"), ("id", status_id)]);
        let value = self
            .post_form(endpoints::FAVORITES_DESTROY, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    // ---- direct messages ----

    pub async fn direct_messages_list(&self, cursor: Option<&str>) -> Result<Value> {
        tracing::debug!(?cursor, "direct_messages_list");
        let mut query = params(&[("count", "50")]);
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("cursor".into(), cursor.into()));
        }
        let value = self
            .get(endpoints::DIRECT_MESSAGES_LIST, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn direct_messages_new(&self, text: &str, recipient_id: &str) -> Result<Value> {
        tracing::debug!(recipient_id, "direct_messages_new");
        let body = json!({
            "event": {
                "type": "message_create",
                "message_create": {
                    "target": { "recipient_id": recipient_id },
                    "message_data": { "text": text },
                },
            },
        });
        let value = self
            .post_json(endpoints::DIRECT_MESSAGES_NEW, body, Identity::Primary)
            .await?;
        expect_object(value)
    }

    // ---- trends & places ----

    pub async fn trends(&self, place_id: &str) -> Result<Vec<Value>> {
        tracing::debug!(place_id, "trends");
        let query = params(&[("id", place_id)]);
        let value = self
            .get(endpoints::TRENDS_PLACE, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    pub async fn places_for_trends(&self, latitude: &str, longitude: &str) -> Result<Vec<Value>> {
        tracing::debug!(latitude, longitude, "places_for_trends");
        let query = params(&[("lat", latitude), ("long", longitude)]);
        let value = self
            .get(endpoints::TRENDS_CLOSEST, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    // ---- lists ----

    pub async fn user_lists(&self) -> Result<Vec<Value>> {
        tracing::debug!("user_lists");
        let query = params(&[("reverse", "true")]);
        let value = self
            .get(endpoints::LISTS_LIST, query, Identity::Primary)
            .await?;
        expect_array(value)
    }

    pub async fn lists_memberships(&self) -> Result<Value> {
        tracing::debug!("lists_memberships");
        let query = params(&[("count", "100")]);
        let value = self
            .get(endpoints::LISTS_MEMBERSHIPS, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn list_members(&self, list_id: &str) -> Result<Value> {
        tracing::debug!(list_id, "list_members");
        let query = params(&[
            ("list_id", list_id),
            ("count", "200"),
            ("skip_status", "true"),
        ]);
        let value = self
            .get(endpoints::LISTS_MEMBERS, query, Identity::Primary)
            .await?;
        expect_object(value)
    }

    // ---- saved searches ----

    pub async fn saved_searches(&self) -> Result<Vec<Value>> {
        tracing::debug!("saved_searches");
        let value = self
            .get(endpoints::SAVED_SEARCHES_LIST, vec![], Identity::Primary)
            .await?;
        expect_array(value)
    }

    pub async fn save_search(&self, query: &str) -> Result<Value> {
        tracing::debug!(query, "save_search");
        let form = params(&[("query", query)]);
        let value = self
            .post_form(endpoints::SAVED_SEARCHES_CREATE, form, Identity::Primary)
            .await?;
        expect_object(value)
    }

    pub async fn destroy_saved_search(&self, id: &str) -> Result<Value> {
        tracing::debug!(id, "destroy_saved_search");
        let url = endpoints::with_id(endpoints::SAVED_SEARCHES_DESTROY, id);
        let value = self.post_form(&url, vec![], Identity::Primary).await?;
        expect_object(value)
    }
}
