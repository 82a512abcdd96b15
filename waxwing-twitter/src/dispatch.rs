//! Intent-based dispatch for UI frontends.
//!
//! A frontend sends [`Intent`]s down an mpsc channel and receives one
//! [`ApiEvent`] per intent. The dispatcher runs requests strictly one at a
//! time in submission order, so event consumers never see interleaved
//! completions.

use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::TwitterApi;
use crate::error::Result;

/// One logical API request.
#[derive(Clone, Debug)]
pub enum Intent {
    VerifyCredentials,
    AccountSettings,
    HelpConfiguration,
    HelpPrivacy,
    HelpTos,
    Tweet {
        text: String,
        place_id: Option<String>,
    },
    ReplyToTweet {
        text: String,
        reply_to_status_id: String,
        place_id: Option<String>,
    },
    RetweetWithComment {
        text: String,
        attachment_url: String,
        place_id: Option<String>,
    },
    TweetWithImages {
        text: String,
        media_ids: String,
        place_id: Option<String>,
    },
    ReplyToTweetWithImages {
        text: String,
        reply_to_status_id: String,
        media_ids: String,
        place_id: Option<String>,
    },
    HomeTimeline {
        max_id: Option<String>,
    },
    MentionsTimeline,
    RetweetTimeline,
    UserTimeline {
        screen_name: String,
    },
    ListTimeline {
        list_id: String,
        max_id: Option<String>,
    },
    Favorites {
        screen_name: String,
    },
    ShowStatus {
        status_id: String,
    },
    Retweet {
        status_id: String,
    },
    RetweetsFor {
        status_id: String,
    },
    Unretweet {
        status_id: String,
    },
    DestroyTweet {
        status_id: String,
    },
    ShowUser {
        screen_name: String,
    },
    ShowUserById {
        user_id: String,
    },
    Followers {
        screen_name: String,
    },
    Friends {
        screen_name: String,
        cursor: Option<String>,
    },
    FollowUser {
        screen_name: String,
    },
    UnfollowUser {
        screen_name: String,
    },
    SearchTweets {
        query: String,
    },
    SearchUsers {
        query: String,
    },
    SearchGeo {
        latitude: String,
        longitude: String,
    },
    Favorite {
        status_id: String,
    },
    Unfavorite {
        status_id: String,
    },
    DirectMessagesList {
        cursor: Option<String>,
    },
    DirectMessagesNew {
        text: String,
        recipient_id: String,
    },
    Trends {
        place_id: String,
    },
    PlacesForTrends {
        latitude: String,
        longitude: String,
    },
    UserLists,
    ListsMemberships,
    ListMembers {
        list_id: String,
    },
    SavedSearches,
    SaveSearch {
        query: String,
    },
    DestroySavedSearch {
        id: String,
    },
    UploadImage {
        path: PathBuf,
    },
    UploadImageDescription {
        media_id: String,
        description: String,
    },
    DownloadFile {
        url: String,
        target: PathBuf,
    },
    IpInfo,
}

impl Intent {
    /// Stable name used for event routing and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::VerifyCredentials => "verify_credentials",
            Intent::AccountSettings => "account_settings",
            Intent::HelpConfiguration => "help_configuration",
            Intent::HelpPrivacy => "help_privacy",
            Intent::HelpTos => "help_tos",
            Intent::Tweet { .. } => "tweet",
            Intent::ReplyToTweet { .. } => "reply_to_tweet",
            Intent::RetweetWithComment { .. } => "retweet_with_comment",
            Intent::TweetWithImages { .. } => "tweet_with_images",
            Intent::ReplyToTweetWithImages { .. } => "reply_to_tweet_with_images",
            Intent::HomeTimeline { .. } => "home_timeline",
            Intent::MentionsTimeline => "mentions_timeline",
            Intent::RetweetTimeline => "retweet_timeline",
            Intent::UserTimeline { .. } => "user_timeline",
            Intent::ListTimeline { .. } => "list_timeline",
            Intent::Favorites { .. } => "favorites",
            Intent::ShowStatus { .. } => "show_status",
            Intent::Retweet { .. } => "retweet",
            Intent::RetweetsFor { .. } => "retweets_for",
            Intent::Unretweet { .. } => "unretweet",
            Intent::DestroyTweet { .. } => "destroy_tweet",
            Intent::ShowUser { .. } => "show_user",
            Intent::ShowUserById { .. } => "show_user_by_id",
            Intent::Followers { .. } => "followers",
            Intent::Friends { .. } => "friends",
            Intent::FollowUser { .. } => "follow_user",
            Intent::UnfollowUser { .. } => "unfollow_user",
            Intent::SearchTweets { .. } => "search_tweets",
            Intent::SearchUsers { .. } => "search_users",
            Intent::SearchGeo { .. } => "search_geo",
            Intent::Favorite { .. } => "favorite",
            Intent::Unfavorite { .. } => "unfavorite",
            Intent::DirectMessagesList { .. } => "direct_messages_list",
            Intent::DirectMessagesNew { .. } => "direct_messages_new",
            Intent::Trends { .. } => "trends",
            Intent::PlacesForTrends { .. } => "places_for_trends",
            Intent::UserLists => "user_lists",
            Intent::ListsMemberships => "lists_memberships",
            Intent::ListMembers { .. } => "list_members",
            Intent::SavedSearches => "saved_searches",
            Intent::SaveSearch { .. } => "save_search",
            Intent::DestroySavedSearch { .. } => "destroy_saved_search",
            Intent::UploadImage { .. } => "upload_image",
            Intent::UploadImageDescription { .. } => "upload_image_description",
            Intent::DownloadFile { .. } => "download_file",
            Intent::IpInfo => "ip_info",
        }
    }

    /// Whether this intent continues an earlier result set (paging) rather
    /// than replacing it.
    pub fn is_incremental(&self) -> bool {
        match self {
            Intent::HomeTimeline { max_id } | Intent::ListTimeline { max_id, .. } => {
                max_id.is_some()
            }
            Intent::Friends { cursor, .. } | Intent::DirectMessagesList { cursor } => {
                cursor.is_some()
            }
            _ => false,
        }
    }
}

/// Successful result payload.
#[derive(Clone, Debug)]
pub enum Payload {
    Object(Value),
    Items(Vec<Value>),
    /// Operations that produce no body, like file downloads.
    Empty,
}

/// Completion notification for one intent.
#[derive(Clone, Debug)]
pub struct ApiEvent {
    pub intent: &'static str,
    /// Request-scoped routing key, e.g. the status id a retweet list
    /// belongs to.
    pub context: Option<String>,
    pub incremental: bool,
    /// The parsed payload, or a message fit for direct display.
    pub outcome: std::result::Result<Payload, String>,
}

/// Spawn the dispatcher task. Dropping the intent sender ends the task;
/// dropping the event receiver ends it on the next completion.
pub fn spawn(
    api: TwitterApi,
) -> (
    mpsc::Sender<Intent>,
    mpsc::Receiver<ApiEvent>,
    JoinHandle<()>,
) {
    let (intent_tx, mut intent_rx) = mpsc::channel::<Intent>(64);
    let (event_tx, event_rx) = mpsc::channel::<ApiEvent>(64);
    let handle = tokio::spawn(async move {
        while let Some(intent) = intent_rx.recv().await {
            let name = intent.name();
            let incremental = intent.is_incremental();
            let (context, outcome) = execute(&api, intent).await;
            let outcome = outcome.map_err(|err| {
                tracing::warn!(intent = name, error = %err, "request failed");
                err.user_message()
            });
            let event = ApiEvent {
                intent: name,
                context,
                incremental,
                outcome,
            };
            if event_tx.send(event).await.is_err() {
                break;
            }
        }
        tracing::debug!("dispatcher stopped");
    });
    (intent_tx, event_rx, handle)
}

async fn execute(api: &TwitterApi, intent: Intent) -> (Option<String>, Result<Payload>) {
    use Intent::*;
    match intent {
        VerifyCredentials => (None, api.verify_credentials().await.map(Payload::Object)),
        AccountSettings => (None, api.account_settings().await.map(Payload::Object)),
        HelpConfiguration => (None, api.help_configuration().await.map(Payload::Object)),
        HelpPrivacy => (None, api.help_privacy().await.map(Payload::Object)),
        HelpTos => (None, api.help_tos().await.map(Payload::Object)),
        Tweet { text, place_id } => (
            None,
            api.tweet(&text, place_id.as_deref())
                .await
                .map(Payload::Object),
        ),
        ReplyToTweet {
            text,
            reply_to_status_id,
            place_id,
        } => (
            None,
            api.reply_to_tweet(&text, &reply_to_status_id, place_id.as_deref())
                .await
                .map(Payload::Object),
        ),
        RetweetWithComment {
            text,
            attachment_url,
            place_id,
        } => (
            None,
            api.retweet_with_comment(&text, &attachment_url, place_id.as_deref())
                .await
                .map(Payload::Object),
        ),
        TweetWithImages {
            text,
            media_ids,
            place_id,
        } => (
            None,
            api.tweet_with_images(&text, &media_ids, place_id.as_deref())
                .await
                .map(Payload::Object),
        ),
        ReplyToTweetWithImages {
            text,
            reply_to_status_id,
            media_ids,
            place_id,
        } => (
            None,
            api.reply_to_tweet_with_images(
                &text,
                &reply_to_status_id,
                &media_ids,
                place_id.as_deref(),
            )
            .await
            .map(Payload::Object),
        ),
        HomeTimeline { max_id } => (
            None,
            api.home_timeline(max_id.as_deref()).await.map(Payload::Items),
        ),
        MentionsTimeline => (None, api.mentions_timeline().await.map(Payload::Items)),
        RetweetTimeline => (None, api.retweet_timeline().await.map(Payload::Items)),
        UserTimeline { screen_name } => (
            Some(screen_name.clone()),
            api.user_timeline(&screen_name).await.map(Payload::Items),
        ),
        ListTimeline { list_id, max_id } => (
            Some(list_id.clone()),
            api.list_timeline(&list_id, max_id.as_deref())
                .await
                .map(Payload::Items),
        ),
        Favorites { screen_name } => (
            Some(screen_name.clone()),
            api.favorites(&screen_name).await.map(Payload::Items),
        ),
        ShowStatus { status_id } => (
            Some(status_id.clone()),
            api.show_status(&status_id).await.map(Payload::Object),
        ),
        Retweet { status_id } => (None, api.retweet(&status_id).await.map(Payload::Object)),
        RetweetsFor { status_id } => match api.retweets_for(&status_id).await {
            Ok((id, items)) => (Some(id), Ok(Payload::Items(items))),
            Err(err) => (Some(status_id), Err(err)),
        },
        Unretweet { status_id } => (None, api.unretweet(&status_id).await.map(Payload::Object)),
        DestroyTweet { status_id } => {
            (None, api.destroy_tweet(&status_id).await.map(Payload::Object))
        }
        ShowUser { screen_name } => (
            Some(screen_name.clone()),
            api.show_user(&screen_name).await.map(Payload::Object),
        ),
        ShowUserById { user_id } => (
            Some(user_id.clone()),
            api.show_user_by_id(&user_id).await.map(Payload::Object),
        ),
        Followers { screen_name } => (
            Some(screen_name.clone()),
            api.followers(&screen_name).await.map(Payload::Object),
        ),
        Friends {
            screen_name,
            cursor,
        } => (
            Some(screen_name.clone()),
            api.friends(&screen_name, cursor.as_deref())
                .await
                .map(Payload::Object),
        ),
        FollowUser { screen_name } => (
            Some(screen_name.clone()),
            api.follow_user(&screen_name).await.map(Payload::Object),
        ),
        UnfollowUser { screen_name } => (
            Some(screen_name.clone()),
            api.unfollow_user(&screen_name).await.map(Payload::Object),
        ),
        SearchTweets { query } => (
            Some(query.clone()),
            api.search_tweets(&query).await.map(Payload::Items),
        ),
        SearchUsers { query } => (
            Some(query.clone()),
            api.search_users(&query).await.map(Payload::Items),
        ),
        SearchGeo {
            latitude,
            longitude,
        } => (
            None,
            api.search_geo(&latitude, &longitude)
                .await
                .map(Payload::Object),
        ),
        Favorite { status_id } => (None, api.favorite(&status_id).await.map(Payload::Object)),
        Unfavorite { status_id } => (None, api.unfavorite(&status_id).await.map(Payload::Object)),
        DirectMessagesList { cursor } => (
            None,
            api.direct_messages_list(cursor.as_deref())
                .await
                .map(Payload::Object),
        ),
        DirectMessagesNew { text, recipient_id } => (
            Some(recipient_id.clone()),
            api.direct_messages_new(&text, &recipient_id)
                .await
                .map(Payload::Object),
        ),
        Trends { place_id } => (
            Some(place_id.clone()),
            api.trends(&place_id).await.map(Payload::Items),
        ),
        PlacesForTrends {
            latitude,
            longitude,
        } => (
            None,
            api.places_for_trends(&latitude, &longitude)
                .await
                .map(Payload::Items),
        ),
        UserLists => (None, api.user_lists().await.map(Payload::Items)),
        ListsMemberships => (None, api.lists_memberships().await.map(Payload::Object)),
        ListMembers { list_id } => (
            Some(list_id.clone()),
            api.list_members(&list_id).await.map(Payload::Object),
        ),
        SavedSearches => (None, api.saved_searches().await.map(Payload::Items)),
        SaveSearch { query } => (
            Some(query.clone()),
            api.save_search(&query).await.map(Payload::Object),
        ),
        DestroySavedSearch { id } => (
            Some(id.clone()),
            api.destroy_saved_search(&id).await.map(Payload::Object),
        ),
        UploadImage { path } => (
            Some(path.display().to_string()),
            api.upload_image(&path).await.map(Payload::Object),
        ),
        UploadImageDescription {
            media_id,
            description,
        } => (
            Some(media_id.clone()),
            api.upload_image_description(&media_id, &description)
                .await
                .map(|()| Payload::Empty),
        ),
        DownloadFile { url, target } => (
            Some(target.display().to_string()),
            api.download_file(&url, &target)
                .await
                .map(|()| Payload::Empty),
        ),
        IpInfo => (None, api.ip_info().await.map(Payload::Object)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incremental_tracks_paging_parameters() {
        assert!(!Intent::HomeTimeline { max_id: None }.is_incremental());
        assert!(
            Intent::HomeTimeline {
                max_id: Some("900".into())
            }
            .is_incremental()
        );
        assert!(
            Intent::Friends {
                screen_name: "ed".into(),
                cursor: Some("17".into())
            }
            .is_incremental()
        );
        assert!(!Intent::MentionsTimeline.is_incremental());
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Intent::VerifyCredentials.name(), "verify_credentials");
        assert_eq!(
            Intent::RetweetsFor {
                status_id: "1".into()
            }
            .name(),
            "retweets_for"
        );
    }
}
