//! Media uploads, plain-file downloads, and the connection info lookup.
//!
//! Uploads go to the dedicated upload host and are the only multipart
//! requests in the crate; downloads and the IP lookup are unsigned.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use waxwing_http::RequestOpts;

use crate::client::{Identity, TwitterApi};
use crate::endpoints;
use crate::error::Result;
use crate::shape::expect_object;

impl TwitterApi {
    /// Upload one image for attachment to a later tweet. Returns the media
    /// object; its `media_id_string` is what `tweet_with_images` wants.
    pub async fn upload_image(&self, path: &Path) -> Result<Value> {
        tracing::debug!(path = %path.display(), "upload_image");
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| waxwing_http::HttpError::Build(e.to_string()))?;
        let form = Form::new().part("media", part);
        // Multipart fields stay out of the OAuth signature.
        let auth = self.auth_for(
            self.upload_http(),
            "POST",
            endpoints::MEDIA_UPLOAD,
            &[],
            Identity::Primary,
        )?;
        let opts = RequestOpts {
            auth,
            ..Default::default()
        };
        let value = self
            .upload_http()
            .post_multipart(endpoints::MEDIA_UPLOAD, form, opts)
            .await?;
        expect_object(value)
    }

    /// Attach alt text to an uploaded image.
    pub async fn upload_image_description(
        &self,
        media_id: &str,
        description: &str,
    ) -> Result<()> {
        tracing::debug!(media_id, "upload_image_description");
        let body = json!({
            "media_id": media_id,
            "alt_text": { "text": description },
        });
        let auth = self.auth_for(
            self.upload_http(),
            "POST",
            endpoints::MEDIA_METADATA_CREATE,
            &[],
            Identity::Primary,
        )?;
        let opts = RequestOpts {
            auth,
            ..Default::default()
        };
        self.upload_http()
            .post_json_discard(endpoints::MEDIA_METADATA_CREATE, &body, opts)
            .await?;
        Ok(())
    }

    /// Fetch an arbitrary URL (media attachments, profile images) to disk.
    /// These URLs point at CDN hosts and are not signed.
    pub async fn download_file(&self, url: &str, target: &Path) -> Result<()> {
        tracing::debug!(url, target = %target.display(), "download_file");
        let bytes = self.http().get_bytes(url, RequestOpts::default()).await?;
        tokio::fs::write(target, bytes).await?;
        Ok(())
    }

    /// Geo and network information about the current connection, from
    /// ipinfo.io rather than Twitter.
    pub async fn ip_info(&self) -> Result<Value> {
        tracing::debug!("ip_info");
        let value = self
            .http()
            .get_json(endpoints::IP_INFO, RequestOpts::default())
            .await?;
        expect_object(value)
    }
}
