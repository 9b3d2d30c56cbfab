//! Pasted media links - Normalization and verify-or-discard ingestion.
//!
//! Operators paste links from file-sharing services. Share links that embed a
//! file id (`.../file/d/<id>/view`) are rewritten into directly renderable
//! links; anything else is only stripped of whitespace.
//!
//! Image links are appended optimistically and then probed. If neither the
//! normalized link nor any fallback renders before the timeout, the link is
//! taken back out and the operator gets [`Error::MediaUnreachable`].

use async_trait::async_trait;
use regex::Regex;
use std::{sync::LazyLock, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    core::{
        matrix::{VariantKey, VariantMatrix},
        media::MediaKind,
    },
    errors::{Error, Result},
};

static SHARE_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").ok());

fn strip_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect()
}

/// File id embedded in a share link, if `raw` is one.
#[must_use]
pub fn share_file_id(raw: &str) -> Option<String> {
    let cleaned = strip_whitespace(raw);
    SHARE_LINK
        .as_ref()?
        .captures(&cleaned)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

/// Rewrites a pasted image link into a directly renderable one.
#[must_use]
pub fn normalize_image_url(raw: &str) -> String {
    share_file_id(raw).map_or_else(
        || strip_whitespace(raw),
        |id| format!("https://drive.google.com/thumbnail?id={id}&sz=w1200"),
    )
}

/// Rewrites a pasted video link into a directly playable one.
#[must_use]
pub fn normalize_video_url(raw: &str) -> String {
    share_file_id(raw).map_or_else(
        || strip_whitespace(raw),
        |id| format!("https://drive.google.com/uc?export=view&id={id}"),
    )
}

/// Alternative image links to try, in order, when the normalized link fails.
/// Empty for links that are not share links.
#[must_use]
pub fn image_fallbacks(raw: &str) -> Vec<String> {
    share_file_id(raw).map_or_else(Vec::new, |id| {
        vec![
            format!("https://drive.google.com/uc?export=view&id={id}"),
            format!("https://drive.google.com/thumbnail?id={id}&sz=w800"),
            format!("https://drive.google.com/thumbnail?id={id}&sz=w600"),
            format!("https://drive.google.com/thumbnail?id={id}&sz=w400"),
        ]
    })
}

/// Checks whether a link serves something the storefront can render.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// True if `url` currently serves a renderable image.
    async fn is_renderable(&self, url: &str) -> bool;
}

/// Probes links over HTTP: a 2xx answer with an `image/*` content type passes.
#[derive(Clone, Debug, Default)]
pub struct HttpMediaProbe {
    client: reqwest::Client,
}

impl HttpMediaProbe {
    /// Probe backed by an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaProbe for HttpMediaProbe {
    async fn is_renderable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => {
                response.status().is_success()
                    && response
                        .headers()
                        .get(reqwest::header::CONTENT_TYPE)
                        .and_then(|value| value.to_str().ok())
                        .is_some_and(|content_type| content_type.starts_with("image/"))
            }
            Err(e) => {
                debug!("Probe request for {url} failed: {e}");
                false
            }
        }
    }
}

async fn first_renderable<P>(probe: &P, candidates: &[String]) -> Option<String>
where
    P: MediaProbe + ?Sized,
{
    for candidate in candidates {
        if probe.is_renderable(candidate).await {
            return Some(candidate.clone());
        }
        debug!("Image link did not render: {candidate}");
    }
    None
}

/// Adds a pasted image link to one variant, keeping it only if it renders.
///
/// The normalized link is appended right away. The probe then tries it and
/// the fallbacks in order, all within `timeout`; the first one that renders
/// replaces the appended link. On failure the appended link is removed again.
///
/// # Errors
/// Returns an error if:
/// - The pasted link is blank
/// - No record has this key
/// - No candidate rendered before the timeout ([`Error::MediaUnreachable`])
pub async fn ingest_image_url<P>(
    matrix: &mut VariantMatrix,
    key: &VariantKey,
    raw: &str,
    probe: &P,
    timeout: Duration,
) -> Result<String>
where
    P: MediaProbe + ?Sized,
{
    let pasted = raw.trim();
    if pasted.is_empty() {
        return Err(Error::Validation {
            message: "Image link cannot be empty".to_string(),
        });
    }

    let normalized = normalize_image_url(pasted);
    matrix.add_media(key, std::slice::from_ref(&normalized), MediaKind::Image)?;

    let mut candidates = vec![normalized.clone()];
    candidates.extend(image_fallbacks(pasted));

    let outcome = tokio::time::timeout(timeout, first_renderable(probe, &candidates)).await;
    match outcome {
        Ok(Some(working)) => {
            if working != normalized {
                replace_last(matrix, key, &normalized, Some(&working))?;
            }
            info!(variant = %key, "Image link verified: {working}");
            Ok(working)
        }
        Ok(None) | Err(_) => {
            replace_last(matrix, key, &normalized, None)?;
            warn!(variant = %key, "Discarded image link that did not render: {pasted}");
            Err(Error::MediaUnreachable {
                url: pasted.to_string(),
            })
        }
    }
}

/// Adds a pasted video link to one variant after normalizing it.
///
/// # Errors
/// Returns an error if the link is blank or no record has this key.
pub fn ingest_video_url(matrix: &mut VariantMatrix, key: &VariantKey, raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::Validation {
            message: "Video link cannot be empty".to_string(),
        });
    }

    let normalized = normalize_video_url(raw);
    matrix.add_media(key, std::slice::from_ref(&normalized), MediaKind::Video)?;
    Ok(normalized)
}

/// Swaps the last occurrence of `appended` for `replacement`, or drops it.
fn replace_last(
    matrix: &mut VariantMatrix,
    key: &VariantKey,
    appended: &str,
    replacement: Option<&str>,
) -> Result<()> {
    let record = matrix.record_mut(key)?;
    let images = record.media_mut(MediaKind::Image);
    if let Some(position) = images.iter().rposition(|url| url == appended) {
        match replacement {
            Some(url) => images[position] = url.to_string(),
            None => {
                images.remove(position);
            }
        }
        record.touch();
    }
    Ok(())
}
