//! Short link lifecycle: creation, resolution, inspection and deletion.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::clock::Clock;
use crate::domain::entities::{Link, NewAccessEvent, NewLink};
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::token_generator::{generate_token, validate_alias};
use crate::utils::url_validator::validate_target_url;

/// Attempts at finding a free random token before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Builds the fully-qualified short URL for a token.
///
/// Trailing slashes on `base_url` are ignored, so `http://s/` and `http://s`
/// produce the same short URLs.
pub fn format_short_url(base_url: &str, token: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), token)
}

/// Settings that shape newly created links.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Base every short URL starts with, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Lifetime applied when a create request carries no expiry.
    pub default_ttl: Duration,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            default_ttl: Duration::days(1),
        }
    }
}

/// Validated-shape input for [`LinkService::create_link`].
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub original_url: String,
    pub alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service owning the life of a short link.
///
/// Enforces alias uniqueness, generates tokens, evaluates expiry and keeps
/// the click counter and the access log in step.
///
/// Visits hold `lifecycle` shared while they write the counter and the event;
/// deletion holds it exclusively. A delete therefore never runs between the
/// two writes of a visit, and no event outlives its link.
pub struct LinkService<L: LinkRepository + ?Sized, A: AnalyticsRepository + ?Sized> {
    link_repository: Arc<L>,
    analytics_repository: Arc<A>,
    clock: Arc<dyn Clock>,
    settings: LinkSettings,
    lifecycle: RwLock<()>,
}

impl<L: LinkRepository + ?Sized, A: AnalyticsRepository + ?Sized> LinkService<L, A> {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<L>,
        analytics_repository: Arc<A>,
        clock: Arc<dyn Clock>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            link_repository,
            analytics_repository,
            clock,
            settings,
            lifecycle: RwLock::new(()),
        }
    }

    /// Concatenates the configured base URL and `token`.
    pub fn format_short_url(&self, token: &str) -> String {
        format_short_url(&self.settings.base_url, token)
    }

    /// Returns the short URL for `alias`, or for a fresh random token when no
    /// alias is given.
    pub fn generate_short_url(&self, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => self.format_short_url(alias),
            None => self.format_short_url(&generate_token()),
        }
    }

    /// Returns a short URL that is not currently stored.
    ///
    /// The check is advisory: [`LinkRepository::add`] re-checks under its lock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `alias` is already taken.
    /// Returns [`AppError::Internal`] if no free random token is found after
    /// 10 attempts.
    pub async fn ensure_unique_short_url(&self, alias: Option<&str>) -> Result<String, AppError> {
        if let Some(alias) = alias {
            let short_url = self.format_short_url(alias);
            if self
                .link_repository
                .find_by_short_url(&short_url)
                .await?
                .is_some()
            {
                return Err(alias_taken(&short_url));
            }
            return Ok(short_url);
        }

        for _ in 0..MAX_ATTEMPTS {
            let short_url = self.generate_short_url(None);
            if self
                .link_repository
                .find_by_short_url(&short_url)
                .await?
                .is_none()
            {
                return Ok(short_url);
            }
            debug!(short_url, "Generated token collided, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique short URL",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Creates a short link.
    ///
    /// When `expires_at` is absent the link expires `default_ttl` after
    /// creation (one day unless configured otherwise).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or alias is invalid.
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] if the link cannot be persisted.
    pub async fn create_link(&self, request: CreateLink) -> Result<Link, AppError> {
        validate_target_url(&request.original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(alias) = &request.alias {
            validate_alias(alias)?;
        }

        let now = self.clock.now();
        let expires_at = request
            .expires_at
            .unwrap_or(now + self.settings.default_ttl);

        let mut attempts = 0;
        loop {
            let short_url = self
                .ensure_unique_short_url(request.alias.as_deref())
                .await?;

            let new_link = NewLink {
                original_url: request.original_url.clone(),
                short_url,
                created_at: now,
                expires_at: Some(expires_at),
            };

            match self.link_repository.add(new_link).await {
                Ok(link) => {
                    info!(
                        short_url = %link.short_url,
                        expires_at = %expires_at,
                        "Short link created"
                    );
                    return Ok(link);
                }
                // Another request stored the same random token after our
                // presence check.
                Err(AppError::Conflict { .. })
                    if request.alias.is_none() && attempts < MAX_ATTEMPTS =>
                {
                    attempts += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolves a token for a redirect and records the visit.
    ///
    /// On success the click counter is incremented and one access event with
    /// `client_ip` and the current time is appended.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the token.
    /// Returns [`AppError::Expired`] if the link expired; nothing is recorded.
    /// Returns [`AppError::Internal`] if the visit cannot be persisted.
    pub async fn resolve(&self, token: &str, client_ip: &str) -> Result<Link, AppError> {
        let short_url = self.format_short_url(token);

        let link = self
            .link_repository
            .find_by_short_url(&short_url)
            .await?
            .ok_or_else(|| link_not_found(&short_url))?;

        let now = self.clock.now();
        if link.is_expired_at(now) {
            debug!(short_url, "Expired link requested");
            return Err(AppError::expired(
                "Link expired",
                json!({ "short_url": short_url, "expires_at": link.expires_at }),
            ));
        }

        let _visit = self.lifecycle.read().await;

        let link = self
            .link_repository
            .increment_clicks(&short_url)
            .await?
            .ok_or_else(|| link_not_found(&short_url))?;

        self.analytics_repository
            .append(NewAccessEvent {
                short_url: short_url.clone(),
                ip: client_ip.to_string(),
                opened_date: now,
            })
            .await?;

        debug!(short_url, clicks = link.click_count, "Link resolved");
        Ok(link)
    }

    /// Returns a link without side effects.
    ///
    /// Expired links are still returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the token.
    pub async fn get_info(&self, token: &str) -> Result<Link, AppError> {
        let short_url = self.format_short_url(token);

        self.link_repository
            .find_by_short_url(&short_url)
            .await?
            .ok_or_else(|| link_not_found(&short_url))
    }

    /// Deletes a link and then all of its access events.
    ///
    /// The two removals are separate writes, not a transaction.
    ///
    /// Returns `Ok(false)` if no link matched the token; events are left
    /// alone in that case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if either store cannot be written.
    pub async fn delete_link(&self, token: &str) -> Result<bool, AppError> {
        let short_url = self.format_short_url(token);
        let _exclusive = self.lifecycle.write().await;

        if !self
            .link_repository
            .delete_by_short_url(&short_url)
            .await?
        {
            return Ok(false);
        }

        let removed_events = self
            .analytics_repository
            .delete_by_short_url(&short_url)
            .await?;

        info!(short_url, removed_events, "Short link deleted");
        Ok(true)
    }
}

fn link_not_found(short_url: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "short_url": short_url }))
}

fn alias_taken(short_url: &str) -> AppError {
    AppError::conflict(
        "Url with this alias already exists",
        json!({ "short_url": short_url }),
    )
}
