use crate::error::ManagerError;
use crate::settings::ManagerSettings;
use crate::Result;
use sha2::{Digest, Sha256};
use slink_core::{
    base62, AssumeReachable, ClickLogger, ClickSource, NoopClickLogger, ReachabilityChecker,
    ShortCode, SlinkRecord, SlinkRepository,
};
use slink_generator::{CodeStrategy, GeneratorError};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// A request to create a slink.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct CreateSlink {
    #[builder(setter(into))]
    pub url: String,
    /// Vanity code; an empty alias is treated as no alias.
    #[builder(default, setter(strip_option, into))]
    pub alias: Option<String>,
    /// Probe the destination before creating anything.
    #[builder(default)]
    pub check_reachable: bool,
}

impl CreateSlink {
    pub fn new(url: impl Into<String>) -> Self {
        Self::builder().url(url).build()
    }
}

/// Coordinates creation and lookup rules for slinks.
///
/// Creation runs as a fixed sequence of storage calls with no transaction
/// spanning them; the repository's `save` is the only uniqueness guarantee.
/// Two concurrent creations of the same brand-new URL with a
/// non-deterministic strategy may therefore both persist a code. Later
/// dedupe lookups settle on whichever one the repository indexed first.
pub struct SlinkManager<R, S> {
    repository: Arc<R>,
    strategy: Arc<S>,
    reachability: Arc<dyn ReachabilityChecker>,
    click_logger: Arc<dyn ClickLogger>,
    settings: ManagerSettings,
}

impl<R, S> Clone for SlinkManager<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            strategy: Arc::clone(&self.strategy),
            reachability: Arc::clone(&self.reachability),
            click_logger: Arc::clone(&self.click_logger),
            settings: self.settings.clone(),
        }
    }
}

impl<R: SlinkRepository, S: CodeStrategy> SlinkManager<R, S> {
    /// Creates a manager with default settings, no reachability probing and
    /// no click logging.
    pub fn new(repository: R, strategy: S) -> Self {
        Self {
            repository: Arc::new(repository),
            strategy: Arc::new(strategy),
            reachability: Arc::new(AssumeReachable),
            click_logger: Arc::new(NoopClickLogger),
            settings: ManagerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ManagerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_reachability_checker(mut self, checker: impl ReachabilityChecker) -> Self {
        self.reachability = Arc::new(checker);
        self
    }

    pub fn with_click_logger(mut self, logger: impl ClickLogger) -> Self {
        self.click_logger = Arc::new(logger);
        self
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates a slink and returns its code.
    ///
    /// With an alias, the alias itself becomes the code. Without one, an
    /// existing code for the same URL is returned if there is one; otherwise
    /// a fresh code is generated, extended on collision and persisted.
    pub async fn create_slink(&self, request: CreateSlink) -> Result<ShortCode> {
        let CreateSlink {
            url,
            alias,
            check_reachable,
        } = request;

        validate_url(&url)?;

        if check_reachable
            && !self
                .reachability
                .is_reachable(&url, self.settings.reachability_timeout)
                .await
        {
            return Err(ManagerError::UnreachableUrl(url));
        }

        match alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => {
                let alias = validate_alias(&alias)?;
                self.create_aliased(alias, &url).await
            }
            None => self.create_generated(&url).await,
        }
    }

    async fn create_aliased(&self, alias: ShortCode, url: &str) -> Result<ShortCode> {
        match self.repository.get(&alias).await? {
            Some(existing) if existing.url == url => {
                debug!(alias = %alias, "alias already points at this url");
                return Ok(alias);
            }
            Some(_) => return Err(ManagerError::AliasConflict(alias.to_string())),
            None => {}
        }

        if !self.repository.save(&alias, url, Some(&alias)).await? {
            return Err(ManagerError::PersistenceFailure(format!(
                "alias {alias} could not be saved"
            )));
        }

        debug!(alias = %alias, url, "created aliased slink");
        Ok(alias)
    }

    async fn create_generated(&self, url: &str) -> Result<ShortCode> {
        if let Some(code) = self.repository.find_code_by_url(url).await? {
            debug!(code = %code, "url already shortened");
            return Ok(code);
        }

        let length = self.settings.min_length;
        let mut code = self.candidate(url, length)?;

        if let Some(existing) = self.repository.get(&code).await? {
            if existing.url == url {
                return Ok(code);
            }

            trace!(code = %code, "code collides with another url, extending");
            code = match self.extend(url, length).await? {
                Some(extended) => extended,
                None => self.salted_fallback(url, &existing.url),
            };
        }

        if !self.repository.save(&code, url, None).await? {
            return Err(ManagerError::PersistenceFailure(format!(
                "code {code} could not be saved"
            )));
        }

        debug!(code = %code, url, "created slink");
        Ok(code)
    }

    fn candidate(&self, url: &str, length: usize) -> Result<ShortCode> {
        // Generated codes only need the alphabet; the length cap is for aliases.
        let raw = self.strategy.generate(url, Some(length), 0)?;
        if !base62::is_base62(&raw) {
            return Err(GeneratorError::InvalidCode(raw).into());
        }
        Ok(ShortCode::new_unchecked(raw))
    }

    /// Tries `length + 1 ..= length + max_extra`, returning the first free code.
    async fn extend(&self, url: &str, length: usize) -> Result<Option<ShortCode>> {
        for extra in 1..=self.settings.max_extra {
            let candidate = self.candidate(url, length + extra)?;
            if self.repository.get(&candidate).await?.is_none() {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Derives a code from both colliding URLs, longer than any extension.
    fn salted_fallback(&self, url: &str, existing_url: &str) -> ShortCode {
        let digest = Sha256::digest(format!("{url}-{existing_url}").as_bytes());
        let mut encoded = base62::encode_bytes(&digest);
        encoded.truncate(self.settings.fallback_length());

        warn!(
            code = %encoded,
            max_extra = self.settings.max_extra,
            "extensions exhausted, using salted fallback code"
        );
        ShortCode::new_unchecked(encoded)
    }

    /// Follows a code the way a redirect does.
    ///
    /// Every attempt is reported to the click logger. Unknown, malformed and
    /// disabled codes yield `None`; otherwise the click is counted and the
    /// updated record is returned.
    pub async fn resolve(&self, code: &str, source: ClickSource) -> Result<Option<SlinkRecord>> {
        let record = match lookup_code(code) {
            Some(code) => self.repository.get(&code).await?,
            None => None,
        };

        let Some(mut record) = record.filter(SlinkRecord::is_active) else {
            trace!(code, "lookup missed");
            self.click_logger.log_click(code, source, false);
            return Ok(None);
        };

        self.click_logger.log_click(code, source, true);
        if !self.repository.increment_click(&record.code).await? {
            // Deleted between the read and the increment.
            return Ok(None);
        }
        record.clicks = record.clicks.saturating_add(1);
        Ok(Some(record))
    }

    /// Looks a code up without counting a click.
    pub async fn get(&self, code: &str) -> Result<Option<SlinkRecord>> {
        match lookup_code(code) {
            Some(code) => Ok(self.repository.get(&code).await?),
            None => Ok(None),
        }
    }

    /// Stops a code from resolving while keeping it reserved.
    pub async fn disable(&self, code: &str) -> Result<bool> {
        match lookup_code(code) {
            Some(code) => Ok(self.repository.disable(&code).await?),
            None => Ok(false),
        }
    }

    pub async fn delete(&self, code: &str) -> Result<bool> {
        match lookup_code(code) {
            Some(code) => Ok(self.repository.delete(&code).await?),
            None => Ok(false),
        }
    }
}

/// Accepts only `http`/`https` URLs with a non-empty host.
pub fn validate_url(url: &str) -> Result<Url> {
    let invalid = || ManagerError::InvalidUrlFormat(url.to_string());

    // `Url::parse` recovers a host from `https:///path`, so check the raw authority first.
    let (_, rest) = url.split_once("://").ok_or_else(invalid)?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if authority.is_empty() {
        return Err(invalid());
    }

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none_or(str::is_empty)
    {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Any Base62 string can name a stored code, including generated codes
/// longer than the alias limit.
fn lookup_code(code: &str) -> Option<ShortCode> {
    base62::is_base62(code).then(|| ShortCode::new_unchecked(code))
}

/// Aliases follow the short-code rules: Base62 only, at most 32 characters.
pub fn validate_alias(alias: &str) -> Result<ShortCode> {
    Ok(ShortCode::new(alias)?)
}
