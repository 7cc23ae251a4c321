use crate::error::Result;
use crate::record::SlinkRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// The storage contract every slink backend must satisfy.
///
/// Each call is expected to be atomic on its own; nothing spans calls. The
/// uniqueness guarantee therefore lives in [`save`](Self::save), which must
/// behave as a compare-and-set: of two concurrent callers racing for the same
/// code with different URLs, exactly one observes `Ok(true)`.
///
/// `Err` is reserved for backend failures. Contract rejections are reported
/// as `Ok(false)` / `Ok(None)`.
#[async_trait]
pub trait SlinkRepository: Send + Sync + 'static {
    /// Binds `code` to `url`, optionally recording `alias`.
    ///
    /// Returns `true` for a new record or an identical re-save (which leaves
    /// the stored record untouched). Returns `false` when `url` is empty, when
    /// `code` is bound to a different URL, or when `alias` is already bound
    /// elsewhere to a different URL.
    async fn save(&self, code: &ShortCode, url: &str, alias: Option<&ShortCode>) -> Result<bool>;

    /// Retrieves the record for a given code. Absence is not an error.
    async fn get(&self, code: &ShortCode) -> Result<Option<SlinkRecord>>;

    /// Atomically increments the click counter.
    /// Returns `false` if the code does not exist.
    async fn increment_click(&self, code: &ShortCode) -> Result<bool>;

    /// Returns a code already bound to `url`, if any.
    ///
    /// Should several codes map to the same URL, which one is returned is
    /// unspecified.
    async fn find_code_by_url(&self, url: &str) -> Result<Option<ShortCode>>;

    /// Returns `true` if `alias` is in use, either as a primary code or as a
    /// stored alias on any record.
    async fn alias_exists(&self, alias: &ShortCode) -> Result<bool>;

    /// Removes the record for a given code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;

    /// Marks the record as disabled without releasing its code.
    /// Returns `true` if the record existed.
    async fn disable(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
impl<T: SlinkRepository + ?Sized> SlinkRepository for std::sync::Arc<T> {
    async fn save(&self, code: &ShortCode, url: &str, alias: Option<&ShortCode>) -> Result<bool> {
        (**self).save(code, url, alias).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<SlinkRecord>> {
        (**self).get(code).await
    }

    async fn increment_click(&self, code: &ShortCode) -> Result<bool> {
        (**self).increment_click(code).await
    }

    async fn find_code_by_url(&self, url: &str) -> Result<Option<ShortCode>> {
        (**self).find_code_by_url(url).await
    }

    async fn alias_exists(&self, alias: &ShortCode) -> Result<bool> {
        (**self).alias_exists(alias).await
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        (**self).delete(code).await
    }

    async fn disable(&self, code: &ShortCode) -> Result<bool> {
        (**self).disable(code).await
    }
}
