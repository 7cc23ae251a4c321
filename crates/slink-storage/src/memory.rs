use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use slink_core::error::Result;
use slink_core::{ShortCode, SlinkRecord, SlinkRepository};
use tracing::trace;

/// Outcome of claiming an alias for a code.
enum AliasClaim {
    /// The alias was free and now belongs to the code.
    Claimed,
    /// The alias already belonged to the code.
    AlreadyOwned,
    /// The alias belongs to someone else.
    Taken,
}

/// The record an alias was claimed for.
#[derive(Debug, Clone)]
struct AliasOwner {
    code: ShortCode,
    url: String,
}

/// In-memory implementation of the [`SlinkRepository`] contract using DashMap.
///
/// Records are keyed by code. Two secondary indexes keep the contract's
/// lookups O(1): URL → first code saved for it, and alias → owning record.
///
/// Guards are only ever nested with `records` outermost, inside
/// [`save`](SlinkRepository::save). An alias claim never holds its `aliases`
/// guard while reading `records`.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: DashMap<ShortCode, SlinkRecord>,
    by_url: DashMap<String, ShortCode>,
    aliases: DashMap<ShortCode, AliasOwner>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
            by_url: DashMap::with_capacity(capacity),
            aliases: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `true` if `code` is some other record's alias and that record points
    /// somewhere other than `url`.
    fn aliased_elsewhere(&self, code: &ShortCode, url: &str) -> bool {
        self.aliases
            .get(code)
            .is_some_and(|owner| owner.code != *code && owner.url != url)
    }

    fn claim_alias(&self, alias: &ShortCode, code: &ShortCode, url: &str) -> AliasClaim {
        let shadows_code = || alias != code && self.records.contains_key(alias);

        // An alias may not shadow another record's primary code.
        if shadows_code() {
            return AliasClaim::Taken;
        }

        match self.aliases.entry(alias.clone()) {
            Entry::Occupied(owner) if owner.get().code == *code => return AliasClaim::AlreadyOwned,
            Entry::Occupied(_) => return AliasClaim::Taken,
            Entry::Vacant(slot) => {
                slot.insert(AliasOwner {
                    code: code.clone(),
                    url: url.to_owned(),
                });
            }
        }

        // A record saved under the alias's name may have landed between the
        // check above and the claim. Such a save checks `aliases` while
        // holding its `records` entry, so one of the two always sees the other.
        if shadows_code() {
            self.release_alias(alias, code);
            return AliasClaim::Taken;
        }
        AliasClaim::Claimed
    }

    fn release_alias(&self, alias: &ShortCode, code: &ShortCode) {
        self.aliases.remove_if(alias, |_, owner| owner.code == *code);
    }
}

#[async_trait]
impl SlinkRepository for InMemoryRepository {
    async fn save(&self, code: &ShortCode, url: &str, alias: Option<&ShortCode>) -> Result<bool> {
        if url.is_empty() {
            return Ok(false);
        }

        let claimed = match alias {
            Some(alias) => match self.claim_alias(alias, code, url) {
                AliasClaim::Taken => {
                    trace!(code = %code, alias = %alias, "alias already bound elsewhere");
                    return Ok(false);
                }
                AliasClaim::Claimed => true,
                AliasClaim::AlreadyOwned => false,
            },
            None => false,
        };
        let release_claim = || {
            if let Some(alias) = alias.filter(|_| claimed) {
                self.release_alias(alias, code);
            }
        };

        // The entry guard makes check-and-insert a single step for this code.
        let created = match self.records.entry(code.clone()) {
            Entry::Occupied(existing) => {
                if existing.get().url != url {
                    trace!(code = %code, "code already bound to a different url");
                    drop(existing);
                    release_claim();
                    return Ok(false);
                }
                false
            }
            Entry::Vacant(slot) => {
                if self.aliased_elsewhere(code, url) {
                    trace!(code = %code, "code is another record's alias");
                    drop(slot);
                    release_claim();
                    return Ok(false);
                }
                slot.insert(SlinkRecord::new(code.clone(), url, alias.cloned()));
                self.by_url
                    .entry(url.to_owned())
                    .or_insert_with(|| code.clone());
                true
            }
        };

        // An identical re-save leaves the stored record as it was, alias included.
        if !created {
            release_claim();
        }

        Ok(true)
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<SlinkRecord>> {
        Ok(self.records.get(code).map(|record| record.clone()))
    }

    async fn increment_click(&self, code: &ShortCode) -> Result<bool> {
        // `get_mut` holds the shard's write lock, so concurrent increments serialize.
        let Some(mut record) = self.records.get_mut(code) else {
            return Ok(false);
        };
        record.clicks = record.clicks.saturating_add(1);
        Ok(true)
    }

    async fn find_code_by_url(&self, url: &str) -> Result<Option<ShortCode>> {
        Ok(self.by_url.get(url).map(|code| code.clone()))
    }

    async fn alias_exists(&self, alias: &ShortCode) -> Result<bool> {
        Ok(self.records.contains_key(alias) || self.aliases.contains_key(alias))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let Some((_, removed)) = self.records.remove(code) else {
            return Ok(false);
        };

        if let Some(alias) = &removed.alias {
            self.release_alias(alias, code);
        }
        self.release_alias(code, code);

        // Keep the URL index pointing at a surviving record, if any.
        if self
            .by_url
            .remove_if(&removed.url, |_, indexed| indexed == code)
            .is_some()
        {
            let survivor = self
                .records
                .iter()
                .find(|entry| entry.url == removed.url)
                .map(|entry| entry.code.clone());
            if let Some(survivor) = survivor {
                self.by_url.entry(removed.url).or_insert(survivor);
            }
        }

        Ok(true)
    }

    async fn disable(&self, code: &ShortCode) -> Result<bool> {
        let Some(mut record) = self.records.get_mut(code) else {
            return Ok(false);
        };
        record.disabled = true;
        Ok(true)
    }
}
