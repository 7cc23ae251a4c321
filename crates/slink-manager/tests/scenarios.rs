use slink_core::{base62, ClickSource};
use slink_generator::{CodeStrategy, Sequential, Strategy, StrategySettings};
use slink_manager::{CreateSlink, ManagerError, SlinkManager};
use slink_storage::InMemoryRepository;
use std::collections::HashSet;

/// Maps every URL to the same base code, honoring the requested length.
struct CollidingStrategy;

impl CodeStrategy for CollidingStrategy {
    fn generate(
        &self,
        _url: &str,
        length: Option<usize>,
        _counter: u64,
    ) -> slink_generator::Result<String> {
        Ok("Z".repeat(length.unwrap_or(8)))
    }
}

fn default_manager() -> SlinkManager<InMemoryRepository, Strategy> {
    SlinkManager::new(InMemoryRepository::new(), Strategy::default())
}

#[tokio::test]
async fn repeated_creation_returns_same_code() {
    let manager = default_manager();

    let first = manager
        .create_slink(CreateSlink::new("https://example.com"))
        .await
        .unwrap();
    let second = manager
        .create_slink(CreateSlink::new("https://example.com"))
        .await
        .unwrap();

    assert_eq!(first, second);
    let record = manager.get(first.as_str()).await.unwrap().unwrap();
    assert_eq!(record.clicks, 0);

    manager
        .resolve(first.as_str(), ClickSource::Browser)
        .await
        .unwrap();
    let record = manager.get(first.as_str()).await.unwrap().unwrap();
    assert_eq!(record.clicks, 1);
}

#[tokio::test]
async fn alias_reused_for_another_url_conflicts() {
    let manager = default_manager();

    let mine = manager
        .create_slink(
            CreateSlink::builder()
                .url("https://a.com")
                .alias("mine")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(mine.as_str(), "mine");

    let again = manager
        .create_slink(
            CreateSlink::builder()
                .url("https://a.com")
                .alias("mine")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(again, mine);

    let err = manager
        .create_slink(
            CreateSlink::builder()
                .url("https://b.com")
                .alias("mine")
                .build(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::AliasConflict(_)));
}

#[tokio::test]
async fn forced_collisions_resolve_to_distinct_codes() {
    let manager = SlinkManager::new(InMemoryRepository::new(), CollidingStrategy);
    let urls: Vec<String> = (0..8).map(|i| format!("https://site{i}.example")).collect();

    let mut codes = Vec::new();
    for url in &urls {
        codes.push(
            manager
                .create_slink(CreateSlink::new(url.as_str()))
                .await
                .unwrap(),
        );
    }

    // min_length, four extensions, then salted fallbacks.
    assert_eq!(codes[0].len(), 8);
    assert_eq!(codes[4].len(), 12);
    assert!(codes[5..].iter().all(|code| code.len() == 14));

    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), urls.len());

    for (url, code) in urls.iter().zip(&codes) {
        assert!(base62::is_base62(code.as_str()));
        let record = manager.get(code.as_str()).await.unwrap().unwrap();
        assert_eq!(&record.url, url);
    }
}

#[tokio::test]
async fn invalid_aliases_are_rejected() {
    let manager = default_manager();

    for alias in ["my alias", "my-alias", "café"] {
        let err = manager
            .create_slink(
                CreateSlink::builder()
                    .url("https://a.com")
                    .alias(alias)
                    .build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::InvalidAlias(_)), "{alias}");
    }

    let err = manager
        .create_slink(
            CreateSlink::builder()
                .url("https://a.com")
                .alias("x".repeat(33))
                .build(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::AliasTooLong { .. }));
}

#[tokio::test]
async fn sequential_strategy_codes_are_distinct() {
    let manager = SlinkManager::new(
        InMemoryRepository::new(),
        Sequential::new(1000, 6, "ap").unwrap(),
    );

    let mut codes = HashSet::new();
    for i in 0..200 {
        let code = manager
            .create_slink(CreateSlink::new(format!("https://example.com/{i}")))
            .await
            .unwrap();
        assert!(code.as_str().starts_with("ap"));
        assert!(code.len() >= 8);
        codes.insert(code);
    }
    assert_eq!(codes.len(), 200);
}

#[tokio::test]
async fn configured_strategies_all_create_and_dedupe() {
    for name in ["sha256", "hmac", "random", "sequential", "unknown"] {
        let settings = StrategySettings::builder()
            .name(name)
            .secret("s3cr3t")
            .build();
        let manager = SlinkManager::new(
            InMemoryRepository::new(),
            Strategy::from_settings(&settings).unwrap(),
        );

        let first = manager
            .create_slink(CreateSlink::new("https://example.com/page"))
            .await
            .unwrap();
        let second = manager
            .create_slink(CreateSlink::new("https://example.com/page"))
            .await
            .unwrap();
        assert_eq!(first, second, "{name}");

        let record = manager
            .resolve(first.as_str(), ClickSource::Api)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.url, "https://example.com/page");
    }
}
