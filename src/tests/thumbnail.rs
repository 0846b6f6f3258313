use crate::cache::{MemoryCache, CACHE_TTL_SECS};
use crate::embed::{cache_key, Hooks, Provider, ThumbnailResolver, VideoId};
use crate::tests::fakes::{BrokenCache, FakeTransport, ManualClock, RecordingCache};
use crate::transport::HttpResponse;
use reqwest::StatusCode;
use std::sync::Arc;

const YT_ID: &str = "dQw4w9WgXcQ";
const YT_MAXRES: &str = "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg";
const YT_DEFAULT: &str = "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg";
const VIMEO_ID: &str = "76979871";
const VIMEO_API: &str = "https://vimeo.com/api/v2/video/76979871.json";
const VIMEO_THUMB: &str = "https://i.vimeocdn.com/video/452001751-640";

fn id(raw: &str) -> VideoId {
    VideoId::new(raw).unwrap()
}

fn vimeo_ok() -> HttpResponse {
    let body = serde_json::json!([{ "id": 76979871, "thumbnail_large": VIMEO_THUMB }]);
    HttpResponse::new(StatusCode::OK, body.to_string())
}

struct Harness {
    transport: Arc<FakeTransport>,
    clock: Arc<ManualClock>,
    cache: Arc<RecordingCache>,
    resolver: ThumbnailResolver,
}

fn harness(transport: FakeTransport, hooks: Hooks) -> Harness {
    let transport = Arc::new(transport);
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(RecordingCache::new(clock.clone()));
    let resolver = ThumbnailResolver::new(transport.clone(), cache.clone(), Arc::new(hooks));

    Harness {
        transport,
        clock,
        cache,
        resolver,
    }
}

#[test]
fn test_youtube_short_url_example() {
    let h = harness(
        FakeTransport::new().respond(YT_MAXRES, HttpResponse::new(StatusCode::OK, Vec::new())),
        Hooks::new(),
    );

    let url = h.resolver.resolve(Provider::YouTube, &id(YT_ID));

    assert_eq!(url.as_deref(), Some(YT_MAXRES));
    assert_eq!(
        h.cache.writes(),
        vec![(
            "bcve_youtube_dQw4w9WgXcQ".to_string(),
            YT_MAXRES.to_string(),
            CACHE_TTL_SECS
        )]
    );
    assert_eq!(CACHE_TTL_SECS, 86_400);
}

#[test]
fn test_youtube_max_res_404_caches_default() {
    let h = harness(
        FakeTransport::new()
            .respond(YT_MAXRES, HttpResponse::new(StatusCode::NOT_FOUND, Vec::new())),
        Hooks::new(),
    );

    assert_eq!(h.resolver.resolve(Provider::YouTube, &id(YT_ID)).as_deref(), Some(YT_DEFAULT));
    assert_eq!(h.cache.writes().len(), 1);
    assert_eq!(h.cache.writes()[0].1, YT_DEFAULT);
}

#[test]
fn test_second_lookup_is_served_from_cache() {
    let h = harness(FakeTransport::new().respond(VIMEO_API, vimeo_ok()), Hooks::new());

    let first = h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID));
    h.clock.advance_secs(CACHE_TTL_SECS - 1);
    let second = h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID));

    assert_eq!(first.as_deref(), Some(VIMEO_THUMB));
    assert_eq!(first, second);
    assert_eq!(h.transport.calls(), 1);
}

#[test]
fn test_lookup_after_ttl_goes_remote_again() {
    let h = harness(
        FakeTransport::new().respond(YT_MAXRES, HttpResponse::new(StatusCode::OK, Vec::new())),
        Hooks::new(),
    );

    h.resolver.resolve(Provider::YouTube, &id(YT_ID));
    h.clock.advance_secs(CACHE_TTL_SECS);
    h.resolver.resolve(Provider::YouTube, &id(YT_ID));

    assert_eq!(h.transport.calls(), 2);
    assert_eq!(h.cache.writes().len(), 2);
}

#[test]
fn test_vimeo_network_error_writes_nothing() {
    let h = harness(FakeTransport::new(), Hooks::new());

    assert_eq!(h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID)), None);
    assert!(h.cache.writes().is_empty());

    // nothing cached, so the next render tries again
    assert_eq!(h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID)), None);
    assert_eq!(h.transport.calls(), 2);
}

#[test]
fn test_vimeo_malformed_body_writes_nothing() {
    let h = harness(
        FakeTransport::new().respond(VIMEO_API, HttpResponse::new(StatusCode::OK, "[]")),
        Hooks::new(),
    );

    assert_eq!(h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID)), None);
    assert!(h.cache.writes().is_empty());
}

#[test]
fn test_cache_keys_are_provider_scoped() {
    let h = harness(
        FakeTransport::new()
            .respond(
                "https://img.youtube.com/vi/76979871/maxresdefault.jpg",
                HttpResponse::new(StatusCode::NOT_FOUND, Vec::new()),
            )
            .respond(VIMEO_API, vimeo_ok()),
        Hooks::new(),
    );

    let yt = h.resolver.resolve(Provider::YouTube, &id(VIMEO_ID));
    let vimeo = h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID));

    assert_eq!(
        yt.as_deref(),
        Some("https://img.youtube.com/vi/76979871/mqdefault.jpg")
    );
    assert_eq!(vimeo.as_deref(), Some(VIMEO_THUMB));
    assert_eq!(cache_key(Provider::YouTube, &id("a")), "bcve_youtube_a");
    assert_eq!(cache_key(Provider::Vimeo, &id("a")), "bcve_vimeo_a");
}

#[test]
fn test_hook_overrides_result_but_not_cache() {
    let hooks = Hooks::new().on_youtube_thumbnail(|url, id| {
        assert_eq!(id.as_str(), YT_ID);
        url.replace("img.youtube.com", "cdn.example.com")
    });
    let h = harness(
        FakeTransport::new().respond(YT_MAXRES, HttpResponse::new(StatusCode::OK, Vec::new())),
        hooks,
    );

    let first = h.resolver.resolve(Provider::YouTube, &id(YT_ID));
    let second = h.resolver.resolve(Provider::YouTube, &id(YT_ID));

    let expected = "https://cdn.example.com/vi/dQw4w9WgXcQ/maxresdefault.jpg";
    assert_eq!(first.as_deref(), Some(expected));
    assert_eq!(second.as_deref(), Some(expected));
    assert_eq!(h.cache.writes()[0].1, YT_MAXRES);
}

#[test]
fn test_hook_returning_empty_means_absent() {
    let hooks = Hooks::new().on_vimeo_thumbnail(|_, _| String::new());
    let h = harness(FakeTransport::new().respond(VIMEO_API, vimeo_ok()), hooks);

    assert_eq!(h.resolver.resolve(Provider::Vimeo, &id(VIMEO_ID)), None);
}

#[test]
fn test_broken_cache_is_treated_as_miss() {
    let transport = Arc::new(
        FakeTransport::new().respond(VIMEO_API, vimeo_ok()),
    );
    let resolver =
        ThumbnailResolver::new(transport.clone(), Arc::new(BrokenCache), Arc::new(Hooks::new()));

    assert_eq!(resolver.resolve(Provider::Vimeo, &id(VIMEO_ID)).as_deref(), Some(VIMEO_THUMB));
    assert_eq!(resolver.resolve(Provider::Vimeo, &id(VIMEO_ID)).as_deref(), Some(VIMEO_THUMB));
    assert_eq!(transport.calls(), 2);
}

#[test]
fn test_unknown_provider_never_goes_remote() {
    let transport = Arc::new(FakeTransport::new());
    let resolver = ThumbnailResolver::new(
        transport.clone(),
        Arc::new(MemoryCache::new()),
        Arc::new(Hooks::new()),
    );

    assert_eq!(resolver.resolve(Provider::Unknown, &id("abc")), None);
    assert_eq!(transport.calls(), 0);
}
