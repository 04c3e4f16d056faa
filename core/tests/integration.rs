//! Full browse lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises the feed
//! synchronizers and detail/comment parsing over real HTTP using ureq,
//! including the malformed fixtures the server seeds to prove lenient list
//! decoding end-to-end.

use px_core::{
    ApiError, Category, CommentFeed, FeedError, HttpRequest, HttpResponse, ImageSize, LoadState,
    PhotoFeed, PxClient,
};
use url::Url;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = agent.get(&req.url).call().map_err(ApiError::network)?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().map_err(ApiError::network)?;

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn start_server() -> Url {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    Url::parse(&format!("http://{addr}")).unwrap()
}

#[test]
fn browse_lifecycle() {
    let base = start_server();
    let client = PxClient::with_base_url(base.clone(), "test-key");

    // Step 1: refresh — page 1 holds five raw entries, one missing `nsfw`.
    let mut feed = PhotoFeed::new(client.clone());
    let req = feed.begin_refresh().unwrap();
    let merge = feed.complete_load(execute(req)).unwrap();
    assert!(merge.refreshed);
    assert_eq!(merge.inserted, 0..4, "malformed entry dropped");
    let page1: Vec<_> = feed.photos().iter().map(|p| p.id).collect();
    assert_eq!(page1, [101, 102, 103, 104]);

    // Step 2: a second load is rejected while one is in flight.
    let req = feed.begin_next_page().unwrap();
    assert!(matches!(feed.begin_next_page().unwrap_err(), FeedError::LoadInFlight));
    assert!(matches!(feed.state(), LoadState::Loading { page: 2 }));
    feed.complete_load(execute(req)).unwrap();

    // Step 3: page 3 completes the feed; the mistyped-id entry on page 2
    // was dropped, everything else deduplicated into insertion order.
    let req = feed.begin_next_page().unwrap();
    feed.complete_load(execute(req)).unwrap();
    let all: Vec<_> = feed.photos().iter().map(|p| p.id).collect();
    assert_eq!(all, mock_server::seeded_ids());
    assert_eq!(feed.current_page(), 3);

    // Step 4: pages past the end merge nothing and still advance the cursor.
    let req = feed.begin_next_page().unwrap();
    let merge = feed.complete_load(execute(req)).unwrap();
    assert!(merge.inserted.is_empty());
    assert_eq!(feed.current_page(), 4);

    // Step 5: refresh resets back to page 1.
    let req = feed.begin_refresh().unwrap();
    feed.complete_load(execute(req)).unwrap();
    assert_eq!(feed.photos().len(), 4);
    assert_eq!(feed.current_page(), 1);

    // Step 6: photo detail carries the rich metadata.
    let req = client.build_photo_detail(101, ImageSize::Large);
    let photo = client.parse_photo_detail(&execute(req).unwrap()).unwrap();
    assert_eq!(photo.id, 101);
    assert_eq!(photo.name.as_deref(), Some("Photo 101"));
    assert_eq!(photo.views, Some(10_100));
    assert_eq!(photo.category, Category::from_code(101 % 28));
    assert_eq!(photo.username.as_deref(), Some("user101"));

    // Step 7: detail for an unknown id surfaces the 404 as a status error.
    let req = client.build_photo_detail(9999, ImageSize::Large);
    let err = client.parse_photo_detail(&execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));

    // Step 8: comment thread for photo 101 — five raw comments across three
    // pages, one missing its body and dropped.
    let mut thread = CommentFeed::new(client.clone(), 101);
    let req = thread.begin_refresh().unwrap();
    thread.complete_load(execute(req)).unwrap();
    assert_eq!(thread.comments().len(), 2);

    let req = thread.begin_next_page().unwrap();
    let merge = thread.complete_load(execute(req)).unwrap();
    assert_eq!(merge.inserted.len(), 1, "comment without a body dropped");

    let req = thread.begin_next_page().unwrap();
    thread.complete_load(execute(req)).unwrap();
    assert_eq!(thread.comments().len(), 4);
    assert_eq!(thread.comments()[0].user_fullname, "Ava");
    assert_eq!(thread.current_page(), 3);

    // Step 9: a missing consumer key is rejected by the server and surfaces
    // as a status error without touching the aggregate.
    let anonymous = PxClient::with_base_url(base, "");
    let mut feed = PhotoFeed::new(anonymous);
    let req = feed.begin_refresh().unwrap();
    let err = feed.complete_load(execute(req)).unwrap_err();
    assert!(matches!(err, FeedError::Api(ApiError::Status { status: 401, .. })));
    assert!(feed.photos().is_empty());
    assert_eq!(feed.current_page(), 0);
}

#[test]
fn transport_failure_surfaces_and_preserves_state() {
    // Nothing listens on this port; the connect fails at the transport layer.
    let base = Url::parse("http://127.0.0.1:9").unwrap();
    let mut feed = PhotoFeed::new(PxClient::with_base_url(base, "test-key"));

    let req = feed.begin_refresh().unwrap();
    let err = feed.complete_load(execute(req)).unwrap_err();
    assert!(matches!(err, FeedError::Api(ApiError::Network(_))));
    assert!(feed.photos().is_empty());
    assert_eq!(feed.current_page(), 0);
    assert_eq!(feed.state(), LoadState::Idle, "safe to retry the same page");
}
