//! End-to-end tests against a mock server: endpoint decoding, error
//! mapping, and the rate-limiting behavior observable from outside.

use std::time::{Duration, Instant};

use http::StatusCode;
use pretty_assertions::assert_eq;
use rlstats_lib::{Client, ClientBuilder, DispatchError, ErrorKind, Platform, Stat};
use serde_json::json;
use url::Url;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    ClientBuilder::builder()
        .api_key("test-key")
        .api_root(Url::parse(&server.uri()).unwrap())
        .timeout(Duration::from_secs(2))
        .min_request_interval(Duration::from_millis(50))
        .build()
        .client()
        .unwrap()
}

fn player_json(unique_id: &str, display_name: &str, platform_id: u64) -> serde_json::Value {
    json!({
        "uniqueId": unique_id,
        "displayName": display_name,
        "platform": {"id": platform_id, "name": "Steam"},
        "stats": {"wins": 1, "goals": 2, "mvps": 3, "saves": 4, "shots": 5, "assists": 6},
        "rankedSeasons": {"5": {"11": {"rankPoints": 745, "matchesPlayed": 21, "tier": 9, "division": 1}}}
    })
}

#[tokio::test]
async fn platforms_skips_unknown_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/data/platforms"))
        .respond_with(ResponseTemplate::new(StatusCode::OK).set_body_json(json!([
            {"id": 1, "name": "Steam"},
            {"id": 2, "name": "PS4"},
            {"id": 9, "name": "Switch"}
        ])))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let platforms = client.platforms().await.unwrap();
    assert_eq!(platforms, vec![Platform::Steam, Platform::Ps4]);
}

#[tokio::test]
async fn player_sends_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/player"))
        .and(query_param("unique_id", "76561198033338223"))
        .and(query_param("platform_id", "1"))
        .respond_with(
            ResponseTemplate::new(StatusCode::OK)
                .set_body_json(player_json("76561198033338223", "Mike", 1)),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);

    let player = client
        .player("76561198033338223", Platform::Steam)
        .await
        .unwrap();
    assert_eq!(player.display_name, "Mike");
    assert_eq!(player.stats.goals, 2);
    assert_eq!(player.ranked_seasons[&5][&11].rank_points, Some(745));
}

#[tokio::test]
async fn batch_lookup_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/player/batch"))
        .and(body_json(json!([
            {"uniqueId": "76561198033338223", "platformId": "1"},
            {"uniqueId": "Gamertag", "platformId": "3"}
        ])))
        .respond_with(ResponseTemplate::new(StatusCode::OK).set_body_json(json!([
            player_json("76561198033338223", "Mike", 1),
            player_json("Gamertag", "Gamertag", 3)
        ])))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let players = client
        .players(&[
            ("76561198033338223".to_string(), Platform::Steam),
            ("Gamertag".to_string(), Platform::XboxOne),
        ])
        .await
        .unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[1].unique_id, "Gamertag");
}

#[tokio::test]
async fn search_decodes_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search/players"))
        .and(query_param("display_name", "Mike"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(StatusCode::OK).set_body_json(json!({
            "page": 0,
            "results": 1,
            "totalResults": 24,
            "maxResultsPerPage": 10,
            "data": [player_json("76561198033338223", "Mike", 1)]
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let page = client.search_players("Mike", 0).await.unwrap();
    assert_eq!(page.total_results, 24);
    assert!(page.has_more());
    assert_eq!(page.data[0].display_name, "Mike");
}

#[tokio::test]
async fn leaderboards_pass_their_selectors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/leaderboard/ranked"))
        .and(query_param("playlist_id", "11"))
        .respond_with(
            ResponseTemplate::new(StatusCode::OK)
                .set_body_json(json!([player_json("a", "A", 1)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/leaderboard/stat"))
        .and(query_param("type", "goals"))
        .respond_with(
            ResponseTemplate::new(StatusCode::OK)
                .set_body_json(json!([player_json("b", "B", 1)])),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);

    let ranked = client.ranked_leaderboard(11).await.unwrap();
    assert_eq!(ranked[0].display_name, "A");
    let by_goals = client.stat_leaderboard(Stat::Goals).await.unwrap();
    assert_eq!(by_goals[0].display_name, "B");
}

#[tokio::test]
async fn error_statuses_map_deterministically() {
    for (status, check) in [
        (
            StatusCode::UNAUTHORIZED,
            (|result| matches!(result, Err(ErrorKind::InvalidApiKey)))
                as fn(Result<Vec<rlstats_lib::Tier>, ErrorKind>) -> bool,
        ),
        (StatusCode::NOT_FOUND, |result| {
            matches!(result, Err(ErrorKind::NotFound(_)))
        }),
        (StatusCode::INTERNAL_SERVER_ERROR, |result| {
            matches!(
                result,
                Err(ErrorKind::BadResponse { status, .. })
                    if status == StatusCode::INTERNAL_SERVER_ERROR
            )
        }),
    ] {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let result = client.tiers().await;
        assert!(check(result), "wrong mapping for status {status}");
    }
}

#[tokio::test]
async fn throttling_exhausts_the_attempt_budget() {
    let min_interval = Duration::from_millis(50);
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(StatusCode::TOO_MANY_REQUESTS)
                .insert_header("retry-after-ms", "5"),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);

    let start = Instant::now();
    let result = client.seasons().await;
    let elapsed = start.elapsed();

    assert!(matches!(
        result,
        Err(ErrorKind::RateLimited { attempts: 6 })
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 6);
    // Five inter-dispatch gaps, each at least the minimum spacing.
    assert!(
        elapsed >= min_interval * 5,
        "6 dispatches finished in {elapsed:?}, spacing not enforced"
    );
}

#[tokio::test]
async fn throttling_fails_fast_when_rate_limiting_is_off() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(StatusCode::TOO_MANY_REQUESTS))
        .mount(&server)
        .await;
    let client = ClientBuilder::builder()
        .api_key("test-key")
        .api_root(Url::parse(&server.uri()).unwrap())
        .rate_limited(false)
        .build()
        .client()
        .unwrap();

    let result = client.seasons().await;
    assert!(matches!(
        result,
        Err(ErrorKind::RateLimited { attempts: 1 })
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn timeout_does_not_starve_the_next_call() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/data/seasons"))
        .respond_with(
            ResponseTemplate::new(StatusCode::OK)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    Mock::given(path("/v1/data/platforms"))
        .respond_with(
            ResponseTemplate::new(StatusCode::OK).set_body_json(json!([{"id": 1, "name": "Steam"}])),
        )
        .mount(&server)
        .await;
    let client = ClientBuilder::builder()
        .api_key("test-key")
        .api_root(Url::parse(&server.uri()).unwrap())
        .timeout(Duration::from_millis(300))
        .min_request_interval(Duration::from_millis(50))
        .build()
        .client()
        .unwrap();

    let result = client.seasons().await;
    assert!(matches!(
        result,
        Err(ErrorKind::ServerError {
            source: DispatchError::Timeout(_),
            ..
        })
    ));

    // The abandoned attempt released its ticket; this call gets its turn.
    let platforms = client.platforms().await.unwrap();
    assert_eq!(platforms, vec![Platform::Steam]);
}

#[tokio::test]
async fn concurrent_calls_share_the_spacing_budget() {
    let min_interval = Duration::from_millis(100);
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(StatusCode::OK).set_body_json(json!([])))
        .mount(&server)
        .await;
    let client: Client = ClientBuilder::builder()
        .api_key("test-key")
        .api_root(Url::parse(&server.uri()).unwrap())
        .min_request_interval(min_interval)
        .build()
        .client()
        .unwrap();

    let start = Instant::now();
    let (a, b, c) = tokio::join!(client.seasons(), client.seasons(), client.seasons());
    let elapsed = start.elapsed();

    a.unwrap();
    b.unwrap();
    c.unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
    assert!(
        elapsed >= min_interval * 2,
        "3 concurrent dispatches finished in {elapsed:?}, spacing not enforced"
    );
}
