
use hangman_client::ranking::RankingError;
use hangman_core::Session;
use test_helpers::*;

#[tokio::test]
async fn test_register_and_submit_bodies() {
    let server = FakeLeaderboard::start().await;
    let client = server.ranking_client(Session::in_memory());

    client.register_player("Faker").await.unwrap();
    client.submit_result("Faker", 180).await.unwrap();
    client.submit_result("Faker", 0).await.unwrap();

    assert_eq!(server.registrations(), vec!["Faker".to_string()]);
    assert_eq!(
        server.results(),
        vec![("Faker".to_string(), 180), ("Faker".to_string(), 0)]
    );
}

#[tokio::test]
async fn test_fetch_caches_player_points() {
    let server = FakeLeaderboard::start().await;
    server.set_ranking(&[("Caps", 900), ("Faker", 750)]);

    let session = Session::in_memory();
    session.set_nick("Faker").await.unwrap();
    let client = server.ranking_client(session.clone());

    let entries = client.fetch_leaderboard().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].nick, "Caps");
    assert_eq!(session.best_score().await.unwrap(), 750);
}

#[tokio::test]
async fn test_missing_nick_caches_zero() {
    let server = FakeLeaderboard::start().await;
    server.set_ranking(&[("Caps", 900)]);

    let session = Session::in_memory();
    session.set_nick("Faker").await.unwrap();
    session.set_best_score(400).await.unwrap();
    let client = server.ranking_client(session.clone());

    client.fetch_leaderboard().await.unwrap();
    assert_eq!(session.best_score().await.unwrap(), 0);
}

#[tokio::test]
async fn test_no_identity_caches_zero() {
    let server = FakeLeaderboard::start().await;
    server.set_ranking(&[("Caps", 900)]);

    let session = Session::in_memory();
    let client = server.ranking_client(session.clone());

    let entries = client.fetch_leaderboard().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(session.best_score().await.unwrap(), 0);
}

#[tokio::test]
async fn test_server_error_is_status_failure() {
    let server = FakeLeaderboard::start().await;
    server.set_failing(true);

    let session = Session::in_memory();
    session.set_nick("Faker").await.unwrap();
    session.set_best_score(400).await.unwrap();
    let client = server.ranking_client(session.clone());

    let fetch = client.fetch_leaderboard().await;
    assert!(matches!(
        fetch,
        Err(RankingError::Status {
            endpoint: "/ranking",
            ..
        })
    ));

    let submit = client.submit_result("Faker", 10).await;
    assert!(matches!(
        submit,
        Err(RankingError::Status { endpoint: "/new", .. })
    ));

    // A failed fetch leaves the cached score alone
    assert_eq!(session.best_score().await.unwrap(), 400);
    assert!(server.results().is_empty());
}

#[tokio::test]
async fn test_garbled_body_is_decode_failure() {
    let server = FakeLeaderboard::start().await;
    server.set_garbled(true);

    let client = server.ranking_client(Session::in_memory());
    let result = client.fetch_leaderboard().await;
    assert!(matches!(result, Err(RankingError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_fetch_is_network_failure() {
    let client = unreachable_client(Session::in_memory());
    let result = client.fetch_leaderboard().await;
    assert!(matches!(result, Err(RankingError::Network(_))));
}
