//! Integration tests for the social graph and popularity ranking
//!
//! These tests drive the public handlers the way the router does:
//! 1. Users and films are created through the API layer
//! 2. Friendships and likes are mutated concurrently
//! 3. Rankings and friend lists are read back

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use filmorate_backend::api::extract::{AppJson, AppPath, AppQuery};
use filmorate_backend::api::{films, users};
use filmorate_backend::error::AppError;
use filmorate_backend::state::{AppState, FilmId, FilmRequest, UserId, UserRequest};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

fn create_test_state() -> Arc<RwLock<AppState>> {
    Arc::new(RwLock::new(AppState::new()))
}

fn user_request(login: &str) -> UserRequest {
    UserRequest {
        id: None,
        email: Some(format!("{}@mail.ru", login)),
        login: Some(login.to_string()),
        name: None,
        birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
    }
}

fn film_request(name: &str) -> FilmRequest {
    FilmRequest {
        id: None,
        name: Some(name.to_string()),
        description: Some(format!("{} description", name)),
        release_date: NaiveDate::from_ymd_opt(2001, 9, 1),
        duration: Some(95.0),
    }
}

async fn create_user(state: &Arc<RwLock<AppState>>, login: &str) -> UserId {
    let (_, Json(user)) = users::create_user(State(state.clone()), AppJson(user_request(login)))
        .await
        .unwrap();
    user.id
}

async fn create_film(state: &Arc<RwLock<AppState>>, name: &str) -> FilmId {
    let (_, Json(film)) = films::create_film(State(state.clone()), AppJson(film_request(name)))
        .await
        .unwrap();
    film.id
}

async fn friend_ids(state: &Arc<RwLock<AppState>>, id: UserId) -> Vec<UserId> {
    let Json(friends) = users::list_friends(State(state.clone()), AppPath(id))
        .await
        .unwrap();
    friends.iter().map(|u| u.id).collect()
}

/// Popularity example: F1 (2 likes), F2 (3 likes), F3 (1 like) → [F2, F1, F3]
#[tokio::test]
async fn test_popular_films_ranking() {
    let state = create_test_state();
    let f1 = create_film(&state, "F1").await;
    let f2 = create_film(&state, "F2").await;
    let f3 = create_film(&state, "F3").await;

    let mut fans = Vec::new();
    for login in ["u1", "u2", "u3"] {
        fans.push(create_user(&state, login).await);
    }

    for (film, likes) in [(f1, 2), (f2, 3), (f3, 1)] {
        for user in &fans[..likes] {
            films::add_like(State(state.clone()), AppPath((film, *user)))
                .await
                .unwrap();
        }
    }
    // A repeated like changes nothing
    films::add_like(State(state.clone()), AppPath((f3, fans[0])))
        .await
        .unwrap();

    let Json(popular) = films::popular_films(
        State(state.clone()),
        AppQuery(films::PopularQuery { count: Some(10) }),
    )
    .await
    .unwrap();
    let ranked: Vec<FilmId> = popular.iter().map(|f| f.id).collect();
    assert_eq!(ranked, vec![f2, f1, f3]);
    let counts: Vec<usize> = popular.iter().map(|f| f.likes_count()).collect();
    assert_eq!(counts, vec![3, 2, 1]);

    let Json(top_two) = films::popular_films(
        State(state),
        AppQuery(films::PopularQuery { count: Some(2) }),
    )
    .await
    .unwrap();
    assert_eq!(top_two.len(), 2);
}

#[tokio::test]
async fn test_common_friends_scenarios() {
    let state = create_test_state();
    let a = create_user(&state, "a").await;
    let b = create_user(&state, "b").await;
    let c = create_user(&state, "c").await;

    let Json(common) = users::common_friends(State(state.clone()), AppPath((a, b)))
        .await
        .unwrap();
    assert!(common.is_empty());

    users::add_friend(State(state.clone()), AppPath((a, c)))
        .await
        .unwrap();
    users::add_friend(State(state.clone()), AppPath((c, b)))
        .await
        .unwrap();

    let Json(common) = users::common_friends(State(state.clone()), AppPath((a, b)))
        .await
        .unwrap();
    assert_eq!(common.iter().map(|u| u.id).collect::<Vec<_>>(), vec![c]);

    match users::common_friends(State(state), AppPath((a, a))).await {
        Err(AppError::Validation(_)) => {}
        other => panic!("Expected Validation error, got: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_update_missing_entities_is_not_found() {
    let state = create_test_state();

    let err = films::update_film_by_id(
        State(state.clone()),
        AppPath(1),
        AppJson(FilmRequest::default()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    let err = users::update_user_by_id(State(state), AppPath(1), AppJson(user_request("valid")))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_start_at_one_per_entity_type() {
    let state = create_test_state();
    assert_eq!(create_film(&state, "first film").await, 1);
    assert_eq!(create_user(&state, "first_user").await, 1);
    assert_eq!(create_film(&state, "second film").await, 2);
    assert_eq!(create_user(&state, "second_user").await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_unique_ids() {
    let state = create_test_state();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move { create_user(&state, &format!("user{}", i)).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids, (1..=50).collect::<HashSet<UserId>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_friendships_stay_symmetric() {
    let state = create_test_state();
    let hub = create_user(&state, "hub").await;
    let mut others = Vec::new();
    for i in 0..20 {
        others.push(create_user(&state, &format!("spoke{}", i)).await);
    }

    // Every spoke befriends the hub twice, from both ends; exactly one call
    // per pair may succeed.
    let mut handles = Vec::new();
    for &other in &others {
        for (id, friend_id) in [(hub, other), (other, hub)] {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                users::add_friend(State(state), AppPath((id, friend_id)))
                    .await
                    .is_ok()
            }));
        }
    }
    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, others.len());

    let hub_friends = friend_ids(&state, hub).await;
    assert_eq!(hub_friends, others);
    for &other in &others {
        assert_eq!(friend_ids(&state, other).await, vec![hub]);
    }
}
