//! Concurrent access integration tests
//!
//! Many threads drive one shared service; every operation must see and
//! leave a consistent store.

use super::fresh_service;
use api_workspace::models::{CachedResponse, Environment, HttpMethod};
use api_workspace::service::{NewCollection, NewRequest, RequestUpdate};
use std::collections::HashSet;

#[test]
fn test_concurrent_create_request_distinct_ids() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let workers = 16;
    let per_worker = 20;

    let ids: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let service = &service;
                let collection_id = collection.id.as_str();
                scope.spawn(move || {
                    (0..per_worker)
                        .map(|i| {
                            service
                                .create_request(
                                    collection_id,
                                    NewRequest::new(format!("w{}-{}", w, i), HttpMethod::GET, "/"),
                                )
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let distinct: HashSet<&String> = ids.iter().collect();
    assert_eq!(distinct.len(), workers * per_worker);

    let stored = service.get_collection(&collection.id).unwrap();
    assert_eq!(stored.requests.len(), workers * per_worker);
    let stored_ids: HashSet<&String> = stored.requests.iter().map(|r| &r.id).collect();
    assert_eq!(stored_ids, distinct);
}

#[test]
fn test_readers_never_see_torn_collections() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let seed = service
        .create_request(&collection.id, NewRequest::new("seed", HttpMethod::GET, "/"))
        .unwrap();

    std::thread::scope(|scope| {
        let service = &service;
        let collection_id = collection.id.as_str();
        let seed_id = seed.id.as_str();

        scope.spawn(move || {
            for i in 0..200 {
                let created = service
                    .create_request(
                        collection_id,
                        NewRequest::new(format!("r{}", i), HttpMethod::GET, "/"),
                    )
                    .unwrap();
                let update = RequestUpdate {
                    url: Some(format!("/updated/{}", i)),
                    ..Default::default()
                };
                service
                    .update_request(collection_id, seed_id, update)
                    .unwrap();
                service.delete_request(collection_id, &created.id).unwrap();
            }
        });

        for _ in 0..4 {
            scope.spawn(move || {
                for _ in 0..200 {
                    let snapshot = service.get_collection(collection_id).unwrap();
                    // At most the seed plus one in-flight request
                    assert!(!snapshot.requests.is_empty() && snapshot.requests.len() <= 2);
                    assert_eq!(snapshot.requests[0].id, seed_id);
                    let ids: HashSet<&String> =
                        snapshot.requests.iter().map(|r| &r.id).collect();
                    assert_eq!(ids.len(), snapshot.requests.len());
                }
            });
        }
    });

    let stored = service.get_collection(&collection.id).unwrap();
    assert_eq!(stored.requests.len(), 1);
    assert_eq!(stored.requests[0].url, "/updated/199");
}

#[test]
fn test_concurrent_environment_overwrites() {
    let service = fresh_service();

    std::thread::scope(|scope| {
        for w in 0..8 {
            let service = &service;
            scope.spawn(move || {
                for i in 0..50 {
                    let mut env = Environment::new("shared");
                    env.set("writer", w.to_string());
                    env.set("round", i.to_string());
                    service.create_environment(env).unwrap();
                    let _ = service.get_environment("shared").unwrap();
                }
            });
        }
    });

    let envs = service.list_environments().unwrap();
    assert_eq!(envs.len(), 1);
    assert_eq!(envs[0].get("round"), Some(&"49".to_string()));
}

#[test]
fn test_concurrent_edits_and_responses_are_both_kept() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let request = service
        .create_request(&collection.id, NewRequest::new("R", HttpMethod::GET, "/"))
        .unwrap();
    let rounds = 200;

    std::thread::scope(|scope| {
        let service = &service;
        let collection_id = collection.id.as_str();
        let request_id = request.id.as_str();

        scope.spawn(move || {
            for i in 0..rounds {
                let update = RequestUpdate {
                    url: Some(format!("/v{}", i)),
                    ..Default::default()
                };
                service
                    .update_request(collection_id, request_id, update)
                    .unwrap();
            }
        });
        scope.spawn(move || {
            for i in 0..rounds {
                let response = CachedResponse::new(200 + (i % 100) as u16, "OK");
                service
                    .record_response(collection_id, request_id, response)
                    .unwrap();
            }
        });
    });

    let stored = service.get_request(&collection.id, &request.id).unwrap();
    assert_eq!(stored.url, format!("/v{}", rounds - 1));
    assert_eq!(
        stored.last_response.map(|r| r.status_code),
        Some(200 + ((rounds - 1) % 100) as u16)
    );
}
