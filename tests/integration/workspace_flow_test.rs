//! Workspace workflow integration tests
//!
//! These tests drive the service the way the presentation and transport
//! layers do: create entities, edit them, and resolve requests against
//! environments.

use super::fresh_service;
use api_workspace::models::{BodyField, CachedResponse, Environment, Header, HttpMethod};
use api_workspace::service::{NewCollection, NewRequest, RequestUpdate};
use api_workspace::store::{EntityKind, StoreError};
use api_workspace::variables::{merge_variables, resolve_string, validate_variables};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;

#[test]
fn test_collection_environment_resolution_scenario() {
    let service = fresh_service();

    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let request = service
        .create_request(
            &collection.id,
            NewRequest::new("R", HttpMethod::GET, "{{base_url}}/x"),
        )
        .unwrap();

    let mut variables = HashMap::new();
    variables.insert("base_url".to_string(), "http://localhost:8080".to_string());
    service
        .create_environment(Environment::with_variables("local", variables))
        .unwrap();

    // The transport layer's view: merge, then resolve
    let stored = service.get_collection(&collection.id).unwrap();
    let env = service.get_environment("local").unwrap();
    let vars = merge_variables([&stored.variables, &env.variables]);
    assert_eq!(
        resolve_string(&stored.requests[0].url, &vars),
        "http://localhost:8080/x"
    );

    // The same through the service
    let resolved = service
        .resolve_request(&collection.id, &request.id, Some("local"))
        .unwrap();
    assert_eq!(resolved.url, "http://localhost:8080/x");
}

#[test]
fn test_read_after_write() {
    let service = fresh_service();
    let new = NewCollection {
        name: "Orders".to_string(),
        description: "order service".to_string(),
        proto_paths: vec![PathBuf::from("proto/orders")],
        variables: HashMap::from([("region".to_string(), "eu".to_string())]),
    };

    let created = service.create_collection(new).unwrap();
    let fetched = service.get_collection(&created.id).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.proto_paths, vec![PathBuf::from("proto/orders")]);
}

#[test]
fn test_delete_collection_makes_requests_unreachable() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let ids: Vec<String> = (0..3)
        .map(|i| {
            service
                .create_request(
                    &collection.id,
                    NewRequest::new(format!("r{}", i), HttpMethod::GET, "/"),
                )
                .unwrap()
                .id
        })
        .collect();

    service.delete_collection(&collection.id).unwrap();

    assert_eq!(
        service.get_collection(&collection.id).unwrap_err(),
        StoreError::not_found(EntityKind::Collection, collection.id.as_str())
    );
    for id in ids {
        let err = service.get_request(&collection.id, &id).unwrap_err();
        assert_eq!(err.kind(), EntityKind::Collection);
        assert_eq!(err.id(), collection.id);
    }
}

#[test]
fn test_partial_update_of_method() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let request = service
        .create_request(&collection.id, NewRequest::new("R", HttpMethod::GET, "/items"))
        .unwrap();

    // Empty method from the presentation layer leaves GET in place
    let update: RequestUpdate = serde_json::from_value(json!({"method": ""})).unwrap();
    let updated = service
        .update_request(&collection.id, &request.id, update)
        .unwrap();
    assert_eq!(updated.method, HttpMethod::GET);

    let update: RequestUpdate = serde_json::from_value(json!({"method": "POST"})).unwrap();
    let updated = service
        .update_request(&collection.id, &request.id, update)
        .unwrap();
    assert_eq!(updated.method, HttpMethod::POST);
    assert_eq!(updated.url, "/items");
}

#[test]
fn test_request_edit_cycle_keeps_order() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let ids: Vec<String> = ["list", "create", "delete"]
        .iter()
        .map(|name| {
            service
                .create_request(&collection.id, NewRequest::new(*name, HttpMethod::GET, "/"))
                .unwrap()
                .id
        })
        .collect();

    let update = RequestUpdate {
        name: Some("create item".to_string()),
        headers: Some(vec![Header::new("Content-Type", "application/json")]),
        body: Some(vec![BodyField::new("item.name", "{{item}}")]),
        ..Default::default()
    };
    service.update_request(&collection.id, &ids[1], update).unwrap();
    service.delete_request(&collection.id, &ids[0]).unwrap();

    let names: Vec<String> = service
        .get_collection(&collection.id)
        .unwrap()
        .requests
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["create item", "delete"]);
}

#[test]
fn test_response_cache_round_trip() {
    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let mut new = NewRequest::new("Get item", HttpMethod::GET, "/items/1");
    new.response_type = Some("shop.v1.Item".to_string());
    new.error_response_type = Some("shop.v1.Error".to_string());
    let request = service.create_request(&collection.id, new).unwrap();

    let mut response = CachedResponse::new(404, "Not Found");
    response.add_header("Content-Type", "application/grpc");
    response.raw_body = vec![0x0a, 0x03, 0x66, 0x6f, 0x6f];
    response.decoded_body = Some(json!({"message": "foo"}));
    service
        .record_response(&collection.id, &request.id, response)
        .unwrap();

    let stored = service.get_request(&collection.id, &request.id).unwrap();
    let cached = stored.last_response.unwrap();
    assert!(!cached.is_success());
    assert_eq!(cached.raw_body.len(), 5);
    assert_eq!(stored.error_response_type.as_deref(), Some("shop.v1.Error"));
}

#[test]
fn test_validate_before_send() {
    let mut vars = HashMap::new();
    vars.insert("greeting".to_string(), "Hello".to_string());
    assert_eq!(
        validate_variables("{{greeting}} {{name}}!", &vars),
        vec!["name".to_string()]
    );

    let service = fresh_service();
    let collection = service.create_collection(NewCollection::new("C")).unwrap();
    let request = service
        .create_request(
            &collection.id,
            NewRequest::new("R", HttpMethod::GET, "{{scheme}}://{{host}}/"),
        )
        .unwrap();

    let missing = service
        .missing_variables(&collection.id, &request.id, None)
        .unwrap();
    assert_eq!(missing, vec!["scheme", "host"]);
}
