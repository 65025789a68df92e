//! Embeddings route tests: fan-out, normalization and error policy

use actix_web::http::{header, StatusCode};
use actix_web::test;
use cnb_gateway::config::Config;
use serde_json::{json, Value};
use wiremock::matchers::{header as header_matcher, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::common::{init_app, test_config};

const EMBEDDINGS_PATH: &str = "/acme/nest/gateway/-/ai/embeddings";

fn embeddings_request(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/v1/embeddings")
        .insert_header((header::AUTHORIZATION, "Bearer sk-abc123"))
        .set_json(body)
        .to_request()
}

fn sub_response(vector: Vec<f64>) -> Value {
    json!({
        "object": "list",
        "data": [{"object": "embedding", "embedding": vector, "index": 0}],
        "model": "cnb-embed",
        "usage": {"prompt_tokens": 1, "total_tokens": 2},
    })
}

#[actix_web::test]
async fn batch_fan_out_preserves_order_and_sums_usage() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBEDDINGS_PATH))
        // The sk- prefix must be stripped before the token goes upstream.
        .and(header_matcher("authorization", "Bearer abc123"))
        .respond_with(|req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            // Both field names are sent for upstream compatibility.
            assert_eq!(body["input"], body["text"]);
            let vector = match body["input"].as_str().unwrap() {
                "alpha" => vec![1.0],
                "beta" => vec![2.0],
                "gamma" => vec![3.0],
                other => panic!("unexpected input {other}"),
            };
            ResponseTemplate::new(200).set_body_json(sub_response(vector))
        })
        .expect(3)
        .mount(&upstream)
        .await;

    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "text-embed", "input": ["alpha", "beta", "gamma"]})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["object"], "list");
    assert_eq!(body["model"], "cnb-embed");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    for (i, item) in data.iter().enumerate() {
        // Upstream said index 0 for every sub-call; the coordinator must
        // have rewritten it to the original position.
        assert_eq!(item["index"], i as u64);
        assert_eq!(item["embedding"], json!([(i + 1) as f64]));
        assert_eq!(item["object"], "embedding");
    }
    assert_eq!(body["usage"], json!({"prompt_tokens": 3, "total_tokens": 6}));
}

#[actix_web::test]
async fn single_string_input_is_one_call_passed_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBEDDINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"object": "embedding", "embedding": [0.5], "index": 0}],
            "model": "cnb-embed",
            "usage": {"prompt_tokens": 4, "total_tokens": 4},
            "upstream_extra": "kept",
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "text-embed", "input": "hello"})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    // Single path: normalized but otherwise unmodified, extras survive.
    assert_eq!(body["upstream_extra"], "kept");
    assert_eq!(body["usage"]["prompt_tokens"], 4);
    assert_eq!(body["data"][0]["index"], 0);
}

#[actix_web::test]
async fn pre_tokenized_input_is_one_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBEDDINGS_PATH))
        .respond_with(|req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            assert_eq!(body["input"], json!([101, 2054, 102]));
            ResponseTemplate::new(200).set_body_json(sub_response(vec![0.7]))
        })
        .expect(1)
        .mount(&upstream)
        .await;

    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "text-embed", "input": [101, 2054, 102]})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn stringified_embedding_is_repaired() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBEDDINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"object": "embedding", "embedding": "[0.1,0.2,0.3]", "index": 0}],
            "model": "cnb-embed",
            "usage": {"prompt_tokens": 1, "total_tokens": 1},
        })))
        .mount(&upstream)
        .await;

    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "text-embed", "input": "hello"})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"][0]["embedding"], json!([0.1, 0.2, 0.3]));
}

#[actix_web::test]
async fn flat_embeddings_shape_is_normalized() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBEDDINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embeddings": [0.1, 0.2]})))
        .mount(&upstream)
        .await;

    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "text-embed", "input": "hello"})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["object"], "list");
    assert_eq!(
        body["data"],
        json!([{"object": "embedding", "embedding": [0.1, 0.2], "index": 0}])
    );
    assert_eq!(body["usage"], json!({"prompt_tokens": 0, "total_tokens": 0}));
    assert_eq!(body["model"], "text-embed");
}

#[actix_web::test]
async fn batch_failure_surfaces_lowest_index_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMBEDDINGS_PATH))
        .respond_with(|req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            match body["input"].as_str().unwrap() {
                "alpha" => ResponseTemplate::new(200).set_body_json(sub_response(vec![1.0])),
                "beta" => ResponseTemplate::new(500)
                    .set_body_json(json!({"msg": "beta exploded", "code": 1500})),
                _ => ResponseTemplate::new(500).set_body_json(json!({"msg": "gamma exploded"})),
            }
        })
        .mount(&upstream)
        .await;

    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "text-embed", "input": ["alpha", "beta", "gamma"]})),
    )
    .await;

    // No partial success: the whole batch fails, and the error reported is
    // the failing element with the lowest original index.
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "upstream_error");
    assert_eq!(body["error"]["message"], "beta exploded");
    assert_eq!(body["error"]["code"], 1500);
    assert_eq!(body["error"]["param"], Value::Null);
}

#[actix_web::test]
async fn invalid_input_kind_is_rejected() {
    let upstream = MockServer::start().await;
    let app = init_app(test_config(&upstream.uri())).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "m", "input": {"not": "valid"}})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[actix_web::test]
async fn missing_token_is_401() {
    let upstream = MockServer::start().await;
    let app = init_app(test_config(&upstream.uri())).await;
    let req = test::TestRequest::post()
        .uri("/v1/embeddings")
        .set_json(json!({"model": "m", "input": "hello"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "authentication_error");
}

#[actix_web::test]
async fn unset_embeddings_path_disables_the_feature() {
    let upstream = MockServer::start().await;
    let config = Config {
        embeddings_path: None,
        ..test_config(&upstream.uri())
    };
    let app = init_app(config).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "m", "input": "hello"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "feature_not_enabled");
}

#[actix_web::test]
async fn missing_repo_is_a_config_error() {
    let upstream = MockServer::start().await;
    let config = Config {
        repo: None,
        ..test_config(&upstream.uri())
    };
    let app = init_app(config).await;
    let resp = test::call_service(
        &app,
        embeddings_request(json!({"model": "m", "input": "hello"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "config_error");
}
