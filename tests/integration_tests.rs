use lagless::{
    core::prompt::FALLBACK_BODY, AgeGroup, BlockSource, LagError, OllamaClient,
    ScheduleGenerator, TripForm,
};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn reply(text: &str) -> String {
    json!({ "model": "gemma:2b", "response": text, "done": true }).to_string()
}

#[tokio::test]
async fn test_client_sends_non_streaming_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama3",
            "prompt": "hello",
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("Day 0:\n- Rest"))
        .create_async()
        .await;

    let client = OllamaClient::new()
        .with_base_url(server.url())
        .with_model("llama3");

    let text = client.complete("hello").await.unwrap();

    assert_eq!(text, "Day 0:\n- Rest");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_maps_api_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(404)
        .with_body(r#"{"error":"model 'gemma:2b' not found"}"#)
        .create_async()
        .await;

    let client = OllamaClient::new().with_base_url(server.url());
    let err = client.complete("hi").await.unwrap_err();

    assert!(matches!(err, LagError::Generation(_)));
    assert!(err.to_string().contains("not found"));
    assert!(!err.aborts_plan());
}

#[tokio::test]
async fn test_client_rejects_garbage_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = OllamaClient::new().with_base_url(server.url());
    let err = client.complete("hi").await.unwrap_err();

    assert!(matches!(err, LagError::Serialization(_)));
}

#[tokio::test]
async fn test_missing_response_field_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"done":true}"#)
        .create_async()
        .await;

    let client = OllamaClient::new().with_base_url(server.url());
    assert_eq!(client.complete("hi").await.unwrap(), "");
}

#[tokio::test]
async fn test_refused_connection_is_unavailable() {
    let client = OllamaClient::new()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(5));

    let err = client.complete("hi").await.unwrap_err();

    assert!(err.aborts_plan());
    assert_eq!(err.error_code(), "CAPABILITY_UNAVAILABLE");
}

#[tokio::test]
async fn test_plan_against_server_heals_bad_days() {
    let mut server = mockito::Server::new_async().await;
    for (day, body) in [
        (0, reply("Day 0:\n- Sleep on the plane if you can\n- Drink water")),
        (1, reply("Sure! Here are some tips for tomorrow.")),
        (2, reply("Day 2:\n- Morning walk outside\n- Coffee before noon only")),
        (3, reply("")),
    ] {
        server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Regex(format!("Day index: {}", day)))
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
    }

    let mut form = TripForm::new();
    form.set_trip_length(10).unwrap();
    let generator = ScheduleGenerator::new(OllamaClient::new().with_base_url(server.url()));

    let plan = generator.generate(form.params()).await.unwrap();

    assert_eq!(plan.days(), vec![0, 1, 2, 3]);
    assert_eq!(plan.block(0).unwrap().source, BlockSource::Generated);
    assert_eq!(plan.block(1).unwrap().text, format!("Day 1:\n{}", FALLBACK_BODY));
    assert_eq!(plan.block(2).unwrap().source, BlockSource::Generated);
    assert_eq!(plan.block(3).unwrap().text, format!("Day 3:\n{}", FALLBACK_BODY));

    let rendered = plan.render();
    let positions: Vec<usize> = (0..4)
        .map(|day| rendered.find(&format!("Day {}:", day)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!generator.is_generating());
}

#[tokio::test]
async fn test_plan_aborts_when_ollama_is_down() {
    let mut form = TripForm::new();
    form.set_age_group(AgeGroup::Kid);
    form.submit_admin_code("");

    let generator = ScheduleGenerator::new(
        OllamaClient::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5)),
    );

    let err = generator.generate(form.params()).await.unwrap_err();

    assert!(matches!(err, LagError::Unavailable(_)));
    assert!(err.to_string().starts_with("AI not available"));
    assert!(!generator.is_generating());
}

#[test]
fn test_error_payload() {
    let error = LagError::Unavailable("AI not available".to_string());
    let payload = error.to_error_payload();

    assert_eq!(payload["error"]["code"], "CAPABILITY_UNAVAILABLE");
    assert_eq!(payload["error"]["aborts_plan"], true);
    assert_eq!(payload["error"]["message"], "AI not available");
}

#[test]
fn test_generator_is_usable_from_sync_code() {
    let generator = ScheduleGenerator::new(
        OllamaClient::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5)),
    );
    let form = TripForm::new();

    let result = tokio_test::block_on(generator.generate_combined(form.params()));

    assert!(matches!(result, Err(LagError::Unavailable(_))));
}
