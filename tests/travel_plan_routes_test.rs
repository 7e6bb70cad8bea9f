mod common;

use actix_web::{http::header, test};
use mockito::Matcher;
use serde_json::{json, Value};

use common::{gemini_reply, paris_trip, TestApp, GEMINI_PATH, TEST_GEMINI_KEY};

fn lisbon_itinerary() -> Value {
    json!({
        "days": [
            {
                "title": "Day 1 - Alfama and Fado",
                "morning": {"activities": [{
                    "title": "Tram 28",
                    "description": "Ride the historic tram through the old town",
                    "location": "Martim Moniz",
                    "time": "9:00 AM"
                }]},
                "afternoon": {"activities": [{
                    "title": "São Jorge Castle",
                    "description": "Views over the Tagus",
                    "location": "Castelo",
                    "time": "1:00 PM"
                }]},
                "evening": {"activities": [{
                    "title": "Fado dinner",
                    "description": "Traditional music with dinner",
                    "location": "Alfama",
                    "time": "8:00 PM"
                }]}
            },
            {
                "title": "Day 2 - Belém",
                "morning": {"activities": [{"title": "Jerónimos Monastery", "description": "Manueline architecture"}]},
                "afternoon": {"activities": []},
                "evening": {"activities": []}
            }
        ],
        "tips": ["Wear shoes with grip, the hills are steep"],
        "mustSeeLocations": ["Belém Tower"],
        "foodRecommendations": ["Pastel de nata"]
    })
}

fn lisbon_trip() -> Value {
    json!({
        "source": "Madrid",
        "destination": "Lisbon, Portugal",
        "startDate": "2024-05-10",
        "endDate": "2024-05-11",
        "budget": 900,
        "currency": "EUR",
        "travelers": 1,
        "interests": ["history", "music"],
        "additionalNotes": "First time in Portugal"
    })
}

#[actix_rt::test]
async fn test_paris_trip_without_credential_uses_curated_plan() {
    let test_app = TestApp::offline();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&paris_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let days = body["itinerary"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert!(days[0]["title"].as_str().unwrap().contains("Welcome to Paris"));
    assert!(!body["itinerary"]["tips"].as_array().unwrap().is_empty());
    assert!(!body["itinerary"]["mustSeeLocations"].as_array().unwrap().is_empty());
    assert!(!body["itinerary"]["foodRecommendations"].as_array().unwrap().is_empty());

    // The submitted form is echoed back as sent.
    assert_eq!(body["source"], "New York (JFK)");
    assert_eq!(body["budget"], "1500");
    assert_eq!(body["interests"], json!(["culture", "food"]));
    assert!(body["createdAt"].is_string());
}

#[actix_rt::test]
async fn test_missing_required_fields_is_bad_request() {
    let test_app = TestApp::offline();
    let app = test::init_service(test_app.create_app()).await;

    let mut trip = paris_trip();
    trip.as_object_mut().unwrap().remove("endDate");

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&trip)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[actix_rt::test]
async fn test_start_after_end_is_bad_request() {
    let test_app = TestApp::offline();
    let app = test::init_service(test_app.create_app()).await;

    let mut trip = paris_trip();
    trip["startDate"] = json!("2024-06-10");

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&trip)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_unparseable_body_is_bad_request_json() {
    let test_app = TestApp::offline();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_model_itinerary_is_extracted_from_prose() {
    let mut server = mockito::Server::new_async().await;
    let reply = format!(
        "Here is the itinerary you asked for:\n```json\n{}\n```\nHave a great trip!",
        lisbon_itinerary()
    );
    let mock = server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), TEST_GEMINI_KEY.into()))
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": {"topK": 40},
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(&reply))
        .expect(1)
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&lisbon_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["itinerary"], lisbon_itinerary());
    assert_eq!(body["additionalNotes"], "First time in Portugal");

    mock.assert_async().await;
}

#[actix_rt::test]
async fn test_model_itinerary_with_empty_lists_is_backfilled() {
    let mut server = mockito::Server::new_async().await;
    let sparse = json!({
        "days": [{"title": "Day 1 - Arrival"}, {"title": "Day 2 - Departure"}],
        "tips": [],
        "mustSeeLocations": ["Praça do Comércio"]
    });
    server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(&sparse.to_string()))
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&lisbon_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let itinerary = &body["itinerary"];
    assert_eq!(itinerary["days"][1]["title"], "Day 2 - Departure");
    assert_eq!(itinerary["mustSeeLocations"], json!(["Praça do Comércio"]));
    assert!(!itinerary["tips"].as_array().unwrap().is_empty());
    assert!(!itinerary["foodRecommendations"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_model_itinerary_with_null_fields_is_kept() {
    let mut server = mockito::Server::new_async().await;
    let loose = json!({
        "days": [
            {
                "title": "Day 1 - Alfama",
                "morning": {"activities": [{
                    "title": "Miradouro da Graça",
                    "description": null,
                    "location": null,
                    "time": 9
                }]},
                "afternoon": null,
                "evening": {"activities": null}
            },
            {"title": "Day 2 - Sintra", "morning": null}
        ],
        "tips": null,
        "mustSeeLocations": ["Pena Palace"],
        "foodRecommendations": ["Bifana"]
    });
    server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(&loose.to_string()))
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&lisbon_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let itinerary = &body["itinerary"];
    assert_eq!(itinerary["days"][0]["title"], "Day 1 - Alfama");
    assert_eq!(
        itinerary["days"][0]["morning"]["activities"][0],
        json!({"title": "Miradouro da Graça", "description": "", "time": "9"})
    );
    assert_eq!(itinerary["days"][0]["afternoon"], json!({"activities": []}));
    assert_eq!(itinerary["days"][1]["title"], "Day 2 - Sintra");
    assert_eq!(itinerary["mustSeeLocations"], json!(["Pena Palace"]));
    assert!(!itinerary["tips"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_unreachable_provider_is_internal_error() {
    // Nothing listens on port 1, so the request fails before any response.
    let test_app = TestApp::with_gemini("http://127.0.0.1:1");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&paris_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to generate travel plan");
}

#[actix_rt::test]
async fn test_reserved_keys_in_form_are_not_echoed_twice() {
    let test_app = TestApp::offline();
    let app = test::init_service(test_app.create_app()).await;

    let mut trip = paris_trip();
    trip["itinerary"] = json!("please make one");
    trip["createdAt"] = json!("yesterday");
    trip["tripStyle"] = json!("slow");

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&trip)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let raw = test::read_body(resp).await;
    let text = std::str::from_utf8(&raw).unwrap();
    assert_eq!(text.matches("\"itinerary\"").count(), 1);
    assert_eq!(text.matches("\"createdAt\"").count(), 1);

    let body: Value = serde_json::from_str(text).unwrap();
    assert!(body["itinerary"]["days"].is_array());
    assert_eq!(body["tripStyle"], "slow");
}

#[actix_rt::test]
async fn test_overlong_trip_is_bad_request() {
    let test_app = TestApp::offline();
    let app = test::init_service(test_app.create_app()).await;

    let mut trip = paris_trip();
    trip["startDate"] = json!("0001-01-01");
    trip["endDate"] = json!("9999-12-31");

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&trip)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_unparseable_model_text_falls_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(
            "Day 1: see the Eiffel Tower. {\"days\": [ oops, this is not json }",
        ))
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&paris_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["itinerary"]["days"].as_array().unwrap().len(), 3);
    assert_eq!(body["itinerary"]["days"][0]["title"], "Day 1 - Welcome to Paris");
}

#[actix_rt::test]
async fn test_model_text_without_json_falls_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply("I'm sorry, I can only describe the trip in prose."))
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&lisbon_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["itinerary"]["days"][0]["title"],
        "Day 1 - Lisbon, Portugal Exploration"
    );
}

#[actix_rt::test]
async fn test_provider_error_status_is_internal_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("model overloaded")
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&paris_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to generate travel plan");
}

#[actix_rt::test]
async fn test_blocked_generation_is_internal_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GEMINI_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string())
        .create_async()
        .await;

    let test_app = TestApp::with_gemini(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/travel-plan")
        .set_json(&paris_trip())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}
