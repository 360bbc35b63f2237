//! Integration tests for the scheme engine HTTP API.
//!
//! This test suite covers the full workflows:
//! - Applicant CRUD and pagination
//! - Scheme CRUD, authoring rules, and name conflicts
//! - Eligible-scheme listing through the decision engine
//! - Application lifecycle gated by eligibility
//! - Error cases (malformed payloads, missing records, conflicts)

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use scheme_engine::api::{AppState, create_router};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::new())
}

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    request(router, "GET", uri, None).await
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(router, "POST", uri, Some(body)).await
}

async fn put(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(router, "PUT", uri, Some(body)).await
}

async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    request(router, "DELETE", uri, None).await
}

/// A date of birth whose derived age is stable around today: the birthday
/// sits roughly half a year away from the evaluation date, so leap-year
/// ordinal jitter cannot flip the age.
fn dob_for_age(age: i32) -> String {
    let anchor = Utc::now().date_naive() - Duration::days(180);
    let dob = anchor
        .with_year(anchor.year() - age)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(anchor.year() - age, 3, 1).unwrap());
    dob.format("%Y-%m-%d").to_string()
}

fn household_member(name: &str, relation: &str, age: i32) -> Value {
    json!({
        "name": name,
        "employment_status": "unemployed",
        "sex": "female",
        "marital_status": "single",
        "date_of_birth": dob_for_age(age),
        "relation": relation
    })
}

fn applicant_payload(name: &str, employment_status: &str, households: Vec<Value>) -> Value {
    json!({
        "name": name,
        "employment_status": employment_status,
        "sex": "male",
        "marital_status": "married",
        "date_of_birth": dob_for_age(40),
        "households": households
    })
}

async fn create_applicant(router: &Router, payload: Value) -> String {
    let (status, body) = post(router, "/api/applicants", json!({"applicants": [payload]})).await;
    assert_eq!(status, StatusCode::CREATED, "create applicant: {body}");
    body[0]["id"].as_str().unwrap().to_string()
}

fn open_criterion(is_household: bool) -> Value {
    json!({
        "employment_status": "any",
        "sex": "any",
        "marital_status": "any",
        "relation": "any",
        "is_household": is_household
    })
}

fn scheme_payload(name: &str, criteria_groups: Vec<Value>) -> Value {
    json!({
        "name": name,
        "criteria_groups": criteria_groups,
        "benefits": [{"name": "CDC vouchers", "amount": "300.00"}]
    })
}

async fn create_scheme(router: &Router, payload: Value) -> String {
    let (status, body) = post(router, "/api/schemes", json!({"schemes": [payload]})).await;
    assert_eq!(status, StatusCode::CREATED, "create scheme: {body}");
    body[0]["id"].as_str().unwrap().to_string()
}

async fn eligible_scheme_names(router: &Router, applicant_id: &str) -> Vec<String> {
    let (status, body) = get(
        router,
        &format!("/api/schemes/eligible?applicant={applicant_id}&page_size=100"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "eligible listing: {body}");
    body["schemes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Applicant CRUD
// =============================================================================

#[tokio::test]
async fn test_create_applicants_returns_201_with_generated_ids() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/api/applicants",
        json!({"applicants": [
            applicant_payload("Jon Tan", "unemployed", vec![]),
            applicant_payload("Sarah Lim", "employed", vec![]),
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body.as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert!(!created[0]["id"].as_str().unwrap().is_empty());
    assert_ne!(created[0]["id"], created[1]["id"]);
}

#[tokio::test]
async fn test_list_applicants_paginates_and_reports_total() {
    let router = create_router_for_test();
    for i in 0..3 {
        create_applicant(
            &router,
            applicant_payload(&format!("Applicant {i}"), "employed", vec![]),
        )
        .await;
    }

    let (status, body) = get(&router, "/api/applicants?page=0&page_size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["applicants"].as_array().unwrap().len(), 2);

    let (_, body) = get(&router, "/api/applicants?page=1&page_size=2").await;
    assert_eq!(body["applicants"].as_array().unwrap().len(), 1);

    let (status, body) = get(&router, "/api/applicants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applicants"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_huge_page_index_yields_empty_page() {
    let router = create_router_for_test();
    create_applicant(&router, applicant_payload("Jon Tan", "employed", vec![])).await;

    let uri = format!("/api/applicants?page={}&page_size=10", usize::MAX);
    let (status, body) = get(&router, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["applicants"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_applicant_list_is_200_with_empty_page() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/api/applicants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert!(body["applicants"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_applicant_keeps_identity() {
    let router = create_router_for_test();
    let id = create_applicant(&router, applicant_payload("Jon Tan", "unemployed", vec![])).await;

    let (status, body) = put(
        &router,
        &format!("/api/applicants/{id}"),
        applicant_payload("Jon Tan", "employed", vec![household_member("Mei", "child", 10)]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["employment_status"], "employed");
    assert_eq!(body["households"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_missing_applicant_returns_404() {
    let router = create_router_for_test();
    let (status, body) = put(
        &router,
        "/api/applicants/missing",
        applicant_payload("Ghost", "employed", vec![]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "APPLICANT_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_applicant_removes_record() {
    let router = create_router_for_test();
    let id = create_applicant(&router, applicant_payload("Jon Tan", "unemployed", vec![])).await;

    let (status, body) = delete(&router, &format!("/api/applicants/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");

    let (_, body) = get(&router, "/api/applicants").await;
    assert_eq!(body["total"], 0);

    let (status, _) = delete(&router, &format!("/api/applicants/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Scheme CRUD and authoring rules
// =============================================================================

#[tokio::test]
async fn test_create_scheme_returns_201() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/api/schemes",
        json!({"schemes": [scheme_payload(
            "Retrenchment Assistance",
            vec![json!({"criteria": [open_criterion(false)]})],
        )]}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body[0]["name"], "Retrenchment Assistance");
    assert!(!body[0]["criteria_groups"][0]["criteria"][0]["id"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_schemes_paginates_and_reports_total() {
    let router = create_router_for_test();
    for i in 0..3 {
        create_scheme(
            &router,
            scheme_payload(
                &format!("Scheme {i}"),
                vec![json!({"criteria": [open_criterion(false)]})],
            ),
        )
        .await;
    }

    let (status, body) = get(&router, "/api/schemes?page=0&page_size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["schemes"].as_array().unwrap().len(), 2);

    let (_, body) = get(&router, "/api/schemes?page=1&page_size=2").await;
    assert_eq!(body["schemes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_scheme_name_returns_409() {
    let router = create_router_for_test();
    let payload = scheme_payload(
        "Retrenchment Assistance",
        vec![json!({"criteria": [open_criterion(false)]})],
    );
    create_scheme(&router, payload.clone()).await;

    let (status, body) = post(&router, "/api/schemes", json!({"schemes": [payload]})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_SCHEME_NAME");
}

#[tokio::test]
async fn test_scheme_without_benefits_returns_422() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/api/schemes",
        json!({"schemes": [{
            "name": "No benefits",
            "criteria_groups": [{"criteria": [open_criterion(false)]}],
            "benefits": []
        }]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_SCHEME");
}

#[tokio::test]
async fn test_scheme_with_two_applicant_groups_returns_422() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/api/schemes",
        json!({"schemes": [scheme_payload(
            "Two applicant groups",
            vec![
                json!({"criteria": [open_criterion(false)]}),
                json!({"criteria": [open_criterion(false)]}),
            ],
        )]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_SCHEME");
}

#[tokio::test]
async fn test_update_scheme_replaces_groups() {
    let router = create_router_for_test();
    let id = create_scheme(
        &router,
        scheme_payload(
            "Retrenchment Assistance",
            vec![json!({"criteria": [open_criterion(false)]})],
        ),
    )
    .await;

    let (status, body) = put(
        &router,
        &format!("/api/schemes/{id}"),
        scheme_payload(
            "Retrenchment Assistance 2024",
            vec![json!({"criteria": [open_criterion(true)]})],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "Retrenchment Assistance 2024");
    assert_eq!(
        body["criteria_groups"][0]["criteria"][0]["is_household"],
        true
    );
}

#[tokio::test]
async fn test_update_missing_scheme_returns_404() {
    let router = create_router_for_test();
    let (status, body) = put(
        &router,
        "/api/schemes/missing",
        scheme_payload("Ghost", vec![json!({"criteria": [open_criterion(false)]})]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCHEME_NOT_FOUND");
}

// =============================================================================
// Eligible scheme listing
// =============================================================================

#[tokio::test]
async fn test_applicant_criteria_filter_eligible_schemes() {
    let router = create_router_for_test();
    let unemployed_scheme = scheme_payload(
        "Retrenchment Assistance",
        vec![json!({"criteria": [{
            "employment_status": "unemployed",
            "sex": "any",
            "marital_status": "any",
            "relation": "any",
            "is_household": false
        }]})],
    );
    let open_scheme = scheme_payload(
        "Universal Support",
        vec![json!({"criteria": [open_criterion(false)]})],
    );
    create_scheme(&router, unemployed_scheme).await;
    create_scheme(&router, open_scheme).await;

    let unemployed =
        create_applicant(&router, applicant_payload("Jon Tan", "unemployed", vec![])).await;
    let employed =
        create_applicant(&router, applicant_payload("Sarah Lim", "employed", vec![])).await;

    let names = eligible_scheme_names(&router, &unemployed).await;
    assert!(names.contains(&"Retrenchment Assistance".to_string()));
    assert!(names.contains(&"Universal Support".to_string()));

    let names = eligible_scheme_names(&router, &employed).await;
    assert!(!names.contains(&"Retrenchment Assistance".to_string()));
    assert!(names.contains(&"Universal Support".to_string()));
}

#[tokio::test]
async fn test_or_semantics_within_a_group() {
    let router = create_router_for_test();
    create_scheme(
        &router,
        scheme_payload(
            "Either Or",
            vec![json!({"criteria": [
                {
                    "employment_status": "unemployed",
                    "sex": "any",
                    "marital_status": "any",
                    "relation": "any",
                    "is_household": false
                },
                {
                    "employment_status": "in_school",
                    "sex": "any",
                    "marital_status": "any",
                    "relation": "any",
                    "is_household": false
                }
            ]})],
        ),
    )
    .await;

    let unemployed =
        create_applicant(&router, applicant_payload("Jon Tan", "unemployed", vec![])).await;
    let employed =
        create_applicant(&router, applicant_payload("Sarah Lim", "employed", vec![])).await;

    assert_eq!(eligible_scheme_names(&router, &unemployed).await.len(), 1);
    assert!(eligible_scheme_names(&router, &employed).await.is_empty());
}

fn family_scheme(name: &str) -> Value {
    // One group for a working-age spouse, one for a school-age child.
    scheme_payload(
        name,
        vec![
            json!({"criteria": [{
                "employment_status": "any",
                "sex": "any",
                "marital_status": "any",
                "relation": "spouse",
                "age_lower_limit": 18,
                "age_upper_limit": 99,
                "is_household": true
            }]}),
            json!({"criteria": [{
                "employment_status": "any",
                "sex": "any",
                "marital_status": "any",
                "relation": "child",
                "age_lower_limit": 0,
                "age_upper_limit": 17,
                "is_household": true
            }]}),
        ],
    )
}

#[tokio::test]
async fn test_household_groups_require_distinct_matching_members() {
    let router = create_router_for_test();
    create_scheme(&router, family_scheme("Family Support")).await;

    let full_household = create_applicant(
        &router,
        applicant_payload(
            "Jon Tan",
            "employed",
            vec![
                household_member("Ann Tan", "spouse", 40),
                household_member("Mei Tan", "child", 10),
            ],
        ),
    )
    .await;
    assert_eq!(eligible_scheme_names(&router, &full_household).await.len(), 1);

    let spouse_only = create_applicant(
        &router,
        applicant_payload(
            "Ben Ng",
            "employed",
            vec![household_member("Joy Ng", "spouse", 40)],
        ),
    )
    .await;
    assert!(eligible_scheme_names(&router, &spouse_only).await.is_empty());

    let child_only = create_applicant(
        &router,
        applicant_payload(
            "Carl Ho",
            "employed",
            vec![household_member("Kim Ho", "child", 10)],
        ),
    )
    .await;
    assert!(eligible_scheme_names(&router, &child_only).await.is_empty());
}

#[tokio::test]
async fn test_one_member_cannot_cover_two_groups() {
    let router = create_router_for_test();
    // Both groups admit the lone spouse; injectivity must still fail this.
    create_scheme(
        &router,
        scheme_payload(
            "Two Member Scheme",
            vec![
                json!({"criteria": [{
                    "employment_status": "any",
                    "sex": "any",
                    "marital_status": "any",
                    "relation": "spouse",
                    "is_household": true
                }]}),
                json!({"criteria": [open_criterion(true)]}),
            ],
        ),
    )
    .await;

    let spouse_only = create_applicant(
        &router,
        applicant_payload(
            "Jon Tan",
            "employed",
            vec![household_member("Ann Tan", "spouse", 40)],
        ),
    )
    .await;
    assert!(eligible_scheme_names(&router, &spouse_only).await.is_empty());
}

#[tokio::test]
async fn test_backtracking_finds_non_greedy_assignment() {
    let router = create_router_for_test();
    // The unconstrained group comes first and would greedily take the child;
    // the child-only group then needs the search to back out and swap.
    create_scheme(
        &router,
        scheme_payload(
            "Backtracking Scheme",
            vec![
                json!({"criteria": [open_criterion(true)]}),
                json!({"criteria": [{
                    "employment_status": "any",
                    "sex": "any",
                    "marital_status": "any",
                    "relation": "child",
                    "age_upper_limit": 17,
                    "is_household": true
                }]}),
            ],
        ),
    )
    .await;

    let applicant = create_applicant(
        &router,
        applicant_payload(
            "Jon Tan",
            "employed",
            vec![
                household_member("Mei Tan", "child", 10),
                household_member("Ann Tan", "spouse", 40),
            ],
        ),
    )
    .await;
    assert_eq!(eligible_scheme_names(&router, &applicant).await.len(), 1);
}

#[tokio::test]
async fn test_eligible_listing_paginates_filtered_results() {
    let router = create_router_for_test();
    for i in 0..3 {
        create_scheme(
            &router,
            scheme_payload(
                &format!("Open Scheme {i}"),
                vec![json!({"criteria": [open_criterion(false)]})],
            ),
        )
        .await;
    }
    let id = create_applicant(&router, applicant_payload("Jon Tan", "employed", vec![])).await;

    let (status, body) = get(
        &router,
        &format!("/api/schemes/eligible?applicant={id}&page=0&page_size=2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["schemes"].as_array().unwrap().len(), 2);

    // A page past the end comes back empty rather than erroring.
    let (status, body) = get(
        &router,
        &format!("/api/schemes/eligible?applicant={id}&page=5&page_size=2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["schemes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_eligible_listing_for_unknown_applicant_returns_404() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/api/schemes/eligible?applicant=missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "APPLICANT_NOT_FOUND");
}

// =============================================================================
// Application lifecycle
// =============================================================================

async fn setup_eligible_pair(router: &Router) -> (String, String) {
    let applicant_id =
        create_applicant(router, applicant_payload("Jon Tan", "unemployed", vec![])).await;
    let scheme_id = create_scheme(
        router,
        scheme_payload(
            "Retrenchment Assistance",
            vec![json!({"criteria": [{
                "employment_status": "unemployed",
                "sex": "any",
                "marital_status": "any",
                "relation": "any",
                "is_household": false
            }]})],
        ),
    )
    .await;
    (applicant_id, scheme_id)
}

#[tokio::test]
async fn test_eligible_applicant_can_apply() {
    let router = create_router_for_test();
    let (applicant_id, scheme_id) = setup_eligible_pair(&router).await;

    let (status, body) = post(
        &router,
        "/api/applications",
        json!({"applicant_id": applicant_id, "scheme_id": scheme_id}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "submitted");
    assert_eq!(body["applicant"]["id"], applicant_id.as_str());
    assert_eq!(body["scheme"]["id"], scheme_id.as_str());
}

#[tokio::test]
async fn test_ineligible_applicant_is_rejected_with_403() {
    let router = create_router_for_test();
    let (_, scheme_id) = setup_eligible_pair(&router).await;
    let employed =
        create_applicant(&router, applicant_payload("Sarah Lim", "employed", vec![])).await;

    let (status, body) = post(
        &router,
        "/api/applications",
        json!({"applicant_id": employed, "scheme_id": scheme_id}),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "NOT_ELIGIBLE");

    let (_, body) = get(&router, "/api/applications").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_repeat_application_returns_409() {
    let router = create_router_for_test();
    let (applicant_id, scheme_id) = setup_eligible_pair(&router).await;
    let payload = json!({"applicant_id": applicant_id, "scheme_id": scheme_id});

    let (status, _) = post(&router, "/api/applications", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&router, "/api/applications", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_APPLICATION");
}

#[tokio::test]
async fn test_application_for_unknown_records_returns_404() {
    let router = create_router_for_test();
    let (applicant_id, scheme_id) = setup_eligible_pair(&router).await;

    let (status, body) = post(
        &router,
        "/api/applications",
        json!({"applicant_id": "missing", "scheme_id": scheme_id}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "APPLICANT_NOT_FOUND");

    let (status, body) = post(
        &router,
        "/api/applications",
        json!({"applicant_id": applicant_id, "scheme_id": "missing"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCHEME_NOT_FOUND");
}

#[tokio::test]
async fn test_update_application_status() {
    let router = create_router_for_test();
    let (applicant_id, scheme_id) = setup_eligible_pair(&router).await;
    let (_, body) = post(
        &router,
        "/api/applications",
        json!({"applicant_id": applicant_id, "scheme_id": scheme_id}),
    )
    .await;
    let application_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = put(
        &router,
        &format!("/api/applications/{application_id}"),
        json!({"status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (status, body) = put(
        &router,
        "/api/applications/missing",
        json!({"status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "APPLICATION_NOT_FOUND");
}

#[tokio::test]
async fn test_deleting_scheme_flags_applications_for_review() {
    let router = create_router_for_test();
    let (applicant_id, scheme_id) = setup_eligible_pair(&router).await;
    post(
        &router,
        "/api/applications",
        json!({"applicant_id": applicant_id, "scheme_id": scheme_id}),
    )
    .await;

    let (status, _) = delete(&router, &format!("/api/schemes/{scheme_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&router, "/api/applications").await;
    let application = &body["applications"][0];
    assert_eq!(application["status"], "needs_review");
    // The joined scheme is gone; the applicant survives.
    assert!(application["scheme"].is_null());
    assert_eq!(application["applicant"]["id"], applicant_id.as_str());
}

#[tokio::test]
async fn test_delete_application() {
    let router = create_router_for_test();
    let (applicant_id, scheme_id) = setup_eligible_pair(&router).await;
    let (_, body) = post(
        &router,
        "/api/applications",
        json!({"applicant_id": applicant_id, "scheme_id": scheme_id}),
    )
    .await;
    let application_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = delete(&router, &format!("/api/applications/{application_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&router, "/api/applications").await;
    assert_eq!(body["total"], 0);

    let (status, _) = delete(&router, &format!("/api/applications/{application_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Malformed payloads
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router_for_test();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/applicants")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_400_validation_error() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/api/applicants",
        json!({"applicants": [{"name": "No attributes"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_category_value_returns_400() {
    let router = create_router_for_test();
    let mut payload = applicant_payload("Jon Tan", "employed", vec![]);
    payload["employment_status"] = json!("retired");

    let (status, body) = post(&router, "/api/applicants", json!({"applicants": [payload]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
