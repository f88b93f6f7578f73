pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::planner::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Career API
        .route("/api/v1/career/plan", post(handlers::handle_plan))
        .route("/api/v1/career/skill-plan", post(handlers::handle_skill_plan))
        .route("/api/v1/career/insights", get(handlers::handle_insights))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::planner::CareerEngine;

    fn router() -> Router {
        let engine = CareerEngine::builtin().unwrap();
        build_router(AppState::new(engine, Config::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "career-planner");
        assert_eq!(body["reference_data"], "builtin");
        assert_eq!(body["default_timeframe_years"], 5);
    }

    #[tokio::test]
    async fn test_plan_endpoint() {
        let (status, body) = send(post_json(
            "/api/v1/career/plan",
            json!({ "current_role": "Junior Developer", "years_experience": 1, "skills": ["Git"] }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_position"]["normalized_role"], "junior_developer");
        assert_eq!(body["current_position"]["normalized_industry"], "technology");
        assert_eq!(
            body["career_paths"]["technical_path"]["steps"][1]["role"],
            "Mid Level Developer"
        );
        assert!(body["summary"].as_str().unwrap().starts_with("Career path plan for a Junior Developer"));
    }

    #[tokio::test]
    async fn test_targeted_plan_endpoint() {
        let (status, body) = send(post_json(
            "/api/v1/career/plan",
            json!({
                "current_role": "registered_nurse",
                "current_industry": "healthcare",
                "target_role": "software_architect",
                "target_industry": "technology"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["career_paths"]["primary_path"]["steps"].is_array());
        assert_eq!(body["industry_transition"]["difficulty"], "high");
    }

    #[tokio::test]
    async fn test_plan_rejects_empty_role() {
        let (status, body) = send(post_json("/api/v1/career/plan", json!({ "current_role": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_plan_rejects_zero_timeframe() {
        let (status, _) = send(post_json(
            "/api/v1/career/plan",
            json!({ "current_role": "Analyst", "timeframe_years": 0 }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_skill_plan_endpoint() {
        let (status, body) = send(post_json(
            "/api/v1/career/skill-plan",
            json!({ "skills": ["Python", "React", "Leadership"], "timeframe_months": 1, "seed": 5 }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_realistic"], false);
        assert_eq!(body["revised_timeframe"], 2);
        assert_eq!(body["weekly_schedule"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_skill_plan_accepts_largest_timeframe() {
        let (status, body) = send(post_json(
            "/api/v1/career/skill-plan",
            json!({ "skills": ["Leadership"], "timeframe_months": u32::MAX }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let milestones = body["skills"][0]["milestones"].as_array().unwrap();
        assert_eq!(milestones.last().unwrap()["timeline"], "Month 4294967295");
    }

    #[tokio::test]
    async fn test_skill_plan_rejects_empty_skills() {
        let (status, body) =
            send(post_json("/api/v1/career/skill-plan", json!({ "skills": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "skills cannot be empty");
    }

    #[tokio::test]
    async fn test_insights_endpoint() {
        let request = Request::get("/api/v1/career/insights?job_title=Registered%20Nurse&industry=healthcare")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role_info"]["normalized_role"], "registered_nurse");
        assert_eq!(body["role_info"]["title"], "Registered Nurse");
        assert!(body["career_paths"].as_array().unwrap().len() >= 2);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(Request::get("/api/v1/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
