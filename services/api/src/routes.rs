use crate::infra::AppState;
use crate::page::render_dashboard;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use axum::Json;
use promotion_dashboard::report::{dashboard_router, Dashboard};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

pub(crate) fn with_dashboard_routes(dashboard: Arc<Dashboard>) -> axum::Router {
    dashboard_router(dashboard)
        .route("/", axum::routing::get(dashboard_page))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn dashboard_page(Extension(state): Extension<AppState>) -> Response {
    match render_dashboard(&state.dashboard) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!(%err, "failed to render dashboard page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "dashboard unavailable" })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::NaiveDate;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use promotion_dashboard::dataset::DatasetLoader;
    use promotion_dashboard::report::DashboardSettings;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        let csv = "employee_id,department,region,education,gender,recruitment_channel,date_of_birth,join_date,length_of_service,KPIs_met >80%,awards_won?,is_promoted\n\
1,Technology,region_1,Bachelor's,m,other,1990-01-01,2020-02-01,1,Yes,No,Yes\n\
2,Procurement,region_9,Below Secondary,f,other,1995-01-01,2021-07-03,3,No,No,No\n";
        let dataset = DatasetLoader::new()
            .as_of(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"))
            .load_reader(csv.as_bytes())
            .expect("dataset loads");
        let dashboard = Dashboard::build(Arc::new(dataset), DashboardSettings::default());

        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            dashboard: Arc::new(dashboard),
        }
    }

    fn app(state: AppState) -> axum::Router {
        with_dashboard_routes(state.dashboard.clone()).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::get(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
    }

    #[tokio::test]
    async fn serves_dashboard_page() {
        let (status, body) = get(app(state(true)), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Employee Promotion Dashboard"));
        assert!(body.contains(r#"<option value="Procurement">Procurement</option>"#));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let (status, body) = get(app(state(false)), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("initializing"));

        let (status, body) = get(app(state(true)), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ready"));
    }

    #[tokio::test]
    async fn library_routes_are_mounted() {
        let (status, body) = get(
            app(state(true)),
            "/api/v1/dashboard/service-distribution?department=Procurement",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let payload: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(payload["values"], json!([3]));

        let (status, _) = get(app(state(true)), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
