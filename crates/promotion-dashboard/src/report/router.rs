use super::dashboard::Dashboard;
use super::summary::SummaryMetrics;
use super::views::{DepartmentsView, HireSeriesView, PromotionChartView, ServiceHistogramView};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub fn dashboard_router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/api/v1/dashboard/summary", get(summary_handler))
        .route("/api/v1/dashboard/promotions", get(promotions_handler))
        .route("/api/v1/dashboard/hires", get(hires_handler))
        .route("/api/v1/dashboard/departments", get(departments_handler))
        .route(
            "/api/v1/dashboard/service-distribution",
            get(service_distribution_handler),
        )
        .with_state(dashboard)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SelectionQuery {
    #[serde(default)]
    pub(crate) department: Option<String>,
}

pub(crate) async fn summary_handler(
    State(dashboard): State<Arc<Dashboard>>,
) -> Json<SummaryMetrics> {
    Json(dashboard.summary())
}

pub(crate) async fn promotions_handler(
    State(dashboard): State<Arc<Dashboard>>,
) -> Json<PromotionChartView> {
    Json(dashboard.promotions().clone())
}

pub(crate) async fn hires_handler(
    State(dashboard): State<Arc<Dashboard>>,
) -> Json<HireSeriesView> {
    Json(dashboard.hires().clone())
}

pub(crate) async fn departments_handler(
    State(dashboard): State<Arc<Dashboard>>,
) -> Json<DepartmentsView> {
    Json(dashboard.departments().clone())
}

pub(crate) async fn service_distribution_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<SelectionQuery>,
) -> Json<ServiceHistogramView> {
    let view = dashboard.select(query.department.as_deref());
    debug!(
        department = %view.department,
        employees = view.employees,
        "department selection served"
    );
    Json(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetLoader;
    use crate::report::DashboardSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    const CSV: &str = "employee_id,department,region,education,gender,recruitment_channel,date_of_birth,join_date,length_of_service,KPIs_met >80%,awards_won?,is_promoted\n\
1,Technology,region_1,Bachelor's,m,other,1990-01-01,2020-02-01,1,Yes,No,Yes\n\
2,Technology,region_1,Bachelor's,f,other,1990-01-01,2020-02-01,2,No,No,No\n\
3,Sales & Marketing,region_2,Bachelor's,f,sourcing,1988-03-03,2019-05-05,10,No,No,No\n";

    fn router() -> Router {
        let dataset = DatasetLoader::new()
            .as_of(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"))
            .load_reader(CSV.as_bytes())
            .expect("dataset loads");
        let dashboard = Dashboard::build(Arc::new(dataset), DashboardSettings::default());
        dashboard_router(Arc::new(dashboard))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
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
        let payload = serde_json::from_slice(&body).expect("json body");
        (status, payload)
    }

    #[tokio::test]
    async fn summary_route_reports_counts() {
        let (status, payload) = get_json("/api/v1/dashboard/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["total_employees"], 3);
        assert_eq!(payload["total_promoted"], 1);
    }

    #[tokio::test]
    async fn selection_route_decodes_department_names() {
        let (status, payload) =
            get_json("/api/v1/dashboard/service-distribution?department=Sales%20%26%20Marketing")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["department"], "Sales & Marketing");
        assert_eq!(payload["values"], serde_json::json!([10]));
    }

    #[tokio::test]
    async fn selection_route_defaults_and_tolerates_unknown_departments() {
        let (_, payload) = get_json("/api/v1/dashboard/service-distribution").await;
        assert_eq!(payload["department"], "Technology");
        assert_eq!(payload["values"], serde_json::json!([1, 2]));

        let (status, payload) =
            get_json("/api/v1/dashboard/service-distribution?department=Legal").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["values"], serde_json::json!([]));
        assert!(payload.get("box_plot").is_none());
    }

    #[tokio::test]
    async fn hires_route_includes_window_metadata() {
        let (_, payload) = get_json("/api/v1/dashboard/hires").await;
        assert_eq!(payload["window"], 30);
        assert_eq!(payload["cutoff"], "2020-01-01");
        assert_eq!(payload["entries"][0]["join_date"], "2020-02-01");
        assert_eq!(payload["entries"][0]["employees"], 2);
    }
}
