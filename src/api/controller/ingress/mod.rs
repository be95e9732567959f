use axum::extract::{Query, State};
use axum::Json;

use crate::api::dto::ingress_dto::IngressListQuery;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::ingress::dto::ingress_summary::IngressSummary;
use crate::domain::ingress::service::ingress_service::IngressFilter;
use crate::errors::AppError;

pub struct IngressController;

impl IngressController {
    pub async fn list_ingresses(
        State(state): State<AppState>,
        Query(query): Query<IngressListQuery>,
    ) -> Result<Json<Vec<IngressSummary>>, AppError> {
        let filter = IngressFilter::new(query.path, query.service);
        to_json(
            state
                .ingress_service
                .list_ingresses(query.namespace.as_deref(), &filter)
                .await,
        )
    }
}
