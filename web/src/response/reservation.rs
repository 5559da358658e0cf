use domain::reservations::Model;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body of a successful `POST /create-reservation`: every document the
/// expansion produced, plus the optional opaque enrichment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateResponse {
    pub(crate) reservations: Vec<Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub(crate) ai_insights: Option<Value>,
}

/// Body of `GET /all`, mirroring the `allReservations` push event.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllReservationsResponse {
    pub(crate) user_reservations: Vec<Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_response_uses_camel_case_and_drops_absent_insights() {
        let response = CreateResponse {
            reservations: vec![],
            ai_insights: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("reservations").is_some());
        assert!(value.get("aiInsights").is_none());

        let response = CreateResponse {
            reservations: vec![],
            ai_insights: Some(serde_json::json!({"score": 0.9})),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["aiInsights"]["score"], 0.9);
    }
}
