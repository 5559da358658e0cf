use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `PUT /update-styles`. The `styles` object must carry a
/// `statusStyles` key; anything else is rejected before touching the store.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateParams {
    #[schema(value_type = Object)]
    pub(crate) styles: Value,
}
