//! Send Order Emails Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, notifications::errors::into_status_error, state::State};

/// Send Order Emails Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SendOrderEmailsRequest {
    /// Order number to send confirmation emails for
    pub order_number: String,

    /// Customer email, which must match the one on the order
    pub email: String,
}

/// Emails Sent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmailsSentResponse {
    /// Dispatch status
    pub status: String,
}

/// Send Order Emails Handler
///
/// Re-sends the customer confirmation and operator notification for an
/// existing order. Requires the operator bearer token.
#[endpoint(
    tags("notifications"),
    summary = "Send Order Emails",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Emails sent"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid operator token"),
        (status_code = StatusCode::NOT_FOUND, description = "No matching order"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Email delivery not configured"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Email provider failure"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SendOrderEmailsRequest>,
    depot: &mut Depot,
) -> Result<Json<EmailsSentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .emails
        .send_confirmation(request.order_number, request.email)
        .await
        .map_err(into_status_error)?;

    Ok(Json(EmailsSentResponse {
        status: "sent".to_string(),
    }))
}
