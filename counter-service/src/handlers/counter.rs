//! Counter lookup handler.

use crate::config::counter_generation_params;
use crate::error::CounterError;
use crate::models::{CounterRequest, CounterResponse};
use crate::services::metrics;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use service_core::observability::extract_request_id;
use std::time::Instant;

/// `POST` handler: look up counters for the requested character.
#[tracing::instrument(skip_all, fields(request_id = tracing::field::Empty))]
pub async fn get_counter(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if let Some(request_id) = extract_request_id(&headers) {
        tracing::Span::current().record("request_id", request_id.as_str());
    }

    let result = match body {
        Ok(body) => lookup_counter(&state, &body).await,
        Err(rejection) => Err(CounterError::from(rejection)),
    };

    match result {
        Ok(response) => {
            metrics::record_request("ok");
            Json(response).into_response()
        }
        Err(e) => {
            metrics::record_request(e.outcome());
            e.into_response()
        }
    }
}

/// Fallback for every other verb on the counter route.
pub async fn method_not_allowed() -> Response {
    metrics::record_request(CounterError::MethodNotAllowed.outcome());
    CounterError::MethodNotAllowed.into_response()
}

async fn lookup_counter(state: &AppState, body: &[u8]) -> Result<CounterResponse, CounterError> {
    let request = CounterRequest::from_slice(body)?;
    let character = request.character().ok_or(CounterError::MissingCharacter)?;

    let prompt = state.prompt.render(character);
    let params = counter_generation_params();
    let provider = state.text_provider.name();

    let started = Instant::now();
    let result = state.text_provider.generate(&prompt, &params).await;
    metrics::record_provider_latency(provider, &params.model, started.elapsed().as_secs_f64());

    let text = result.and_then(|response| {
        tracing::info!(
            model = %params.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = response.finish_reason.as_str(),
            "Counter lookup completed"
        );
        response.text.ok_or(ProviderError::EmptyResponse)
    });

    match text {
        Ok(result) => Ok(CounterResponse { result }),
        Err(e) => {
            metrics::record_provider_error(provider, e.kind());
            Err(e.into())
        }
    }
}
