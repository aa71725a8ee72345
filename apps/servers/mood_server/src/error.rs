use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::borrow::Cow;
use std::collections::HashMap;
use tower::BoxError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("error in the request body")]
	UnprocessableEntity { errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>> },

	#[error(transparent)]
	InvalidJson(#[from] JsonRejection),

	#[error("request timed out")]
	RequestTimeout,

	#[error("service is overloaded, try again later")]
	ServiceOverloaded,

	#[error("unhandled middleware error: {0}")]
	TowerError(BoxError),

	#[error("background task failed: {0}")]
	TaskJoin(#[from] tokio::task::JoinError),

	#[error("an internal server error occurred")]
	Anyhow(#[from] anyhow::Error),
}

impl ApiError {
	pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Cow<'static, str>>,
		V: Into<Cow<'static, str>>,
	{
		let mut error_map = HashMap::new();

		for (key, val) in errors {
			error_map.entry(key.into()).or_insert_with(Vec::new).push(val.into());
		}

		Self::UnprocessableEntity { errors: error_map }
	}

	fn status_code(&self) -> StatusCode {
		match self {
			Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			Self::InvalidJson(rejection) => rejection.status(),
			Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
			Self::ServiceOverloaded => StatusCode::SERVICE_UNAVAILABLE,
			Self::TowerError(_) | Self::TaskJoin(_) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[derive(serde::Serialize)]
struct Errors {
	errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response<Body> {
		let status = self.status_code();
		match self {
			Self::UnprocessableEntity { errors } => return (status, Json(Errors { errors })).into_response(),
			Self::InvalidJson(ref rejection) => {
				return (status, Json(Errors::single("body", rejection.body_text()))).into_response();
			}
			Self::TowerError(ref e) => tracing::error!("middleware error: {e:?}"),
			Self::TaskJoin(ref e) => tracing::error!("forecast task failed: {e:?}"),
			Self::Anyhow(ref e) => tracing::error!("Generic error: {e:?}"),
			Self::RequestTimeout | Self::ServiceOverloaded => (),
		}

		(status, self.to_string()).into_response()
	}
}

impl Errors {
	fn single(field: &'static str, message: String) -> Self {
		Self {
			errors: HashMap::from([(Cow::Borrowed(field), vec![Cow::Owned(message)])]),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn groups_messages_by_field() {
		let error = ApiError::unprocessable_entity([("history[0].ds", "bad date"), ("history[0].ds", "again"), ("history[2].y", "not finite")]);
		let ApiError::UnprocessableEntity { errors } = &error else {
			panic!("expected unprocessable entity");
		};
		assert_eq!(errors["history[0].ds"].len(), 2);
		assert_eq!(errors["history[2].y"].len(), 1);
		assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	}

	#[test]
	fn middleware_errors_map_to_statuses() {
		assert_eq!(ApiError::RequestTimeout.status_code(), StatusCode::REQUEST_TIMEOUT);
		assert_eq!(ApiError::ServiceOverloaded.status_code(), StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(ApiError::Anyhow(anyhow::anyhow!("boom")).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
