use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON body that has passed `validator` checks. Rejections are 400 with per-field messages.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "status": "fail",
                    "message": format!("Invalid JSON: {}", rejection.body_text()),
                });
                (rejection.status(), Json(payload))
            })?;

        value.validate().map_err(|errors| {
            let payload = json!({
                "status": "fail",
                "message": summarize(&errors),
                "errors": by_field(&errors),
            });
            (StatusCode::BAD_REQUEST, Json(payload))
        })?;

        Ok(Self(value))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "email" => "Invalid email format".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        _ => format!("Invalid {field}"),
    }
}

fn summarize(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |error| format!("{field}: {}", describe(&field, error)))
        })
        .collect();

    if messages.is_empty() {
        return "Validation failed".to_string();
    }
    messages.sort();
    messages.join("; ")
}

fn by_field(errors: &ValidationErrors) -> Value {
    let map: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|error| describe(&field, error))
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::cart::AddToCartRequest;

    #[test]
    fn summary_names_each_failing_field() {
        let req = AddToCartRequest {
            product_id: 0,
            quantity: 0,
        };
        let errors = req.validate().unwrap_err();

        let summary = summarize(&errors);
        assert!(summary.contains("product_id"));
        assert!(summary.contains("quantity"));

        let fields = by_field(&errors);
        assert!(fields.get("quantity").is_some());
    }
}
