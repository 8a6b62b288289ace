use actix_web::HttpResponse;
use serde::Serialize;

/// Uniform response envelope used by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        status: "success",
        code: 200,
        message: message.to_string(),
        data: Some(data),
    })
}

pub fn success_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()> {
        status: "success",
        code: 200,
        message: message.to_string(),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope {
            status: "success",
            code: 200,
            message: "Book uploaded successfully".to_string(),
            data: Some(serde_json::json!({"id": 1})),
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["code"], 200);
        assert_eq!(value["data"]["id"], 1);
    }

    #[test]
    fn empty_data_is_omitted() {
        let envelope = Envelope::<()> {
            status: "success",
            code: 200,
            message: "ok".to_string(),
            data: None,
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("data").is_none());
    }
}
