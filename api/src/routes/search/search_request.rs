use serde::{Deserialize, Serialize};

/// Request payload for /search.
#[derive(Debug, Deserialize)]
pub struct UserSearchRequest {
    /// Natural language question.
    pub query: String,
    /// Caller identity recorded in the interaction log.
    pub user_id: String,
}

/// Response payload for /search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Final model answer (plain text), returned verbatim.
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_body_deserializes() {
        let body: UserSearchRequest =
            serde_json::from_str(r#"{"query":"What is the attendance policy?","user_id":"u1"}"#)
                .unwrap();
        assert_eq!(body.query, "What is the attendance policy?");
        assert_eq!(body.user_id, "u1");
    }

    #[test]
    fn missing_query_is_rejected() {
        let res = serde_json::from_str::<UserSearchRequest>(r#"{"user_id":"u1"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_user_id_is_rejected() {
        let res = serde_json::from_str::<UserSearchRequest>(r#"{"query":"q"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn response_serializes_to_output_field() {
        let json = serde_json::to_value(SearchResponse {
            output: "Students are required to maintain...".into(),
        })
        .unwrap();
        assert_eq!(json["output"], "Students are required to maintain...");
    }
}
