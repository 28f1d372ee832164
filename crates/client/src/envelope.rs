//! Backend response envelope.

use serde::Deserialize;

use crate::error::ApiError;

/// Every backend response arrives as `{ data, message }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,

    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Extract the payload, failing when the backend sent none.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::Decode("response envelope carried no data".to_string()))
    }
}

/// Error bodies arrive as `{ message }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_and_message() {
        let envelope: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"data":[1,2],"message":"ok"}"#).unwrap();
        assert_eq!(envelope.data, Some(vec![1, 2]));
        assert_eq!(envelope.message.as_deref(), Some("ok"));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let envelope: Envelope<String> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.message.is_none());
        assert!(envelope.into_data().is_err());
    }
}
