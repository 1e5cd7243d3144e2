use serde::{de::Unexpected, Deserialize, Deserializer, Serialize};

use crate::types::number_or_string::number_or_string;

/// `success: true`, anything else fails to deserialize.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SuccessFlag;

impl<'de> Deserialize<'de> for SuccessFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match bool::deserialize(deserializer)? {
            true => Ok(SuccessFlag),
            false => Err(serde::de::Error::invalid_value(
                Unexpected::Bool(false),
                &"true",
            )),
        }
    }
}

/// Envelope of every mutating endpoint: `{success: true, ...}` or
/// `{success: false, error}`.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(APISuccess<T>),
    Err {
        #[serde(default)]
        error: Option<String>,
    },
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub struct APISuccess<T> {
    pub success: SuccessFlag,
    #[serde(flatten)]
    pub result: T,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct APIError {
    pub message: String,
}

impl APIError {
    pub fn unknown() -> Self {
        APIError {
            message: "Error desconocido".to_owned(),
        }
    }
}

impl<T> APIResult<T> {
    pub fn into_result(self) -> Result<T, APIError> {
        match self {
            APIResult::Ok(success) => Ok(success.result),
            APIResult::Err { error: Some(message) } => Err(APIError { message }),
            APIResult::Err { error: None } => Err(APIError::unknown()),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Default, Deserialize, Debug)]
pub struct EmptyResponse {}

#[derive(Clone, PartialEq, Eq, Default, Deserialize, Debug)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Default, Serialize, Deserialize, Debug)]
pub struct QuoteTotals {
    #[serde(default, deserialize_with = "number_or_string")]
    pub gastos_traslado: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub valor_neto: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub valor_iva: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub valor_total: f64,
}
