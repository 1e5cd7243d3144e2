use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::constants::REQUIRED_FIELDS_MESSAGE;
use crate::runtime::EnvError;
use crate::types::api::APIError;

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(tag = "type")]
pub enum CtxError {
    API(APIError),
    Env(EnvError),
    Other(OtherError),
}

impl CtxError {
    /// Text shown to the user in the alert.
    pub fn message(&self) -> String {
        match self {
            CtxError::API(error) => error.message.to_owned(),
            CtxError::Env(error) => error.message(),
            CtxError::Other(error) => error.message(),
        }
    }
}

impl From<APIError> for CtxError {
    fn from(error: APIError) -> Self {
        CtxError::API(error)
    }
}

impl From<EnvError> for CtxError {
    fn from(error: EnvError) -> Self {
        CtxError::Env(error)
    }
}

impl From<OtherError> for CtxError {
    fn from(error: OtherError) -> Self {
        CtxError::Other(error)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OtherError {
    QuoteNotSelected,
    RequiredFieldsMissing,
    EventNotFound,
}

impl OtherError {
    pub fn message(&self) -> String {
        match &self {
            OtherError::QuoteNotSelected => "No se encontró ID de cotización".to_owned(),
            OtherError::RequiredFieldsMissing => REQUIRED_FIELDS_MESSAGE.to_owned(),
            OtherError::EventNotFound => "Evento no encontrado".to_owned(),
        }
    }
    pub fn code(&self) -> u64 {
        match &self {
            OtherError::QuoteNotSelected => 1,
            OtherError::RequiredFieldsMissing => 2,
            OtherError::EventNotFound => 3,
        }
    }
}

impl Serialize for OtherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("OtherError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
