use serde::{Deserialize, Serialize};

use crate::types::number_or_string::number_or_string;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ServiceOption {
    pub id: u64,
    pub nombre: String,
    #[serde(deserialize_with = "number_or_string")]
    pub precio_base: f64,
    #[serde(default)]
    pub es_parametrizable: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Select,
    Boolean,
    Number,
    #[serde(other)]
    Text,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ServiceParameter {
    pub id: u64,
    pub nombre: String,
    pub tipo: ParameterType,
    #[serde(default)]
    pub opciones_list: Vec<String>,
    #[serde(default)]
    pub valor_por_defecto: Option<serde_json::Value>,
    #[serde(default)]
    pub requerido: bool,
}

impl ServiceParameter {
    pub fn label(&self) -> String {
        if self.requerido {
            format!("{} *", self.nombre)
        } else {
            self.nombre.to_owned()
        }
    }
    /// Choices offered by select-like inputs as `(value, text)` pairs.
    pub fn options(&self) -> Vec<(String, String)> {
        match self.tipo {
            ParameterType::Select => self
                .opciones_list
                .iter()
                .map(|option| (option.to_owned(), option.to_owned()))
                .collect(),
            ParameterType::Boolean => vec![
                ("true".to_owned(), "Sí".to_owned()),
                ("false".to_owned(), "No".to_owned()),
            ],
            ParameterType::Number | ParameterType::Text => vec![],
        }
    }
    /// Value the input starts with: the first choice for selects, the default otherwise.
    pub fn initial_value(&self) -> String {
        match self.tipo {
            ParameterType::Select | ParameterType::Boolean => self
                .options()
                .into_iter()
                .next()
                .map(|(value, _)| value)
                .unwrap_or_default(),
            ParameterType::Number | ParameterType::Text => match &self.valor_por_defecto {
                Some(serde_json::Value::String(value)) => value.to_owned(),
                Some(serde_json::Value::Number(value)) => value.to_string(),
                Some(serde_json::Value::Bool(value)) => value.to_string(),
                _ => String::new(),
            },
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ParameterInput {
    pub parameter: ServiceParameter,
    pub value: String,
}

impl From<ServiceParameter> for ParameterInput {
    fn from(parameter: ServiceParameter) -> Self {
        ParameterInput {
            value: parameter.initial_value(),
            parameter,
        }
    }
}
