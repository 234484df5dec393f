use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The object-shaped tree carried by a [`Response`].
///
/// Values are tagged (`Value::Object`, `Value::Array`, scalars), so every
/// traversal has to say what it does with each shape.
pub type Data = Map<String, Value>;

/// A decoded backend response.
///
/// `is_complete` reports whether the upstream call that produced `data`
/// finished successfully. Formatters pass it through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub is_complete: bool,
}

impl Response {
    pub fn new(data: Data, is_complete: bool) -> Self {
        Self { data, is_complete }
    }

    /// A response whose upstream call finished successfully.
    pub fn complete(data: Data) -> Self {
        Self::new(data, true)
    }

    /// A response built from a partial (failed or timed out) upstream call.
    pub fn partial(data: Data) -> Self {
        Self::new(data, false)
    }

    /// An incomplete response with no data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a response body from JSON text, marking it complete.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::try_from(value)
    }

    /// Consumes the response, returning `data` as a `Value::Object`.
    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

impl TryFrom<Value> for Response {
    type Error = Error;

    /// Wraps a JSON object as a complete response. Any other shape is rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(Self::complete(data)),
            Value::Null => Err(Error::NotAnObject("null")),
            Value::Bool(_) => Err(Error::NotAnObject("a boolean")),
            Value::Number(_) => Err(Error::NotAnObject("a number")),
            Value::String(_) => Err(Error::NotAnObject("a string")),
            Value::Array(_) => Err(Error::NotAnObject("an array")),
        }
    }
}

impl From<Data> for Response {
    fn from(data: Data) -> Self {
        Self::complete(data)
    }
}
