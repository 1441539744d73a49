use crate::model::peer::PeerId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque JSON carried between peers. The relay never looks inside it,
/// except to stamp the sender onto room broadcasts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(pub Value);

impl Payload {
    /// Attach the sender identity the way room broadcasts carry it.
    ///
    /// Object payloads get a `from` field (overwriting any client-supplied
    /// one), a missing/`null` payload becomes just `{ "from": .. }`, and
    /// anything else is wrapped as `{ "from": .., "data": .. }`.
    pub fn tagged_with(self, from: &PeerId) -> Payload {
        let from = Value::String(from.to_string());

        let fields = match self.0 {
            Value::Object(mut fields) => {
                fields.insert("from".to_owned(), from);
                fields
            }
            Value::Null => {
                let mut fields = Map::new();
                fields.insert("from".to_owned(), from);
                fields
            }
            other => {
                let mut fields = Map::new();
                fields.insert("from".to_owned(), from);
                fields.insert("data".to_owned(), other);
                fields
            }
        };

        Payload(Value::Object(fields))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
