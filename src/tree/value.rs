use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use super::{List, Map, Node, Tree};
use crate::{Error, Result};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(text) => serializer.serialize_str(text),
            Node::Map(map) => serialize_map(map, serializer),
            Node::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for slot in list {
                    // holes serialize as `null`
                    seq.serialize_element(slot)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_map(&self.root, serializer)
    }
}

fn serialize_map<S: Serializer>(map: &Map, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map {
        out.serialize_entry(key, value)?;
    }
    out.end()
}

impl Node {
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(text) => Value::String(text.clone()),
            Node::Map(map) => Value::Object(map_to_value(map)),
            Node::List(list) => Value::Array(
                list.iter()
                    .map(|slot| slot.as_ref().map_or(Value::Null, Node::to_value))
                    .collect(),
            ),
        }
    }
}

impl Tree {
    /// JSON view of the tree. Holes become `null`.
    pub fn to_value(&self) -> Value {
        Value::Object(map_to_value(&self.root))
    }

    /// Build a tree from a JSON object.
    ///
    /// Scalars become leaves holding their JSON text (`true`, `42`), `null`
    /// list items become holes and `null` object members are dropped.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Tree {
                root: object_from_value(object),
            }),
            other => Err(Error::encode(format!(
                "expected a JSON object at the root, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl TryFrom<Value> for Tree {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Tree::from_value(value)
    }
}

fn map_to_value(map: &Map) -> serde_json::Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), value.to_value()))
        .collect()
}

fn object_from_value(object: serde_json::Map<String, Value>) -> Map {
    object
        .into_iter()
        .filter_map(|(key, value)| node_from_value(value).map(|node| (key, node)))
        .collect()
}

fn node_from_value(value: Value) -> Option<Node> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(Node::Leaf(text)),
        Value::Bool(flag) => Some(Node::Leaf(flag.to_string())),
        Value::Number(number) => Some(Node::Leaf(number.to_string())),
        Value::Array(items) => Some(Node::List(
            items.into_iter().map(node_from_value).collect::<List>(),
        )),
        Value::Object(object) => Some(Node::Map(object_from_value(object))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
