//! proptest strategies shared by the request modules' generative tests.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Any JSON value, nested at most two levels deep.
pub(crate) fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|n| json!(n)),
        "\\PC{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Arbitrary printable text, including the empty string.
pub(crate) fn text() -> impl Strategy<Value = String> {
    "\\PC{0,24}"
}

pub(crate) fn text_value() -> impl Strategy<Value = Value> {
    text().prop_map(Value::String)
}

/// Values `enum` accepts as a boolean.
pub(crate) fn lax_bool() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (0u64..=1).prop_map(|n| json!(n)),
        prop::sample::select(vec!["true", "False", " yes ", "OFF", "t", "n", "1", "0"])
            .prop_map(|spelling| json!(spelling)),
    ]
}

/// Keys no request declares, each with an arbitrary value.
pub(crate) fn extra_keys() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("x_[a-z]{1,8}", any_json()), 0..4)
}

/// Build an input object from optional declared fields followed by extras.
pub(crate) fn object_of<'a>(
    fields: impl IntoIterator<Item = (&'a str, Option<Value>)>,
    extras: Vec<(String, Value)>,
) -> Value {
    let mut object = Map::new();
    for (name, value) in fields {
        if let Some(value) = value {
            object.insert(name.to_string(), value);
        }
    }
    object.extend(extras);
    Value::Object(object)
}
