//! Serde helpers for numbers the dashboard exchanges as text (`"31.245"`, `"85"`).
//!
//! Values serialize through `Display` as JSON strings and deserialize from either
//! a JSON string or a JSON number.

use serde::{Deserialize, Deserializer, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw<T> {
    Value(T),
    Text(String),
}

fn from_raw<T, E>(raw: Raw<T>) -> Result<T, E>
where
    T: FromStr,
    T::Err: Display,
    E: serde::de::Error,
{
    match raw {
        Raw::Value(v) => Ok(v),
        Raw::Text(s) => s
            .trim()
            .parse::<T>()
            .map_err(|e| E::custom(format!("invalid numeric text {s:?}: {e}"))),
    }
}

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let raw = Raw::<T>::deserialize(deserializer)?;
    from_raw(raw)
}

pub mod option {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        match Option::<Raw<T>>::deserialize(deserializer)? {
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => from_raw(raw).map(Some),
            None => Ok(None),
        }
    }
}
