// src/common/serde_ext.rs

use serde::{de, Deserialize, Deserializer};

// Os formulários antigos mandam flags como 0/1 ou "true"/"false".
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagRepr {
    fn into_bool<E: de::Error>(self) -> Result<bool, E> {
        match self {
            FlagRepr::Bool(b) => Ok(b),
            FlagRepr::Int(0) => Ok(false),
            FlagRepr::Int(1) => Ok(true),
            FlagRepr::Int(n) => Err(E::custom(format!("flag inválida: {n}"))),
            FlagRepr::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" => Ok(false),
                other => Err(E::custom(format!("flag inválida: {other}"))),
            },
        }
    }
}

/// Para campos `Option<bool>` com `#[serde(default, deserialize_with = "optional_flag")]`.
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FlagRepr>::deserialize(deserializer)?
        .map(FlagRepr::into_bool)
        .transpose()
}
