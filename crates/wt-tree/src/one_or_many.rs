//! Single-or-array decoding.
//!
//! The source format writes a lone child as an object and several children as
//! an array. Both shapes (and `null`) decode into a `Vec`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// `deserialize_with` helper for `Vec` fields written as one item or many.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<OneOrMany<T>>::deserialize(deserializer)?;
    Ok(value.map(Vec::from).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "one_or_many")]
        items: Vec<u32>,
    }

    #[test]
    fn test_single_item_becomes_vec() {
        let holder: Holder = serde_json::from_str(r#"{"items": 7}"#).unwrap();
        assert_eq!(holder.items, vec![7]);
    }

    #[test]
    fn test_array_kept_in_order() {
        let holder: Holder = serde_json::from_str(r#"{"items": [3, 1, 2]}"#).unwrap();
        assert_eq!(holder.items, vec![3, 1, 2]);
    }

    #[test]
    fn test_null_and_missing_are_empty() {
        let holder: Holder = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(holder.items.is_empty());
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.items.is_empty());
    }
}
