//! Serde helpers that always write ids as hyphenated strings.
//!
//! The BSON writer used for documents and the one used for filter values do not
//! agree on `Uuid` (binary vs string), so stored ids are pinned to strings.

use serde::{de, Deserialize, Deserializer, Serializer};
use uuid::Uuid;

pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&id.hyphenated())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Uuid::parse_str(&raw).map_err(de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.serialize_some(&id.hyphenated().to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Uuid>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| Uuid::parse_str(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Doc {
        #[serde(with = "super")]
        id: Uuid,
        #[serde(default, with = "super::option")]
        parent: Option<Uuid>,
    }

    #[test]
    fn test_ids_written_as_strings_in_bson() {
        let doc = Doc {
            id: Uuid::now_v7(),
            parent: None,
        };
        let bson = mongodb::bson::to_document(&doc).unwrap();
        assert_eq!(bson.get_str("id").unwrap(), doc.id.to_string());
        assert!(bson.get("parent").unwrap().as_null().is_some());

        let raw = mongodb::bson::to_vec(&doc).unwrap();
        let back: Doc = mongodb::bson::from_slice(&raw).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_missing_optional_id_is_none() {
        let id = Uuid::now_v7();
        let doc: Doc = serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        assert_eq!(doc.parent, None);
    }
}
