//! Wire types for the ArangoDB HTTP API.

use serde::{Deserialize, Serialize};

/// Collection kind, as encoded by the collection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionType {
    /// Regular document collection (wire code 2)
    #[default]
    Document,
    /// Edge collection (wire code 3)
    Edge,
}

impl CollectionType {
    /// Decode the numeric wire representation. Unknown codes fall back to
    /// document collections, matching how the server treats absent types.
    pub fn from_code(code: u8) -> Self {
        match code {
            3 => Self::Edge,
            _ => Self::Document,
        }
    }

    /// Numeric wire representation (2 = document, 3 = edge).
    pub fn code(self) -> u8 {
        match self {
            Self::Document => 2,
            Self::Edge => 3,
        }
    }

    /// Human-readable label used in tool responses.
    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Edge => "edge",
        }
    }
}

/// Collection lifecycle status, as encoded by the collection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    NewBorn,
    Unloaded,
    Loaded,
    Unloading,
    Deleted,
    Loading,
    Unknown,
}

impl CollectionStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::NewBorn,
            2 => Self::Unloaded,
            3 => Self::Loaded,
            4 => Self::Unloading,
            5 => Self::Deleted,
            6 => Self::Loading,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label used in tool responses.
    pub fn label(self) -> &'static str {
        match self {
            Self::NewBorn => "new-born",
            Self::Unloaded => "unloaded",
            Self::Loaded => "loaded",
            Self::Unloading => "unloading",
            Self::Deleted => "deleted",
            Self::Loading => "loading",
            Self::Unknown => "unknown",
        }
    }
}

/// Descriptor returned by the collection API for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(rename = "type", default)]
    pub collection_type: Option<u8>,
    #[serde(rename = "isSystem", default)]
    pub is_system: bool,
}

impl CollectionDescriptor {
    /// Resolved type label (`document` / `edge`).
    pub fn type_label(&self) -> &'static str {
        CollectionType::from_code(self.collection_type.unwrap_or(2)).label()
    }

    /// Resolved status label (`loaded`, `unloaded`, ...).
    pub fn status_label(&self) -> &'static str {
        CollectionStatus::from_code(self.status.unwrap_or(0)).label()
    }
}

/// Metadata the document API returns for save/update/remove operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_rev")]
    pub rev: String,
    #[serde(rename = "_oldRev", skip_serializing_if = "Option::is_none")]
    pub old_rev: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_type_codes_round_trip() {
        assert_eq!(CollectionType::from_code(2), CollectionType::Document);
        assert_eq!(CollectionType::from_code(3), CollectionType::Edge);
        assert_eq!(CollectionType::Document.code(), 2);
        assert_eq!(CollectionType::Edge.code(), 3);
    }

    #[test]
    fn test_unknown_type_code_defaults_to_document() {
        assert_eq!(CollectionType::from_code(7), CollectionType::Document);
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(CollectionType::Document.label(), "document");
        assert_eq!(CollectionType::Edge.label(), "edge");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(CollectionStatus::from_code(3).label(), "loaded");
        assert_eq!(CollectionStatus::from_code(2).label(), "unloaded");
        assert_eq!(CollectionStatus::from_code(42).label(), "unknown");
    }

    #[test]
    fn test_descriptor_deserializes_collection_api_shape() {
        let json = r#"{
            "id": "9326",
            "name": "users",
            "status": 3,
            "type": 2,
            "isSystem": false,
            "globallyUniqueId": "h8B2B671BCFD0/9326"
        }"#;
        let descriptor: CollectionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.name, "users");
        assert_eq!(descriptor.type_label(), "document");
        assert_eq!(descriptor.status_label(), "loaded");
        assert!(!descriptor.is_system);
    }

    #[test]
    fn test_document_meta_wire_names() {
        let json = r#"{"_id": "users/42", "_key": "42", "_rev": "_hV2xyz-_-"}"#;
        let meta: DocumentMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.id, "users/42");
        assert_eq!(meta.key, "42");
        assert!(meta.old_rev.is_none());
    }
}
