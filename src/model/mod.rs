use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a part inside an assembly document. Links refer to parts
/// through this value, so it doubles as the identity used when counting
/// occurrences.
pub type PartId = String;

/// Property group under which user-defined part information is stored.
pub const PART_INFO_GROUP: &str = "PartInfo";

/// Synthesised key holding the label of the linked part.
pub const NAME_KEY: &str = "Name";
/// Synthesised key holding the occurrence count of a part.
pub const QUANTITY_KEY: &str = "Quantity";
/// Header of the catch-all column receiving non-promoted fields.
pub const MISC_KEY: &str = "Misc. Info";

/// Returns `true` for keys computed by the BOM engine rather than read from
/// part information.
pub fn is_reserved_key(key: &str) -> bool {
    key == NAME_KEY || key == QUANTITY_KEY
}

/// Kind of object a part represents in the modelling application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartKind {
    /// Container part (`App::Part`).
    #[serde(rename = "App::Part")]
    Part,
    /// Solid body (`PartDesign::Body`).
    #[serde(rename = "PartDesign::Body")]
    Body,
    /// Anything else, such as sketches or datum objects.
    #[serde(other)]
    Other,
}

impl PartKind {
    /// Only containers are listed in a bill of materials.
    pub fn is_container(self) -> bool {
        matches!(self, PartKind::Part | PartKind::Body)
    }
}

/// Storage type of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "App::PropertyString")]
    String,
    #[serde(rename = "App::PropertyFloat")]
    Float,
    #[serde(rename = "App::PropertyInteger")]
    Integer,
    #[serde(rename = "App::PropertyBool")]
    Bool,
    #[serde(other)]
    Other,
}

/// A named, grouped property attached to a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub group: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub value: String,
}

impl Property {
    /// Creates an empty string property in the part information group.
    pub fn part_info(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: PART_INFO_GROUP.to_string(),
            kind: PropertyKind::String,
            value: String::new(),
        }
    }

    /// Returns `true` when the property carries editable part information.
    pub fn is_part_info(&self) -> bool {
        self.group == PART_INFO_GROUP && self.kind == PropertyKind::String
    }
}

/// A reusable part or body defined in the assembly document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub label: String,
    pub kind: PartKind,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Part {
    /// Creates a part without properties.
    pub fn new(id: impl Into<PartId>, label: impl Into<String>, kind: PartKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            properties: Vec::new(),
        }
    }

    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties
            .iter_mut()
            .find(|property| property.name == name)
    }

    /// Adds or replaces a part information value.
    pub fn set_info(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.property_mut(name) {
            Some(property) => property.value = value,
            None => {
                let mut property = Property::part_info(name);
                property.value = value;
                self.properties.push(property);
            }
        }
    }
}

/// A placed occurrence of a part inside the assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub id: String,
    pub linked: PartId,
}

/// The assembly document: reusable parts, their placed occurrences and the
/// document fields used when filling drawing title blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assembly {
    pub label: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub created_by: String,
    /// Part information fields every part is expected to carry.
    #[serde(default)]
    pub required_info: Vec<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Diagonal of the model bounding box in millimetres.
    #[serde(default)]
    pub bounding_diagonal: Option<f64>,
}

impl Assembly {
    pub fn part(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.id == id)
    }

    pub fn part_mut(&mut self, id: &str) -> Option<&mut Part> {
        self.parts.iter_mut().find(|part| part.id == id)
    }
}

/// A link resolved against the part it places.
#[derive(Debug, Clone, Copy)]
pub struct PartInstance<'a> {
    pub link: &'a Link,
    pub part: &'a Part,
}

impl<'a> PartInstance<'a> {
    /// Identity of the underlying part; occurrences of the same part share it.
    pub fn identity(&self) -> &'a str {
        &self.part.id
    }

    pub fn linked_label(&self) -> &'a str {
        &self.part.label
    }
}

/// Ordered key → value mapping of part information.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Iteration follows first-insertion order, which is also the order used for
/// the misc column and for JSON serialisation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataRecord {
    entries: Vec<(String, String)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = MetadataRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for MetadataRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetadataRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = MetadataRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = MetadataRecord::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
