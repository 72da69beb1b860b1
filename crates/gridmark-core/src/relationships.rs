//! Part relationships (`_rels/*.rels`)
//!
//! A part refers to other parts and to external resources through
//! relationship ids (`r:id="rId3"`). [`Relationships`] is the table of
//! one part; [`PartRelationships`] is the lazily created slot a part
//! keeps it in.

use crate::codec::attribute_enum;
use std::fmt;

attribute_enum! {
    /// Whether a relationship target lives inside the package
    pub enum TargetMode ("TargetMode") {
        /// Target is a part of the package (attribute omitted)
        Internal,
        External => "External",
    }
}

/// Relationship identifier (e.g. "rId1")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipId(String);

impl RelationshipId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of "rIdN" ids
    fn number(&self) -> Option<u32> {
        self.0.strip_prefix("rId").and_then(|n| n.parse().ok())
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Hyperlink,
    Comments,
    Drawing,
    VmlDrawing,
    Table,
    /// Any other relationship type URI
    Other(String),
}

const RELATIONSHIP_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

impl RelationshipType {
    /// Full type URI
    pub fn uri(&self) -> String {
        match self {
            RelationshipType::Other(uri) => uri.clone(),
            known => format!("{}/{}", RELATIONSHIP_NS, known.suffix()),
        }
    }

    /// Parse a type URI
    pub fn from_uri(uri: &str) -> Self {
        let suffix = uri
            .strip_prefix(RELATIONSHIP_NS)
            .and_then(|rest| rest.strip_prefix('/'));
        match suffix {
            Some("hyperlink") => RelationshipType::Hyperlink,
            Some("comments") => RelationshipType::Comments,
            Some("drawing") => RelationshipType::Drawing,
            Some("vmlDrawing") => RelationshipType::VmlDrawing,
            Some("table") => RelationshipType::Table,
            _ => RelationshipType::Other(uri.to_string()),
        }
    }

    fn suffix(&self) -> &str {
        match self {
            RelationshipType::Hyperlink => "hyperlink",
            RelationshipType::Comments => "comments",
            RelationshipType::Drawing => "drawing",
            RelationshipType::VmlDrawing => "vmlDrawing",
            RelationshipType::Table => "table",
            RelationshipType::Other(uri) => uri,
        }
    }
}

/// One entry of a relationship table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: RelationshipId,
    pub rel_type: RelationshipType,
    pub target: String,
    pub mode: TargetMode,
}

/// Relationship table of one part
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    items: Vec<Relationship>,
    /// Largest numeric id suffix seen so far
    last_id: u32,
}

impl Relationships {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the first relationship pointing at `target`, of any type
    pub fn get_id_by_target(&self, target: &str) -> Option<&RelationshipId> {
        self.items
            .iter()
            .find(|rel| rel.target == target)
            .map(|rel| &rel.id)
    }

    /// Id of the external relationship of type `rel_type` pointing at `target`
    ///
    /// Internal parts with the same target path never match.
    pub fn get_external_id(
        &self,
        rel_type: &RelationshipType,
        target: &str,
    ) -> Option<&RelationshipId> {
        self.items
            .iter()
            .find(|rel| {
                &rel.rel_type == rel_type
                    && rel.target == target
                    && rel.mode == TargetMode::External
            })
            .map(|rel| &rel.id)
    }

    /// Target of the relationship with the given id
    pub fn get_target_by_id(&self, id: &RelationshipId) -> Option<&str> {
        self.items
            .iter()
            .find(|rel| &rel.id == id)
            .map(|rel| rel.target.as_str())
    }

    /// Add an external link, returning the new id
    ///
    /// No duplicate check is done here, callers look the target up first.
    pub fn add_link<S: Into<String>>(
        &mut self,
        rel_type: RelationshipType,
        target: S,
    ) -> RelationshipId {
        self.add(rel_type, target, TargetMode::External)
    }

    /// Add a relationship with a fresh id
    pub fn add<S: Into<String>>(
        &mut self,
        rel_type: RelationshipType,
        target: S,
        mode: TargetMode,
    ) -> RelationshipId {
        let id = self.next_id();
        let target = target.into();
        log::debug!("added relationship {} -> {}", id, target);
        self.insert(Relationship {
            id: id.clone(),
            rel_type,
            target,
            mode,
        });
        id
    }

    /// `rId{max+1}`, or the lowest free number once the counter is exhausted
    fn next_id(&self) -> RelationshipId {
        if let Some(n) = self.last_id.checked_add(1) {
            return RelationshipId(format!("rId{}", n));
        }

        let mut used: Vec<u32> = self.items.iter().filter_map(|rel| rel.id.number()).collect();
        used.sort_unstable();
        used.dedup();

        let mut free = 1u32;
        for n in used {
            if n == free {
                free = free.saturating_add(1);
            } else if n > free {
                break;
            }
        }
        RelationshipId(format!("rId{}", free))
    }

    /// Insert an entry with an existing id (e.g. read from markup)
    pub fn insert(&mut self, relationship: Relationship) {
        if let Some(n) = relationship.id.number() {
            self.last_id = self.last_id.max(n);
        }
        self.items.push(relationship);
    }

    /// Get a relationship by id
    pub fn get(&self, id: &RelationshipId) -> Option<&Relationship> {
        self.items.iter().find(|rel| &rel.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }
}

/// Relationship slot of a part, created on first use
#[derive(Debug, Clone, Default)]
pub struct PartRelationships {
    table: Option<Relationships>,
}

impl PartRelationships {
    /// Create an unattached slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot holding an existing table
    pub fn with_table(table: Relationships) -> Self {
        Self { table: Some(table) }
    }

    /// Create the table if the part has none yet
    pub fn attach_if_required(&mut self) -> &mut Relationships {
        self.table.get_or_insert_with(|| {
            log::trace!("attaching relationship table");
            Relationships::new()
        })
    }

    pub fn is_attached(&self) -> bool {
        self.table.is_some()
    }

    /// The table, if attached
    pub fn table(&self) -> Option<&Relationships> {
        self.table.as_ref()
    }

    pub fn get_id_by_target(&self, target: &str) -> Option<&RelationshipId> {
        self.table.as_ref()?.get_id_by_target(target)
    }

    pub fn get_external_id(
        &self,
        rel_type: &RelationshipType,
        target: &str,
    ) -> Option<&RelationshipId> {
        self.table.as_ref()?.get_external_id(rel_type, target)
    }

    pub fn get_target_by_id(&self, id: &RelationshipId) -> Option<&str> {
        self.table.as_ref()?.get_target_by_id(id)
    }
}
