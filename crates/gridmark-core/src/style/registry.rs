//! Style registry for deduplication

use super::{NamedStyle, Style};
use ahash::AHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle to the one registry of an open document
///
/// Every worksheet of a workbook holds a clone of the same handle so that
/// deduplication stays document-wide.
pub type SharedStyles = Rc<RefCell<StyleRegistry>>;

/// Identifier of a registered style definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleId(u32);

impl StyleId {
    /// Id read back from markup (`dxfId`, `s`)
    ///
    /// Only meaningful against the registry the markup was written from.
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Position in the registry (also the `xf`/`dxf` index when written)
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Style of a cell, hyperlink or rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleRef {
    /// No explicit style, inherit whatever applies
    #[default]
    DefaultDirect,
    /// A registered definition
    Id(StyleId),
}

impl StyleRef {
    /// The registered id, if any
    pub fn id(self) -> Option<StyleId> {
        match self {
            StyleRef::DefaultDirect => None,
            StyleRef::Id(id) => Some(id),
        }
    }

    pub fn is_default(self) -> bool {
        self == StyleRef::DefaultDirect
    }

    /// `self` unless it is the sentinel, otherwise `fallback`
    pub fn or(self, fallback: StyleRef) -> StyleRef {
        if self.is_default() {
            fallback
        } else {
            self
        }
    }
}

impl From<StyleId> for StyleRef {
    fn from(id: StyleId) -> Self {
        StyleRef::Id(id)
    }
}

/// Deduplicating store of style definitions
///
/// Styles are compared by content: registering an equal definition twice
/// returns the same id. Ids are handed out in registration order and are
/// never reused.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    /// All unique definitions, indexed by id
    styles: Vec<Style>,
    /// Content lookup for deduplication
    index_map: AHashMap<Style, StyleId>,
    /// Ids of named style categories built so far
    named_defaults: AHashMap<NamedStyle, StyleId>,
}

impl StyleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry behind a shared handle
    pub fn shared() -> SharedStyles {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Register a definition, returning the id of an equal one if present
    pub fn add_styles(&mut self, style: Style) -> StyleRef {
        if let Some(&id) = self.index_map.get(&style) {
            log::trace!("style already registered as {}", id);
            return StyleRef::Id(id);
        }

        let id = StyleId(self.styles.len() as u32);
        log::debug!("registered style {}", id);
        self.index_map.insert(style.clone(), id);
        self.styles.push(style);
        StyleRef::Id(id)
    }

    /// Id of the canonical definition for a named style category
    ///
    /// The definition is built and registered on the first request only.
    pub fn default_for(&mut self, category: NamedStyle) -> StyleRef {
        if let Some(&id) = self.named_defaults.get(&category) {
            return StyleRef::Id(id);
        }

        let style_ref = self.add_styles(category.canonical_style());
        if let Some(id) = style_ref.id() {
            self.named_defaults.insert(category, id);
        }
        style_ref
    }

    /// Get a definition by id
    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id.0 as usize)
    }

    /// Get the definition behind a reference (`None` for the sentinel)
    pub fn resolve(&self, style: StyleRef) -> Option<&Style> {
        style.id().and_then(|id| self.get(id))
    }

    /// Get the number of registered definitions
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over all definitions with their ids
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &Style)> {
        self.styles
            .iter()
            .enumerate()
            .map(|(i, s)| (StyleId(i as u32), s))
    }
}
