//! Catalog model
//!
//! Plain data: a [`Catalog`] is an ordered list of [`Category`], each holding
//! ordered [`Group`]s, each holding [`Animation`]s. Nothing here is mutated
//! after the builder hands it out; a refresh produces a new catalog.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Animation technology a group is rendered with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tech {
    /// Declarative animation library
    Framer,
    /// Native CSS keyframes/transitions
    Css,
    /// Hand-written script timing
    Js,
}

impl Tech {
    /// Lowercase name, as used in ids and metadata
    pub fn as_str(self) -> &'static str {
        match self {
            Tech::Framer => "framer",
            Tech::Css => "css",
            Tech::Js => "js",
        }
    }

    /// Suffix appended to a base group id for this technology
    ///
    /// Only Framer and CSS produce group variants.
    pub fn id_suffix(self) -> Option<&'static str> {
        match self {
            Tech::Framer => Some("-framer"),
            Tech::Css => Some("-css"),
            Tech::Js => None,
        }
    }

    /// Suffix appended to a base group title for this technology
    pub fn title_suffix(self) -> Option<&'static str> {
        match self {
            Tech::Framer => Some("(Framer)"),
            Tech::Css => Some("(CSS)"),
            Tech::Js => None,
        }
    }
}

impl std::fmt::Display for Tech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single animation entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    /// Globally unique id, `<group id>__<slug>`
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub group_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// When set, the card hosting this animation hides its replay control
    #[serde(default)]
    pub disable_replay: bool,
}

impl Animation {
    /// The part of the id after `__`
    pub fn slug(&self) -> &str {
        self.id
            .split_once("__")
            .map(|(_, slug)| slug)
            .unwrap_or(&self.id)
    }
}

/// A group of animations rendered with one technology
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tech: Option<Tech>,
    #[serde(default)]
    pub demo: Option<String>,
    pub animations: Vec<Animation>,
}

impl Group {
    /// Create an empty group
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tech: None,
            demo: None,
            animations: Vec::new(),
        }
    }

    /// Set the technology tag
    pub fn with_tech(mut self, tech: Tech) -> Self {
        self.tech = Some(tech);
        self
    }

    /// Id with any technology suffix removed
    pub fn base_id(&self) -> &str {
        crate::variants::strip_tech_suffix(&self.id)
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

/// A top-level category of groups
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub groups: Vec<Group>,
}

impl Category {
    /// Create an empty category
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            groups: Vec::new(),
        }
    }

    /// Append a group
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// First group in browse order
    pub fn first_group(&self) -> Option<&Group> {
        self.groups.first()
    }

    /// Whether the group belongs to this category (sidebar highlight)
    pub fn contains_group(&self, group_id: &str) -> bool {
        self.groups.iter().any(|g| g.id == group_id)
    }
}

/// The full, ordered catalog
///
/// Categories are held behind an `Arc` so consumers such as the navigation
/// machine can share them without copying every animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Arc<[Category]>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: categories.into(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Shared handle to the category list
    pub fn shared_categories(&self) -> Arc<[Category]> {
        Arc::clone(&self.categories)
    }

    /// Groups of every category, flattened in browse order
    pub fn all_groups(&self) -> Vec<Group> {
        self.groups().cloned().collect()
    }

    /// Iterate groups in browse order
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.categories.iter().flat_map(|c| c.groups.iter())
    }

    /// Iterate animations in browse order
    pub fn animations(&self) -> impl Iterator<Item = &Animation> {
        self.groups().flat_map(|g| g.animations.iter())
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups().find(|g| g.id == id)
    }

    pub fn animation(&self, id: &str) -> Option<&Animation> {
        self.animations().find(|a| a.id == id)
    }

    /// Category holding the given group
    pub fn category_of_group(&self, group_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.contains_group(group_id))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    pub fn animation_count(&self) -> usize {
        self.animations().count()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
