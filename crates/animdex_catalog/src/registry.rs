//! Static registry definitions
//!
//! The registry is what animation authors write: one [`CategoryDef`] per
//! showcase section, one [`GroupDef`] per logical group, with the Framer and
//! CSS renditions listed side by side. The builder turns it into a
//! [`Catalog`](crate::Catalog).
//!
//! ```rust
//! use animdex_catalog::{AnimationMeta, CategoryDef, GroupDef, Registry};
//!
//! let registry = Registry::new().category(
//!     CategoryDef::new("dialogs", "Dialogs").group(
//!         GroupDef::new("modal-base", "Base modal animations")
//!             .framer(AnimationMeta::new(
//!                 "modal-base__scale-gentle-pop",
//!                 "Gentle Pop",
//!                 "Modal scales in with soft easing",
//!             ))
//!             .css(AnimationMeta::new(
//!                 "modal-base__scale-gentle-pop",
//!                 "Gentle Pop",
//!                 "Modal scales in with soft easing",
//!             )),
//!     ),
//! );
//! assert_eq!(registry.categories().len(), 1);
//! ```

use crate::model::Tech;

/// Metadata exported next to each animation component
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationMeta {
    /// Authored id, `<base group id>__<slug>`
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub disable_replay: bool,
}

impl AnimationMeta {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            tags: Vec::new(),
            disable_replay: false,
        }
    }

    /// Replace the tag list
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Hide the replay control for this animation
    pub fn disable_replay(mut self, disable: bool) -> Self {
        self.disable_replay = disable;
        self
    }
}

/// Metadata exported by a group index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMeta {
    pub id: String,
    pub title: String,
    /// Demo description or usage notes
    pub demo: Option<String>,
}

/// A logical group with both technology renditions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupDef {
    pub metadata: GroupMeta,
    pub framer: Vec<AnimationMeta>,
    pub css: Vec<AnimationMeta>,
}

impl GroupDef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            metadata: GroupMeta {
                id: id.into(),
                title: title.into(),
                demo: None,
            },
            framer: Vec::new(),
            css: Vec::new(),
        }
    }

    pub fn demo(mut self, demo: impl Into<String>) -> Self {
        self.metadata.demo = Some(demo.into());
        self
    }

    /// Add a Framer rendition
    pub fn framer(mut self, anim: AnimationMeta) -> Self {
        self.framer.push(anim);
        self
    }

    /// Add a CSS rendition
    pub fn css(mut self, anim: AnimationMeta) -> Self {
        self.css.push(anim);
        self
    }

    /// Animations authored for the given technology
    pub fn animations_for(&self, tech: Tech) -> &[AnimationMeta] {
        match tech {
            Tech::Framer => &self.framer,
            Tech::Css => &self.css,
            Tech::Js => &[],
        }
    }
}

/// A showcase category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: String,
    pub title: String,
    pub groups: Vec<GroupDef>,
}

impl CategoryDef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            groups: Vec::new(),
        }
    }

    pub fn group(mut self, group: GroupDef) -> Self {
        self.groups.push(group);
        self
    }
}

/// Ordered set of category definitions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    categories: Vec<CategoryDef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shipped with the showcase
    pub fn builtin() -> Self {
        crate::builtin::registry()
    }

    /// Append a category
    pub fn category(mut self, category: CategoryDef) -> Self {
        self.categories.push(category);
        self
    }

    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// Total authored animations across both technologies
    pub fn animation_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.groups.iter())
            .map(|g| g.framer.len() + g.css.len())
            .sum()
    }
}
