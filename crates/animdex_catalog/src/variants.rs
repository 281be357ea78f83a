//! Group variant resolution
//!
//! The same logical group is shipped twice, `modal-base-framer` and
//! `modal-base-css`. They stay separate [`Group`]s; this module pairs them by
//! base id so the sidebar can show one entry per logical group and pick the
//! rendition matching the active [`CodeMode`].

use crate::error::CatalogBuildError;
use crate::model::{Group, Tech};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which rendition the viewer prefers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeMode {
    #[default]
    Framer,
    #[serde(rename = "CSS")]
    Css,
}

impl CodeMode {
    /// Technology backing this mode
    pub fn tech(self) -> Tech {
        match self {
            CodeMode::Framer => Tech::Framer,
            CodeMode::Css => Tech::Css,
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            CodeMode::Framer => CodeMode::Css,
            CodeMode::Css => CodeMode::Framer,
        }
    }
}

/// One sidebar entry: a logical group and its technology renditions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupVariants<'a> {
    /// Id with technology suffix stripped
    pub base_id: &'a str,
    /// Display label with technology title suffix stripped
    pub label: &'a str,
    pub framer_variant: Option<&'a Group>,
    pub css_variant: Option<&'a Group>,
    /// First group seen for this base id
    pub fallback: &'a Group,
}

impl<'a> GroupVariants<'a> {
    fn slot_mut(&mut self, tech: Tech) -> Option<&mut Option<&'a Group>> {
        match tech {
            Tech::Framer => Some(&mut self.framer_variant),
            Tech::Css => Some(&mut self.css_variant),
            Tech::Js => None,
        }
    }

    /// Whether any rendition of this entry has the given id
    pub fn contains(&self, group_id: &str) -> bool {
        self.fallback.id == group_id
            || self.framer_variant.is_some_and(|g| g.id == group_id)
            || self.css_variant.is_some_and(|g| g.id == group_id)
    }
}

/// Strip a trailing `-framer` / `-css` from a group id
pub fn strip_tech_suffix(id: &str) -> &str {
    id.strip_suffix("-framer")
        .or_else(|| id.strip_suffix("-css"))
        .unwrap_or(id)
}

/// Strip a trailing `(Framer)` / `(CSS)` from a group title, any case
pub fn strip_tech_title_suffix(title: &str) -> &str {
    for suffix in ["(Framer)", "(CSS)"] {
        if title.len() >= suffix.len() && title.is_char_boundary(title.len() - suffix.len()) {
            let (head, tail) = title.split_at(title.len() - suffix.len());
            if tail.eq_ignore_ascii_case(suffix) {
                return head.trim_end();
            }
        }
    }
    title
}

/// Technology slot a group fills
///
/// The explicit `tech` field wins when it names a variant technology;
/// otherwise the id suffix decides.
pub fn infer_tech(group: &Group) -> Option<Tech> {
    match group.tech {
        Some(tech @ (Tech::Framer | Tech::Css)) => Some(tech),
        _ if group.id.ends_with("-framer") => Some(Tech::Framer),
        _ if group.id.ends_with("-css") => Some(Tech::Css),
        _ => None,
    }
}

/// Pair groups by base id, in first-seen order
///
/// A group whose slot is already taken is ignored here; catalogs that contain
/// such conflicts are rejected earlier by [`check_group_variants`].
pub fn build_group_variants(groups: &[Group]) -> Vec<GroupVariants<'_>> {
    let mut entries: IndexMap<&str, GroupVariants<'_>> = IndexMap::new();

    for group in groups {
        let base_id = strip_tech_suffix(&group.id);
        let entry = entries.entry(base_id).or_insert_with(|| GroupVariants {
            base_id,
            label: strip_tech_title_suffix(&group.title),
            framer_variant: None,
            css_variant: None,
            fallback: group,
        });

        let Some(tech) = infer_tech(group) else {
            continue;
        };
        let Some(slot) = entry.slot_mut(tech) else {
            continue;
        };
        match *slot {
            Some(existing) => tracing::warn!(
                base_id,
                kept = %existing.id,
                ignored = %group.id,
                "conflicting group variant"
            ),
            None => *slot = Some(group),
        }
    }

    entries.into_values().collect()
}

/// Preferred group id for a mode
///
/// Always returns the id of a group that was in the input.
pub fn pick_group_id_for_mode<'a>(variants: &GroupVariants<'a>, mode: CodeMode) -> &'a str {
    let (preferred, other) = match mode {
        CodeMode::Css => (variants.css_variant, variants.framer_variant),
        CodeMode::Framer => (variants.framer_variant, variants.css_variant),
    };
    preferred.or(other).unwrap_or(variants.fallback).id.as_str()
}

/// Reject ambiguous variant sets
///
/// At most two groups may share a base id and no two may claim the same
/// technology.
pub fn check_group_variants(groups: &[Group]) -> Result<(), CatalogBuildError> {
    let mut seen: IndexMap<&str, (usize, Option<&str>, Option<&str>)> = IndexMap::new();

    for group in groups {
        let base_id = strip_tech_suffix(&group.id);
        let (count, framer, css) = seen.entry(base_id).or_default();
        *count += 1;
        if *count > 2 {
            return Err(CatalogBuildError::TooManyVariants {
                base_id: base_id.to_string(),
                count: *count,
            });
        }

        let slot = match infer_tech(group) {
            Some(Tech::Framer) => framer,
            Some(Tech::Css) => css,
            _ => continue,
        };
        if slot.is_some() {
            return Err(CatalogBuildError::ConflictingVariant {
                base_id: base_id.to_string(),
                group_id: group.id.clone(),
                tech: infer_tech(group).map(Tech::as_str).unwrap_or_default(),
            });
        }
        *slot = Some(group.id.as_str());
    }

    Ok(())
}

/// Id of the current group's rendition in another mode
///
/// `None` when the counterpart does not exist or is the current group.
pub fn counterpart_for_mode<'a>(
    current_id: &str,
    groups: &'a [Group],
    mode: CodeMode,
) -> Option<&'a str> {
    let suffix = mode.tech().id_suffix()?;
    let target = format!("{}{}", strip_tech_suffix(current_id), suffix);
    groups
        .iter()
        .find(|g| g.id == target)
        .map(|g| g.id.as_str())
        .filter(|id| *id != current_id)
}

/// Resolve a route parameter to a group id
///
/// Exact ids win. A bare base id (no technology suffix) resolves to its
/// Framer rendition, then its CSS rendition.
pub fn resolve_group_alias<'a>(param: &str, groups: &'a [Group]) -> Option<&'a str> {
    let find = |id: &str| groups.iter().find(|g| g.id == id).map(|g| g.id.as_str());

    if let Some(id) = find(param) {
        return Some(id);
    }
    if strip_tech_suffix(param) != param {
        return None;
    }
    find(&format!("{param}-framer")).or_else(|| find(&format!("{param}-css")))
}
