//! Catalog builder
//!
//! Expands every [`GroupDef`] into one group per non-empty technology list:
//! `modal-base` becomes `modal-base-framer` titled "… (Framer)" and
//! `modal-base-css` titled "… (CSS)". Authored animation ids
//! (`modal-base__pop`) are rewritten onto their variant group
//! (`modal-base-css__pop`) so the two renditions never collide.
//!
//! Validation is all-or-nothing: the first malformed entry aborts the build.

use crate::error::CatalogBuildError;
use crate::model::{Animation, Catalog, Category, Group, Tech};
use crate::registry::{AnimationMeta, CategoryDef, GroupDef, Registry};
use crate::variants::check_group_variants;
use rustc_hash::FxHashSet;

/// Technologies that produce group variants, in sidebar order
const VARIANT_TECHS: [Tech; 2] = [Tech::Framer, Tech::Css];

/// Build a catalog from a registry
///
/// `extras` are animations added at runtime; each is appended to the group
/// it names. Extras whose category or group no longer exists are dropped.
pub fn build_catalog(
    registry: &Registry,
    extras: &[Animation],
) -> Result<Catalog, CatalogBuildError> {
    let mut ids = SeenIds::default();
    let mut categories = Vec::with_capacity(registry.categories().len());

    for def in registry.categories() {
        require(&def.id, "id", &def.id)?;
        require(&def.id, "title", &def.title)?;
        if !ids.categories.insert(def.id.clone()) {
            return Err(CatalogBuildError::DuplicateCategory(def.id.clone()));
        }

        let category = build_category(def, &mut ids)?;
        check_group_variants(&category.groups)?;

        if category.groups.is_empty() {
            tracing::debug!(category = %def.id, "skipping category without animations");
            continue;
        }
        categories.push(category);
    }

    for extra in extras {
        if !ids.animations.insert(extra.id.clone()) {
            return Err(CatalogBuildError::DuplicateAnimation(extra.id.clone()));
        }
        let target = categories
            .iter_mut()
            .find(|c| c.id == extra.category_id)
            .and_then(|c| c.groups.iter_mut().find(|g| g.id == extra.group_id));
        match target {
            Some(group) => group.animations.push(extra.clone()),
            None => tracing::warn!(
                animation = %extra.id,
                group = %extra.group_id,
                "dropping extra animation, target group is gone"
            ),
        }
    }

    let catalog = Catalog::new(categories);
    tracing::debug!(
        categories = catalog.category_count(),
        groups = catalog.group_count(),
        animations = catalog.animation_count(),
        "catalog built"
    );
    Ok(catalog)
}

#[derive(Default)]
struct SeenIds {
    categories: FxHashSet<String>,
    base_groups: FxHashSet<String>,
    groups: FxHashSet<String>,
    animations: FxHashSet<String>,
}

fn build_category(def: &CategoryDef, ids: &mut SeenIds) -> Result<Category, CatalogBuildError> {
    let mut category = Category::new(&def.id, &def.title);

    for group_def in &def.groups {
        let meta = &group_def.metadata;
        require(&meta.id, "id", &meta.id)?;
        require(&meta.id, "title", &meta.title)?;
        if !ids.base_groups.insert(meta.id.clone()) {
            return Err(CatalogBuildError::DuplicateGroup(meta.id.clone()));
        }

        for tech in VARIANT_TECHS {
            let authored = group_def.animations_for(tech);
            if authored.is_empty() {
                continue;
            }
            let (Some(id_suffix), Some(title_suffix)) = (tech.id_suffix(), tech.title_suffix())
            else {
                continue;
            };
            let group = build_variant(
                &def.id,
                group_def,
                tech,
                (id_suffix, title_suffix),
                authored,
                ids,
            )?;
            category.groups.push(group);
        }
    }

    Ok(category)
}

fn build_variant(
    category_id: &str,
    def: &GroupDef,
    tech: Tech,
    (id_suffix, title_suffix): (&str, &str),
    authored: &[AnimationMeta],
    ids: &mut SeenIds,
) -> Result<Group, CatalogBuildError> {
    let meta = &def.metadata;

    let group_id = format!("{}{}", meta.id, id_suffix);
    if !ids.groups.insert(group_id.clone()) {
        return Err(CatalogBuildError::DuplicateGroup(group_id));
    }

    let mut animations = Vec::with_capacity(authored.len());
    for anim in authored {
        require(&anim.id, "id", &anim.id)?;
        require(&anim.id, "title", &anim.title)?;
        require(&anim.id, "description", &anim.description)?;

        let slug = match anim.id.split_once("__") {
            Some((prefix, slug)) if prefix == meta.id && !slug.is_empty() => slug,
            _ => {
                return Err(CatalogBuildError::MalformedAnimationId {
                    id: anim.id.clone(),
                    group: meta.id.clone(),
                })
            }
        };

        let id = format!("{group_id}__{slug}");
        if !ids.animations.insert(id.clone()) {
            return Err(CatalogBuildError::DuplicateAnimation(id));
        }

        animations.push(Animation {
            id,
            title: anim.title.clone(),
            description: anim.description.clone(),
            category_id: category_id.to_string(),
            group_id: group_id.clone(),
            tags: anim.tags.clone(),
            disable_replay: anim.disable_replay,
        });
    }

    Ok(Group {
        id: group_id,
        title: format!("{} {}", meta.title, title_suffix),
        tech: Some(tech),
        demo: meta.demo.clone(),
        animations,
    })
}

fn require(id: &str, field: &'static str, value: &str) -> Result<(), CatalogBuildError> {
    if value.trim().is_empty() {
        return Err(CatalogBuildError::MissingField {
            id: if id.is_empty() { "<unnamed>".into() } else { id.to_string() },
            field,
        });
    }
    Ok(())
}
