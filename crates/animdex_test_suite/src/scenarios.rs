//! End-to-end scenarios over the built-in catalog

use crate::harness::NavHarness;
use crate::runner::Scenario;
use animdex_catalog::{build_catalog, AnimationMeta, CategoryDef, CodeMode, GroupDef, Registry};
use animdex_nav::NavEvent;
use animdex_platform::Key;
use anyhow::{ensure, Context, Result};
use std::sync::Arc;

/// Every scenario, in run order
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("unknown_group_falls_back", "initialize", unknown_group_falls_back),
        Scenario::new("base_id_redirects", "initialize", base_id_redirects),
        Scenario::new("reinitialize_reseeds", "initialize", reinitialize_reseeds),
        Scenario::new("refresh_keeps_position", "initialize", refresh_keeps_position),
        Scenario::new("sidebar_navigation", "navigation", sidebar_navigation),
        Scenario::new("swipe_through_catalog", "navigation", swipe_through_catalog),
        Scenario::new("code_mode_switch", "navigation", code_mode_switch),
        Scenario::new("drawer_and_escape", "drawer", drawer_and_escape),
        Scenario::new("scroll_after_late_render", "scroll", scroll_after_late_render),
    ]
}

fn unknown_group_falls_back() -> Result<()> {
    let mut h = NavHarness::new("/does-not-exist");
    ensure!(h.nav.is_initializing(), "controller should start initializing");

    h.sync()?;
    ensure!(h.nav.is_ready(), "expected ready, got {}", h.nav.state_value());
    ensure!(h.nav.current_group_id() == "button-effects-framer");
    ensure!(h.location() == "/button-effects-framer");
    ensure!(
        h.navigations().iter().all(|n| n.replace),
        "fallback must replace the bad URL, not push"
    );
    Ok(())
}

fn base_id_redirects() -> Result<()> {
    let mut h = NavHarness::new("/modal-base");
    h.sync()?;
    ensure!(h.nav.current_group_id() == "modal-base-framer");
    ensure!(h.location() == "/modal-base-framer");

    h.visit("/collection-effects")?;
    ensure!(h.nav.current_group_id() == "collection-effects-css");
    Ok(())
}

fn reinitialize_reseeds() -> Result<()> {
    let lights = || {
        GroupDef::new("lights", "Lights")
            .framer(AnimationMeta::new("lights__chase", "Chase", "Bulbs chase"))
            .css(AnimationMeta::new("lights__chase", "Chase", "Bulbs chase"))
    };
    let coins = || {
        GroupDef::new("coins", "Coins").css(AnimationMeta::new("coins__rain", "Rain", "Coins fall"))
    };

    let first = Registry::new()
        .category(CategoryDef::new("base", "Base").group(coins()))
        .category(CategoryDef::new("rewards", "Rewards").group(lights()));
    let second = Registry::new().category(
        CategoryDef::new("rewards", "Rewards")
            .group(lights())
            .group(coins()),
    );

    let mut h = NavHarness::with_registry(first, "/lights-css", Default::default());
    h.sync()?;
    h.send(NavEvent::OpenDrawer);

    let reseeded = Arc::new(build_catalog(&second, &[])?);
    ensure!(h.nav.sync(&reseeded), "new catalog instance must re-initialize");
    ensure!(h.nav.current_group_id() == "lights-css", "current group should survive");
    ensure!(h.nav.is_drawer_open(), "re-initialize must not touch the drawer");
    ensure!(h.nav.context().categories.len() == 1);
    ensure!(h.nav.active_category_id() == Some("rewards"));
    Ok(())
}

fn refresh_keeps_position() -> Result<()> {
    let mut h = NavHarness::new("/lights-css");
    h.sync()?;
    let before = h.catalog()?;

    ensure!(h.refresh()?, "refreshed catalog must re-initialize");
    let after = h.catalog()?;
    ensure!(!Arc::ptr_eq(&before, &after));
    ensure!(before.group_count() == after.group_count());
    ensure!(h.nav.current_group_id() == "lights-css");
    ensure!(h.navigations().is_empty(), "nothing to canonicalize");
    Ok(())
}

fn sidebar_navigation() -> Result<()> {
    let mut h = NavHarness::new("/");
    h.sync()?;

    h.send(NavEvent::navigate_to_category("progress"));
    ensure!(h.location() == "/loading-states-framer");
    ensure!(h.nav.active_category_id() == Some("progress"));

    h.send(NavEvent::navigate_to_group("timer-effects-css"));
    ensure!(h.location() == "/timer-effects-css");

    let pushes = h.navigations().iter().filter(|n| !n.replace).count();
    h.send(NavEvent::navigate_to_group("not-a-group"));
    h.send(NavEvent::navigate_to_category("not-a-category"));
    ensure!(h.location() == "/timer-effects-css");
    ensure!(h.navigations().iter().filter(|n| !n.replace).count() == pushes);
    Ok(())
}

fn swipe_through_catalog() -> Result<()> {
    let mut h = NavHarness::new("/");
    h.sync()?;
    let groups = h.catalog()?.group_count();

    for _ in 0..groups + 3 {
        h.send(NavEvent::SwipeNext);
    }
    let last = h
        .catalog()?
        .groups()
        .last()
        .map(|g| g.id.clone())
        .context("catalog has no groups")?;
    ensure!(h.nav.current_group_id() == last, "swipe must clamp at the end");

    for _ in 0..groups + 3 {
        h.send(NavEvent::SwipePrev);
    }
    ensure!(h.nav.current_group_id() == "button-effects-framer", "swipe must clamp at the start");
    Ok(())
}

fn code_mode_switch() -> Result<()> {
    let mut h = NavHarness::new("/lights-framer");
    h.sync()?;

    ensure!(h.nav.select_mode(CodeMode::Css));
    ensure!(h.location() == "/lights-css");

    h.send(NavEvent::navigate_to_group("prize-reveal-framer"));
    ensure!(!h.nav.select_mode(CodeMode::Css), "framer-only group has no counterpart");
    ensure!(h.nav.current_group_id() == "prize-reveal-framer");
    Ok(())
}

fn drawer_and_escape() -> Result<()> {
    let mut h = NavHarness::new("/lights-css");
    h.sync()?;

    ensure!(!h.press(Key::Escape), "escape is ignored while the drawer is closed");
    h.send(NavEvent::OpenDrawer);
    ensure!(h.nav.state_value() == "ready.drawer.open");
    ensure!(h.host.document.is_body_scroll_locked());

    ensure!(h.press(Key::Escape));
    ensure!(h.nav.state_value() == "ready.drawer.closed");
    ensure!(!h.host.document.is_body_scroll_locked());

    h.send(NavEvent::OpenDrawer);
    h.send(NavEvent::navigate_to_category("dialogs"));
    ensure!(!h.nav.is_drawer_open(), "navigation closes the drawer");
    ensure!(!h.host.document.is_body_scroll_locked());
    Ok(())
}

fn scroll_after_late_render() -> Result<()> {
    let mut h = NavHarness::new("/lights-css");
    h.sync()?;

    // Sections render after the first frame
    h.run_frame();
    ensure!(h.nav.is_scroll_pending(), "missing section should schedule a retry");
    h.place_sections()?;
    h.advance(360);

    let expected = h.expected_scroll("lights-css")?;
    ensure!(h.scroll_y() == expected, "scrolled to {}, expected {expected}", h.scroll_y());

    h.send(NavEvent::SwipeNext);
    h.run_frame();
    let expected = h.expected_scroll("modal-celebrations-framer")?;
    ensure!(h.scroll_y() == expected, "scrolled to {}, expected {expected}", h.scroll_y());
    ensure!(!h.nav.is_scroll_pending());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_names_unique() {
        let scenarios = all_scenarios();
        let mut names: Vec<_> = scenarios.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenarios.len());
    }
}
