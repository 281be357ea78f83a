//! Built-in showcase registry
//!
//! Metadata only; the animations themselves live with the host UI and are
//! looked up by id.

use crate::registry::{AnimationMeta, CategoryDef, GroupDef, Registry};

/// The registry shipped with the showcase
pub fn registry() -> Registry {
    Registry::new()
        .category(base())
        .category(dialogs())
        .category(progress())
        .category(realtime())
        .category(rewards())
}

fn anim(id: &str, title: &str, description: &str) -> AnimationMeta {
    AnimationMeta::new(id, title, description)
}

fn base() -> CategoryDef {
    let ripple = anim(
        "button-effects__ripple",
        "Ripple Button",
        "Material-style ripple spreading from the press point",
    )
    .tags(&["button", "press"])
    .disable_replay(true);
    let shine = anim(
        "button-effects__shine-sweep",
        "Shine Sweep",
        "Diagonal highlight sweeps across the button face",
    )
    .tags(&["button", "hover"]);

    let morph = anim(
        "standard-effects__morph-pulse",
        "Morph Pulse",
        "Shape morphs between rounded states while pulsing",
    )
    .tags(&["morph", "pulse"]);
    let shake = anim(
        "standard-effects__shake-attention",
        "Attention Shake",
        "Short horizontal shake to draw the eye",
    )
    .tags(&["attention"]);

    let counter = anim(
        "text-effects__counter-increment",
        "Counter Increment",
        "Digits roll upward as the value increases",
    )
    .tags(&["text", "number"]);
    let combo = anim(
        "text-effects__combo-counter",
        "Combo Counter",
        "Combo multiplier punches in with a scale bounce",
    )
    .tags(&["text", "game"]);

    CategoryDef::new("base", "Base")
        .group(
            GroupDef::new("button-effects", "Button effects")
                .framer(ripple.clone())
                .framer(shine.clone())
                .css(ripple)
                .css(shine),
        )
        .group(
            GroupDef::new("standard-effects", "Standard effects")
                .framer(morph.clone())
                .framer(shake.clone())
                .css(morph)
                .css(shake),
        )
        .group(
            GroupDef::new("text-effects", "Text effects")
                .framer(counter)
                .css(combo),
        )
}

fn dialogs() -> CategoryDef {
    let gentle_pop = anim(
        "modal-base__scale-gentle-pop",
        "Gentle Pop",
        "Modal scales in with soft easing",
    )
    .tags(&["modal", "scale"]);
    let slide_up = anim(
        "modal-base__slide-up-soft",
        "Soft Slide Up",
        "Modal rises from below and settles",
    )
    .tags(&["modal", "slide"]);

    let field_reveal = anim(
        "modal-content__form-field-left-reveal",
        "Form Field Reveal",
        "Form fields slide in from the left one after another",
    )
    .tags(&["form", "stagger"]);
    let soft_stagger = anim(
        "modal-content__list-soft-stagger",
        "List Soft Stagger",
        "List rows fade up with a gentle stagger",
    )
    .tags(&["list", "stagger"]);

    let toast_drop = anim(
        "modal-dismiss__toast-drop",
        "Toast Drop",
        "Toast drops in and leaves after a countdown",
    )
    .tags(&["toast", "auto-dismiss"]);
    let snackbar_wipe = anim(
        "modal-dismiss__snackbar-wipe",
        "Snackbar Wipe",
        "Snackbar wipes away as its timer runs out",
    )
    .tags(&["snackbar", "auto-dismiss"]);

    let flip_reveal = anim(
        "modal-orchestration__flip-reveal",
        "Flip Reveal",
        "Tiles flip over in sequence to reveal their faces",
    )
    .tags(&["tiles", "flip"]);
    let spring_physics = anim(
        "modal-orchestration__spring-physics",
        "Spring Physics",
        "Tiles spring into the grid with overshoot",
    )
    .tags(&["tiles", "spring"]);

    CategoryDef::new("dialogs", "Dialogs & Modals")
        .group(
            GroupDef::new("modal-base", "Base modal animations")
                .framer(gentle_pop.clone())
                .framer(slide_up.clone())
                .css(gentle_pop)
                .css(slide_up),
        )
        .group(
            GroupDef::new("modal-content", "Content choreography")
                .framer(field_reveal.clone())
                .css(field_reveal)
                .css(soft_stagger),
        )
        .group(
            GroupDef::new("modal-dismiss", "Auto-dismiss patterns")
                .demo("Each pattern dismisses itself after a short countdown")
                .framer(toast_drop.clone())
                .framer(snackbar_wipe.clone())
                .css(toast_drop)
                .css(snackbar_wipe),
        )
        .group(
            GroupDef::new("modal-orchestration", "Tile animations")
                .framer(flip_reveal.clone())
                .framer(spring_physics)
                .css(flip_reveal),
        )
}

fn progress() -> CategoryDef {
    let ring_multi = anim(
        "loading-states__ring-multi",
        "Multi Ring",
        "Concentric rings spin at different speeds",
    )
    .tags(&["spinner", "ring"]);
    let ring_progress = anim(
        "loading-states__ring-progress",
        "Ring Progress",
        "Ring fills clockwise as work completes",
    )
    .tags(&["ring", "progress"]);
    let skeleton = anim(
        "loading-states__skeleton-tile",
        "Skeleton Tile",
        "Placeholder tile with a travelling shimmer",
    )
    .tags(&["skeleton", "shimmer"]);

    let gradient = anim(
        "progress-bars__progress-gradient",
        "Gradient Progress",
        "Bar fills with a shifting gradient",
    )
    .tags(&["bar", "gradient"]);
    let thin = anim(
        "progress-bars__progress-thin",
        "Thin Progress",
        "Hairline bar for page-level loading",
    )
    .tags(&["bar"]);
    let spark = anim(
        "progress-bars__progress-spark",
        "Spark Progress",
        "Spark rides the leading edge of the fill",
    )
    .tags(&["bar", "particles"]);
    let bounce = anim(
        "progress-bars__progress-bounce",
        "Bounce Progress",
        "Fill overshoots each step and settles back",
    )
    .tags(&["bar", "spring"]);

    CategoryDef::new("progress", "Progress & Loading")
        .group(
            GroupDef::new("loading-states", "Loading states")
                .framer(ring_multi.clone())
                .framer(ring_progress.clone())
                .css(ring_multi)
                .css(ring_progress)
                .css(skeleton),
        )
        .group(
            GroupDef::new("progress-bars", "Progress bars")
                .framer(gradient.clone())
                .framer(thin.clone())
                .framer(spark.clone())
                .framer(bounce)
                .css(gradient)
                .css(thin)
                .css(spark),
        )
}

fn realtime() -> CategoryDef {
    let live_score = anim(
        "realtime-data__live-score-update",
        "Live Score Update",
        "Score flips to the new value with a flash",
    )
    .tags(&["score", "live"]);
    let ticker = anim(
        "realtime-data__odds-ticker",
        "Odds Ticker",
        "Values tick up or down with a directional tint",
    )
    .tags(&["ticker", "live"]);

    let heartbeat = anim(
        "timer-effects__pill-countdown-heartbeat",
        "Heartbeat Countdown",
        "Countdown pill pulses harder as time runs out",
    )
    .tags(&["timer", "countdown"]);
    let glitch = anim(
        "timer-effects__pill-countdown-glitch",
        "Glitch Countdown",
        "Countdown pill glitches on the final seconds",
    )
    .tags(&["timer", "countdown"]);

    let radar = anim(
        "update-indicators__home-icon-dot-radar",
        "Radar Dot",
        "Notification dot emits radar rings",
    )
    .tags(&["badge", "notification"]);
    let badge_pop = anim(
        "update-indicators__badge-pop",
        "Badge Pop",
        "Badge count pops when it changes",
    )
    .tags(&["badge"]);

    CategoryDef::new("realtime", "Realtime Updates")
        .group(
            GroupDef::new("realtime-data", "Realtime data")
                .framer(live_score.clone())
                .css(live_score)
                .css(ticker),
        )
        .group(
            GroupDef::new("timer-effects", "Timer effects")
                .framer(heartbeat)
                .css(glitch),
        )
        .group(
            GroupDef::new("update-indicators", "Update indicators")
                .framer(radar.clone())
                .css(radar)
                .css(badge_pop),
        )
}

fn rewards() -> CategoryDef {
    let carnival = anim(
        "lights__circle-static-1",
        "Alternating Carnival",
        "Alternate bulbs blink like a carnival sign",
    )
    .tags(&["lights", "loop"]);
    let chase = anim(
        "lights__circle-static-2",
        "Sequential Chase",
        "A single lit bulb chases around the ring",
    )
    .tags(&["lights", "loop"]);
    let reverse_chase = anim(
        "lights__circle-static-4",
        "Reverse Chase Pulse",
        "Chase runs backwards with a pulse on each lap",
    )
    .tags(&["lights", "loop"]);

    let confetti = anim(
        "modal-celebrations__confetti-pulse",
        "Confetti Pulse",
        "Confetti bursts behind a pulsing reward card",
    )
    .tags(&["celebration", "confetti"]);
    let coin_shower = anim(
        "modal-celebrations__coin-shower",
        "Coin Shower",
        "Coins rain down and bounce off the card",
    )
    .tags(&["celebration", "coins"]);

    let chest = anim(
        "prize-reveal__chest-open",
        "Chest Open",
        "Treasure chest shakes, then bursts open",
    )
    .tags(&["prize"]);

    let card_flip = anim(
        "reveal-effects__card-flip",
        "Card Flip",
        "Reward card flips to reveal its value",
    )
    .tags(&["reveal", "flip"]);

    let badge_unlock = anim(
        "collection-effects__badge-unlock",
        "Badge Unlock",
        "Collected badge fills from greyscale to color",
    )
    .tags(&["collection"]);

    let star_burst = anim(
        "icon-animations__star-burst",
        "Star Burst",
        "Star icon bursts into small sparkles",
    )
    .tags(&["icon"]);

    CategoryDef::new("rewards", "Rewards")
        .group(
            GroupDef::new("lights", "Lights")
                .framer(carnival.clone())
                .framer(chase.clone())
                .css(carnival)
                .css(chase)
                .css(reverse_chase),
        )
        .group(
            GroupDef::new("modal-celebrations", "Celebration effects")
                .framer(confetti.clone())
                .framer(coin_shower)
                .css(confetti),
        )
        .group(
            GroupDef::new("prize-reveal", "Prize reveal")
                .framer(chest),
        )
        .group(
            GroupDef::new("reveal-effects", "Reveal effects")
                .framer(card_flip.clone())
                .css(card_flip),
        )
        .group(
            GroupDef::new("collection-effects", "Collection effects")
                .css(badge_unlock),
        )
        .group(
            GroupDef::new("icon-animations", "Icon animations")
                .framer(star_burst.clone())
                .css(star_burst),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tech;
    use crate::{build_catalog, infer_tech};

    #[test]
    fn test_builtin_builds() {
        let catalog = build_catalog(&registry(), &[]).unwrap();
        let ids: Vec<_> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["base", "dialogs", "progress", "realtime", "rewards"]);
        assert_eq!(catalog.animation_count(), registry().animation_count());
    }

    #[test]
    fn test_builtin_is_well_formed() {
        let catalog = build_catalog(&registry(), &[]).unwrap();
        for category in catalog.categories() {
            assert!(!category.groups.is_empty(), "{} has no groups", category.id);
            for group in &category.groups {
                assert!(!group.animations.is_empty(), "{} has no animations", group.id);
                for anim in &group.animations {
                    assert_eq!(anim.group_id, group.id);
                    assert_eq!(anim.category_id, category.id);
                    assert!(anim.id.starts_with(&format!("{}__", group.id)));
                }
            }
        }
    }

    #[test]
    fn test_single_tech_groups() {
        let catalog = build_catalog(&registry(), &[]).unwrap();
        assert!(catalog.group("prize-reveal-framer").is_some());
        assert!(catalog.group("prize-reveal-css").is_none());
        assert!(catalog.group("collection-effects-css").is_some());
        assert!(catalog.group("collection-effects-framer").is_none());
    }

    #[test]
    fn test_group_tech_follows_id_suffix() {
        let catalog = build_catalog(&registry(), &[]).unwrap();
        for group in catalog.groups() {
            let expected = if group.id.ends_with("-framer") {
                Tech::Framer
            } else {
                Tech::Css
            };
            assert_eq!(group.tech, Some(expected), "{}", group.id);
            assert_eq!(infer_tech(group), Some(expected));
        }
    }
}
