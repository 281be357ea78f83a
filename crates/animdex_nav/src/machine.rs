//! Navigation state machine
//!
//! A pure reducer: [`transition`] maps `(state, context, event)` to the next
//! state and context plus the [`Effect`]s the caller must run. Nothing here
//! touches the router or the document.
//!
//! ```text
//! initializing ──INITIALIZE──▶ ready
//!                              ├─ drawer: closed ◀──▶ open
//!                              └─ navigation: group, category, swipe
//! ```
//!
//! Events that fail their guard leave state and context untouched and emit
//! nothing.

use animdex_catalog::{resolve_group_alias, Catalog, Category, Group};
use animdex_platform::path_for_group;
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

/// Drawer region of the ready state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

/// Machine state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavState {
    /// Waiting for the first usable `INITIALIZE`
    #[default]
    Initializing,
    Ready { drawer: DrawerState },
}

impl NavState {
    /// Dotted state value, e.g. `ready.drawer.open`
    pub fn value(&self) -> &'static str {
        match self {
            NavState::Initializing => "initializing",
            NavState::Ready {
                drawer: DrawerState::Closed,
            } => "ready.drawer.closed",
            NavState::Ready {
                drawer: DrawerState::Open,
            } => "ready.drawer.open",
        }
    }

    /// Whether the state is `path` or nested inside it
    ///
    /// `matches("ready")` holds for both drawer states.
    pub fn matches(&self, path: &str) -> bool {
        let value = self.value();
        value == path
            || value
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.'))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, NavState::Ready { .. })
    }

    pub fn is_drawer_open(&self) -> bool {
        matches!(
            self,
            NavState::Ready {
                drawer: DrawerState::Open
            }
        )
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Which way the last navigation moved, for enter/exit animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
    #[default]
    None,
}

impl Direction {
    /// `1`, `-1` or `0`
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Next => 1,
            Direction::Prev => -1,
            Direction::None => 0,
        }
    }
}

/// Extended state carried alongside [`NavState`]
#[derive(Clone, Debug, PartialEq)]
pub struct NavContext {
    /// Empty until the first successful `INITIALIZE`
    pub current_group_id: String,
    /// Every group in display order
    pub all_groups: Arc<[Group]>,
    pub categories: Arc<[Category]>,
    pub direction: Direction,
}

impl Default for NavContext {
    fn default() -> Self {
        Self {
            current_group_id: String::new(),
            all_groups: Arc::from(Vec::new()),
            categories: Arc::from(Vec::new()),
            direction: Direction::None,
        }
    }
}

impl NavContext {
    pub fn index_of(&self, group_id: &str) -> Option<usize> {
        self.all_groups.iter().position(|g| g.id == group_id)
    }

    pub fn contains_group(&self, group_id: &str) -> bool {
        self.index_of(group_id).is_some()
    }

    pub fn current_group(&self) -> Option<&Group> {
        self.all_groups.iter().find(|g| g.id == self.current_group_id)
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Category holding the current group
    pub fn active_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.contains_group(&self.current_group_id))
    }
}

/// Machine input
#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    /// Seed or re-seed the groups; `group_id` is the raw route parameter
    Initialize {
        group_id: Option<String>,
        all_groups: Arc<[Group]>,
        categories: Arc<[Category]>,
    },
    NavigateToGroup {
        group_id: String,
    },
    NavigateToCategory {
        category_id: String,
    },
    SwipeNext,
    SwipePrev,
    OpenDrawer,
    CloseDrawer,
}

impl NavEvent {
    /// `INITIALIZE` built from a catalog
    pub fn initialize(group_id: Option<&str>, catalog: &Catalog) -> Self {
        NavEvent::Initialize {
            group_id: group_id.map(str::to_owned),
            all_groups: catalog.all_groups().into(),
            categories: catalog.shared_categories(),
        }
    }

    pub fn navigate_to_group(group_id: impl Into<String>) -> Self {
        NavEvent::NavigateToGroup {
            group_id: group_id.into(),
        }
    }

    pub fn navigate_to_category(category_id: impl Into<String>) -> Self {
        NavEvent::NavigateToCategory {
            category_id: category_id.into(),
        }
    }

    /// Event type name, for logs
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::Initialize { .. } => "INITIALIZE",
            NavEvent::NavigateToGroup { .. } => "NAVIGATE_TO_GROUP",
            NavEvent::NavigateToCategory { .. } => "NAVIGATE_TO_CATEGORY",
            NavEvent::SwipeNext => "SWIPE_NEXT",
            NavEvent::SwipePrev => "SWIPE_PREV",
            NavEvent::OpenDrawer => "OPEN_DRAWER",
            NavEvent::CloseDrawer => "CLOSE_DRAWER",
        }
    }
}

/// Side effect requested by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Router navigation to `path`
    Navigate { path: String, replace: bool },
    /// Drawer opened; stop the page behind it from scrolling
    LockBodyScroll,
    /// Drawer closed; restore page scrolling
    UnlockBodyScroll,
}

impl Effect {
    fn push(group_id: &str) -> Self {
        Effect::Navigate {
            path: path_for_group(group_id),
            replace: false,
        }
    }

    fn replace(group_id: &str) -> Self {
        Effect::Navigate {
            path: path_for_group(group_id),
            replace: true,
        }
    }
}

/// Effects of a single transition, in execution order
pub type Effects = SmallVec<[Effect; 2]>;

/// Result of [`transition`]
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: NavState,
    pub context: NavContext,
    pub effects: Effects,
    /// False when the event was ignored
    pub changed: bool,
}

impl Transition {
    fn ignored(state: &NavState, context: &NavContext) -> Self {
        Self {
            state: *state,
            context: context.clone(),
            effects: Effects::new(),
            changed: false,
        }
    }
}

/// Compute the next state
pub fn transition(state: &NavState, context: &NavContext, event: NavEvent) -> Transition {
    let name = event.name();
    let ready = match (*state, event) {
        (
            _,
            NavEvent::Initialize {
                group_id,
                all_groups,
                categories,
            },
        ) => return initialize(state, context, group_id, all_groups, categories),
        (NavState::Initializing, _) => {
            tracing::debug!(event = name, "ignoring event while initializing");
            return Transition::ignored(state, context);
        }
        (NavState::Ready { drawer }, event) => (drawer, event),
    };

    match ready {
        (drawer, NavEvent::NavigateToGroup { group_id }) => {
            navigate_to(state, context, drawer, &group_id)
        }
        (drawer, NavEvent::NavigateToCategory { category_id }) => {
            let first = context
                .category(&category_id)
                .and_then(Category::first_group)
                .map(|g| g.id.clone());
            match first {
                Some(group_id) => navigate_to(state, context, drawer, &group_id),
                None => {
                    tracing::debug!(category = %category_id, "ignoring unknown or empty category");
                    Transition::ignored(state, context)
                }
            }
        }
        (_, NavEvent::SwipeNext) => swipe(state, context, Direction::Next),
        (_, NavEvent::SwipePrev) => swipe(state, context, Direction::Prev),
        (DrawerState::Closed, NavEvent::OpenDrawer) => Transition {
            state: NavState::Ready {
                drawer: DrawerState::Open,
            },
            context: context.clone(),
            effects: smallvec![Effect::LockBodyScroll],
            changed: true,
        },
        (DrawerState::Open, NavEvent::CloseDrawer) => Transition {
            state: NavState::Ready {
                drawer: DrawerState::Closed,
            },
            context: context.clone(),
            effects: smallvec![Effect::UnlockBodyScroll],
            changed: true,
        },
        (_, NavEvent::OpenDrawer | NavEvent::CloseDrawer | NavEvent::Initialize { .. }) => {
            Transition::ignored(state, context)
        }
    }
}

fn initialize(
    state: &NavState,
    context: &NavContext,
    group_id: Option<String>,
    all_groups: Arc<[Group]>,
    categories: Arc<[Category]>,
) -> Transition {
    let Some(first) = all_groups.first() else {
        tracing::debug!("ignoring INITIALIZE without groups");
        return Transition::ignored(state, context);
    };

    let requested = group_id
        .as_deref()
        .and_then(|param| resolve_group_alias(param, &all_groups));
    let previous = Some(context.current_group_id.as_str())
        .filter(|id| all_groups.iter().any(|g| g.id == *id));
    let chosen = requested.or(previous).unwrap_or(first.id.as_str()).to_string();

    if let (Some(param), None) = (group_id.as_deref(), requested) {
        tracing::debug!(group = param, fallback = %chosen, "unknown group in route");
    }

    let mut effects = Effects::new();
    if group_id.as_deref() != Some(chosen.as_str()) {
        effects.push(Effect::replace(&chosen));
    }

    let next_state = match *state {
        NavState::Initializing => NavState::Ready {
            drawer: DrawerState::Closed,
        },
        ready => ready,
    };

    Transition {
        state: next_state,
        context: NavContext {
            current_group_id: chosen,
            all_groups,
            categories,
            direction: Direction::None,
        },
        effects,
        changed: true,
    }
}

fn navigate_to(
    state: &NavState,
    context: &NavContext,
    drawer: DrawerState,
    group_id: &str,
) -> Transition {
    if !context.contains_group(group_id) {
        tracing::debug!(group = group_id, "ignoring navigation to unknown group");
        return Transition::ignored(state, context);
    }

    let mut effects = Effects::new();
    let mut next = context.clone();
    if group_id != context.current_group_id {
        next.current_group_id = group_id.to_string();
        next.direction = Direction::None;
        effects.push(Effect::push(group_id));
    }
    if drawer == DrawerState::Open {
        effects.push(Effect::UnlockBodyScroll);
    }

    let changed = !effects.is_empty();
    Transition {
        state: NavState::Ready {
            drawer: DrawerState::Closed,
        },
        context: next,
        effects,
        changed,
    }
}

fn swipe(state: &NavState, context: &NavContext, direction: Direction) -> Transition {
    let target = context.index_of(&context.current_group_id).and_then(|i| match direction {
        Direction::Next => context.all_groups.get(i + 1),
        Direction::Prev => i.checked_sub(1).and_then(|i| context.all_groups.get(i)),
        Direction::None => None,
    });
    let Some(target) = target else {
        tracing::trace!(?direction, "swipe at boundary");
        return Transition::ignored(state, context);
    };

    let mut next = context.clone();
    next.current_group_id = target.id.clone();
    next.direction = direction;
    Transition {
        state: *state,
        effects: smallvec![Effect::push(&target.id)],
        context: next,
        changed: true,
    }
}

/// Stateful wrapper around [`transition`]
#[derive(Clone, Debug, Default)]
pub struct NavigationMachine {
    state: NavState,
    context: NavContext,
}

impl NavigationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event and return the effects to run
    pub fn send(&mut self, event: NavEvent) -> Effects {
        let name = event.name();
        let Transition {
            state,
            context,
            effects,
            changed,
        } = transition(&self.state, &self.context, event);

        if changed {
            tracing::debug!(
                event = name,
                from = %self.state,
                to = %state,
                group = %context.current_group_id,
                "navigation transition"
            );
        }
        self.state = state;
        self.context = context;
        effects
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn context(&self) -> &NavContext {
        &self.context
    }

    /// See [`NavState::matches`]
    pub fn matches(&self, path: &str) -> bool {
        self.state.matches(path)
    }

    pub fn state_value(&self) -> &'static str {
        self.state.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animdex_catalog::Tech;

    fn group(id: &str) -> Group {
        Group::new(id, id)
    }

    fn catalog() -> (Arc<[Group]>, Arc<[Category]>) {
        let categories = vec![
            Category::new("base", "Base")
                .with_group(group("button-effects-framer").with_tech(Tech::Framer))
                .with_group(group("button-effects-css").with_tech(Tech::Css)),
            Category::new("dialogs", "Dialogs")
                .with_group(group("modal-base-framer"))
                .with_group(group("modal-base-css")),
            Category::new("empty", "Empty"),
        ];
        let groups: Vec<Group> = categories.iter().flat_map(|c| c.groups.clone()).collect();
        (groups.into(), categories.into())
    }

    fn init(group_id: Option<&str>) -> NavEvent {
        let (all_groups, categories) = catalog();
        NavEvent::Initialize {
            group_id: group_id.map(str::to_owned),
            all_groups,
            categories,
        }
    }

    fn ready(group_id: &str) -> NavigationMachine {
        let mut machine = NavigationMachine::new();
        machine.send(init(Some(group_id)));
        machine
    }

    fn push(path: &str) -> Effect {
        Effect::Navigate {
            path: path.into(),
            replace: false,
        }
    }

    #[test]
    fn test_starts_initializing() {
        let machine = NavigationMachine::new();
        assert_eq!(machine.state_value(), "initializing");
        assert!(machine.matches("initializing"));
        assert!(!machine.matches("ready"));
        assert!(machine.context().current_group_id.is_empty());
    }

    #[test]
    fn test_initialize_with_valid_group() {
        let mut machine = NavigationMachine::new();
        let effects = machine.send(init(Some("modal-base-css")));

        assert_eq!(machine.state_value(), "ready.drawer.closed");
        assert!(machine.matches("ready"));
        assert!(machine.matches("ready.drawer"));
        assert!(!machine.matches("read"));
        assert_eq!(machine.context().current_group_id, "modal-base-css");
        assert_eq!(machine.context().direction, Direction::None);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_initialize_unknown_group_falls_back_and_replaces_url() {
        let mut machine = NavigationMachine::new();
        let effects = machine.send(init(Some("nope")));

        assert!(machine.state().is_ready());
        assert_eq!(machine.context().current_group_id, "button-effects-framer");
        assert_eq!(
            effects.as_slice(),
            [Effect::Navigate {
                path: "/button-effects-framer".into(),
                replace: true,
            }]
        );
    }

    #[test]
    fn test_initialize_base_id_redirects_to_variant() {
        let mut machine = NavigationMachine::new();
        let effects = machine.send(init(Some("modal-base")));

        assert_eq!(machine.context().current_group_id, "modal-base-framer");
        assert_eq!(
            effects.as_slice(),
            [Effect::Navigate {
                path: "/modal-base-framer".into(),
                replace: true,
            }]
        );
    }

    #[test]
    fn test_initialize_without_groups_is_ignored() {
        let mut machine = NavigationMachine::new();
        let effects = machine.send(NavEvent::Initialize {
            group_id: Some("x".into()),
            all_groups: Vec::new().into(),
            categories: Vec::new().into(),
        });
        assert!(effects.is_empty());
        assert_eq!(machine.state(), NavState::Initializing);
    }

    #[test]
    fn test_reinitialize_keeps_drawer_and_current() {
        let mut machine = ready("modal-base-css");
        machine.send(NavEvent::OpenDrawer);

        let only_dialogs = vec![Category::new("dialogs", "Dialogs")
            .with_group(group("modal-base-framer"))
            .with_group(group("modal-base-css"))];
        let all_groups: Vec<Group> = only_dialogs[0].groups.clone();
        machine.send(NavEvent::Initialize {
            group_id: None,
            all_groups: all_groups.into(),
            categories: only_dialogs.into(),
        });

        assert!(machine.state().is_drawer_open());
        assert_eq!(machine.context().current_group_id, "modal-base-css");
        assert_eq!(machine.context().categories.len(), 1);
    }

    #[test]
    fn test_reinitialize_resets_when_current_is_gone() {
        let mut machine = ready("button-effects-css");

        let only_dialogs = vec![Category::new("dialogs", "Dialogs")
            .with_group(group("modal-base-framer"))
            .with_group(group("modal-base-css"))];
        let all_groups: Vec<Group> = only_dialogs[0].groups.clone();
        let effects = machine.send(NavEvent::Initialize {
            group_id: Some("button-effects-css".into()),
            all_groups: all_groups.into(),
            categories: only_dialogs.into(),
        });

        assert_eq!(machine.context().current_group_id, "modal-base-framer");
        assert_eq!(machine.context().all_groups.len(), 2);
        assert_eq!(
            effects.as_slice(),
            [Effect::Navigate {
                path: "/modal-base-framer".into(),
                replace: true,
            }]
        );
    }

    #[test]
    fn test_events_ignored_while_initializing() {
        let mut machine = NavigationMachine::new();
        for event in [
            NavEvent::navigate_to_group("modal-base-css"),
            NavEvent::SwipeNext,
            NavEvent::OpenDrawer,
        ] {
            assert!(machine.send(event).is_empty());
        }
        assert_eq!(machine.state(), NavState::Initializing);
    }

    #[test]
    fn test_navigate_to_group() {
        let mut machine = ready("button-effects-framer");
        let effects = machine.send(NavEvent::navigate_to_group("modal-base-css"));

        assert_eq!(machine.context().current_group_id, "modal-base-css");
        assert_eq!(machine.context().direction, Direction::None);
        assert_eq!(effects.as_slice(), [push("/modal-base-css")]);
    }

    #[test]
    fn test_navigate_to_unknown_group_is_noop() {
        let mut machine = ready("button-effects-framer");
        machine.send(NavEvent::OpenDrawer);
        let before = machine.clone();

        let effects = machine.send(NavEvent::navigate_to_group("ghost"));
        assert!(effects.is_empty());
        assert_eq!(machine.state(), before.state());
        assert_eq!(machine.context(), before.context());
    }

    #[test]
    fn test_navigate_to_current_group_only_closes_drawer() {
        let mut machine = ready("modal-base-css");
        assert!(machine
            .send(NavEvent::navigate_to_group("modal-base-css"))
            .is_empty());

        machine.send(NavEvent::OpenDrawer);
        let effects = machine.send(NavEvent::navigate_to_group("modal-base-css"));
        assert_eq!(effects.as_slice(), [Effect::UnlockBodyScroll]);
        assert!(!machine.state().is_drawer_open());
    }

    #[test]
    fn test_navigate_to_category() {
        let mut machine = ready("button-effects-css");
        let effects = machine.send(NavEvent::navigate_to_category("dialogs"));
        assert_eq!(machine.context().current_group_id, "modal-base-framer");
        assert_eq!(effects.as_slice(), [push("/modal-base-framer")]);

        assert!(machine.send(NavEvent::navigate_to_category("empty")).is_empty());
        assert!(machine.send(NavEvent::navigate_to_category("ghost")).is_empty());
        assert_eq!(machine.context().current_group_id, "modal-base-framer");
    }

    #[test]
    fn test_navigation_closes_drawer() {
        let mut machine = ready("button-effects-framer");
        assert_eq!(
            machine.send(NavEvent::OpenDrawer).as_slice(),
            [Effect::LockBodyScroll]
        );
        assert_eq!(machine.state_value(), "ready.drawer.open");

        let effects = machine.send(NavEvent::navigate_to_category("dialogs"));
        assert_eq!(machine.state_value(), "ready.drawer.closed");
        assert_eq!(
            effects.as_slice(),
            [push("/modal-base-framer"), Effect::UnlockBodyScroll]
        );
    }

    #[test]
    fn test_swipe_moves_and_sets_direction() {
        let mut machine = ready("button-effects-css");

        assert_eq!(
            machine.send(NavEvent::SwipeNext).as_slice(),
            [push("/modal-base-framer")]
        );
        assert_eq!(machine.context().direction, Direction::Next);

        machine.send(NavEvent::SwipePrev);
        assert_eq!(machine.context().current_group_id, "button-effects-css");
        assert_eq!(machine.context().direction, Direction::Prev);
        assert_eq!(machine.context().direction.as_i8(), -1);
    }

    #[test]
    fn test_swipe_clamps_at_boundaries() {
        let mut machine = ready("button-effects-framer");
        assert!(machine.send(NavEvent::SwipePrev).is_empty());
        assert_eq!(machine.context().current_group_id, "button-effects-framer");
        assert_eq!(machine.context().direction, Direction::None);

        let mut machine = ready("modal-base-css");
        assert!(machine.send(NavEvent::SwipeNext).is_empty());
        assert_eq!(machine.context().current_group_id, "modal-base-css");
    }

    #[test]
    fn test_swipe_keeps_drawer() {
        let mut machine = ready("button-effects-framer");
        machine.send(NavEvent::OpenDrawer);
        machine.send(NavEvent::SwipeNext);
        assert!(machine.state().is_drawer_open());
    }

    #[test]
    fn test_drawer_toggles_are_idempotent() {
        let mut machine = ready("button-effects-framer");
        assert!(machine.send(NavEvent::CloseDrawer).is_empty());
        machine.send(NavEvent::OpenDrawer);
        assert!(machine.send(NavEvent::OpenDrawer).is_empty());
        assert_eq!(
            machine.send(NavEvent::CloseDrawer).as_slice(),
            [Effect::UnlockBodyScroll]
        );
    }

    #[test]
    fn test_transition_is_pure() {
        let (all_groups, categories) = catalog();
        let context = NavContext {
            current_group_id: "modal-base-framer".into(),
            all_groups,
            categories,
            direction: Direction::None,
        };
        let state = NavState::Ready {
            drawer: DrawerState::Closed,
        };

        let a = transition(&state, &context, NavEvent::SwipePrev);
        let b = transition(&state, &context, NavEvent::SwipePrev);
        assert_eq!(a, b);
        assert_eq!(context.current_group_id, "modal-base-framer");
        assert_eq!(a.context.current_group_id, "button-effects-css");
    }

    #[test]
    fn test_active_category() {
        let machine = ready("modal-base-css");
        assert_eq!(
            machine.context().active_category().map(|c| c.id.as_str()),
            Some("dialogs")
        );
    }
}
