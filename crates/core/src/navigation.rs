//! Navigation
//!
//! Paths, the navigation primitive the checkout flow drives, and the guard for
//! routes that need a signed-in user.

use tracing::debug;

use crate::{auth::AuthStatus, checkout::PendingCheckoutHandoff};

/// Landing page.
pub const HOME_PATH: &str = "/";

/// Course listing.
pub const COURSES_PATH: &str = "/courses";

/// Login form.
pub const LOGIN_PATH: &str = "/login";

/// Default destination after signing in.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Learning history.
pub const MY_LEARNING_PATH: &str = "/my-learning";

/// Header link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Link text.
    pub name: &'static str,

    /// Destination path.
    pub href: &'static str,
}

const PUBLIC_LINKS: [NavLink; 5] = [
    NavLink { name: "Home", href: HOME_PATH },
    NavLink { name: "Courses", href: COURSES_PATH },
    NavLink { name: "About", href: "/about" },
    NavLink { name: "Blog", href: "/blog" },
    NavLink { name: "Contact", href: "/contact" },
];

const MY_LEARNING_LINK: NavLink = NavLink {
    name: "My Learning",
    href: MY_LEARNING_PATH,
};

/// Header links for `status`; signed-in users also get "My Learning" after
/// "Courses".
pub fn header_links(status: &AuthStatus) -> Vec<NavLink> {
    let mut links = PUBLIC_LINKS.to_vec();

    if matches!(status, AuthStatus::Authenticated(_)) {
        links.insert(2, MY_LEARNING_LINK);
    }

    links
}

/// A path the user was on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Absolute path, e.g. `/courses`.
    pub pathname: String,
}

impl Location {
    /// Location for `pathname`.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
        }
    }
}

/// Moves the user between pages and carries transient state with a move.
pub trait Navigator {
    /// Path currently shown.
    fn current_path(&self) -> &str;

    /// Push `path`, optionally attaching `state` for the destination to read.
    fn navigate_to(&mut self, path: &str, state: Option<PendingCheckoutHandoff>);

    /// Replace the current entry with `path`, dropping any attached state.
    fn replace(&mut self, path: &str);

    /// Take the state attached to the current entry. A second call returns `None`.
    fn take_state(&mut self) -> Option<PendingCheckoutHandoff>;
}

/// One entry in the navigation history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Path of the entry.
    pub path: String,

    state: Option<PendingCheckoutHandoff>,
}

impl HistoryEntry {
    fn new(path: &str, state: Option<PendingCheckoutHandoff>) -> Self {
        Self {
            path: path.to_string(),
            state,
        }
    }

    /// Whether unread state is attached.
    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }
}

/// In-process history stack.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    current: HistoryEntry,
    previous: Vec<HistoryEntry>,
}

impl MemoryNavigator {
    /// Start at `initial_path`.
    pub fn new(initial_path: &str) -> Self {
        Self {
            current: HistoryEntry::new(initial_path, None),
            previous: Vec::new(),
        }
    }

    /// The current entry.
    pub fn current(&self) -> &HistoryEntry {
        &self.current
    }

    /// Paths visited, oldest first, ending with the current one.
    pub fn visited_paths(&self) -> Vec<&str> {
        self.previous
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|entry| entry.path.as_str())
            .collect()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> &str {
        &self.current.path
    }

    fn navigate_to(&mut self, path: &str, state: Option<PendingCheckoutHandoff>) {
        debug!(from = %self.current.path, to = path, with_state = state.is_some(), "navigate");

        let previous = std::mem::replace(&mut self.current, HistoryEntry::new(path, state));

        self.previous.push(previous);
    }

    fn replace(&mut self, path: &str) {
        debug!(from = %self.current.path, to = path, "replace");

        self.current = HistoryEntry::new(path, None);
    }

    fn take_state(&mut self) -> Option<PendingCheckoutHandoff> {
        self.current.state.take()
    }
}

/// Whether `path` needs a signed-in user.
pub fn requires_auth(path: &str) -> bool {
    path == MY_LEARNING_PATH
}

/// What to do when the user arrives at a path.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Show the page.
    Render,

    /// Auth state is still loading; show a placeholder and decide later.
    Defer,

    /// Send the user to login, remembering where they were going.
    RedirectToLogin(PendingCheckoutHandoff),
}

/// Decide whether `path` may render given the current auth state.
pub fn guard_route(path: &str, status: &AuthStatus) -> RouteDecision {
    if !requires_auth(path) {
        return RouteDecision::Render;
    }

    match status {
        AuthStatus::Loading => RouteDecision::Defer,
        AuthStatus::Authenticated(_) => RouteDecision::Render,
        AuthStatus::Anonymous => {
            RouteDecision::RedirectToLogin(PendingCheckoutHandoff::return_to(path))
        }
    }
}
