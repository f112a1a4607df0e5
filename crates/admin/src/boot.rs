//! Admin page-load gate and sidebar navigation state.
//!
//! Every admin page runs [`ensure_admin_access`] before rendering
//! anything. This is a UX courtesy, not security: the server enforces
//! the role on every API call regardless.

use shopease_core::config::ClientConfig;
use shopease_core::navigate::Navigator;
use shopease_core::notify::Notifier;
use shopease_core::session::SessionStore;
use tracing::warn;

/// Outcome of the page-load access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    /// Stored user is an admin; render the page.
    Granted,
    /// Redirect already issued; render nothing.
    Denied,
}

impl AdminAccess {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Gate an admin page on the stored session.
///
/// No token sends the user to login. A token with a non-admin (or
/// missing, or unreadable) user record warns "Admin access required" and
/// sends them home. Only a stored `ADMIN` role renders the page.
#[must_use]
pub fn ensure_admin_access(
    config: &ClientConfig,
    session: &dyn SessionStore,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
) -> AdminAccess {
    if session.token().is_none() {
        navigator.goto(&config.login_path);
        return AdminAccess::Denied;
    }

    let is_admin = session.current_user().is_some_and(|user| user.is_admin());
    if !is_admin {
        warn!("non-admin user on admin page, sending home");
        notifier.warning("Admin access required");
        navigator.goto(&config.home_path);
        return AdminAccess::Denied;
    }

    AdminAccess::Granted
}

/// One sidebar entry.
#[derive(Debug, Clone)]
pub struct SidebarItem {
    /// Link target, matched against the current path.
    pub href: String,
    /// Display label.
    pub label: String,
    /// Whether this entry carries the `active` highlight.
    pub active: bool,
}

/// Sidebar navigation with a single highlighted entry per page.
#[derive(Debug, Clone, Default)]
pub struct SidebarNav {
    items: Vec<SidebarItem>,
}

impl SidebarNav {
    /// Create an empty sidebar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    #[must_use]
    pub fn item(mut self, href: &str, label: &str) -> Self {
        self.items.push(SidebarItem {
            href: href.to_string(),
            label: label.to_string(),
            active: false,
        });
        self
    }

    /// Highlight the entry whose href equals `current_path` exactly,
    /// clearing every other highlight. Prefixes do not match: on
    /// `/admin/orders/42` no plain `/admin/orders` entry lights up.
    pub fn highlight(&mut self, current_path: &str) {
        for item in &mut self.items {
            item.active = item.href == current_path;
        }
    }

    /// Highlight from wherever the navigator says the user is.
    pub fn highlight_current(&mut self, navigator: &dyn Navigator) {
        self.highlight(&navigator.current_path());
    }

    /// All entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    /// The highlighted href, if any.
    #[must_use]
    pub fn active_href(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.active)
            .map(|item| item.href.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopease_core::navigate::MemoryNavigator;
    use shopease_core::notify::MemoryNotifier;
    use shopease_core::session::{MemorySessionStore, Role, SessionStore, StoredUser, keys};

    fn check(session: &MemorySessionStore) -> (AdminAccess, MemoryNavigator, MemoryNotifier) {
        let navigator = MemoryNavigator::new("/admin");
        let notifier = MemoryNotifier::new();
        let access = ensure_admin_access(&ClientConfig::default(), session, &navigator, &notifier);
        (access, navigator, notifier)
    }

    #[test]
    fn test_no_token_redirects_to_login() {
        let session = MemorySessionStore::new();
        let (access, navigator, notifier) = check(&session);

        assert_eq!(access, AdminAccess::Denied);
        assert_eq!(navigator.last_visited().as_deref(), Some("/login"));
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_non_admin_warns_and_goes_home() {
        let session =
            MemorySessionStore::with_session("tok", &StoredUser::with_role(Role::Customer));
        let (access, navigator, notifier) = check(&session);

        assert_eq!(access, AdminAccess::Denied);
        assert_eq!(navigator.last_visited().as_deref(), Some("/"));
        assert_eq!(notifier.messages(), vec!["Admin access required"]);
    }

    #[test]
    fn test_corrupt_user_record_is_denied() {
        let session = MemorySessionStore::new();
        session.set(keys::TOKEN, "tok");
        session.set(keys::USER, "{broken");
        let (access, navigator, _) = check(&session);

        assert_eq!(access, AdminAccess::Denied);
        assert_eq!(navigator.last_visited().as_deref(), Some("/"));
    }

    #[test]
    fn test_admin_is_granted_without_side_effects() {
        let session = MemorySessionStore::with_session("tok", &StoredUser::with_role(Role::Admin));
        let (access, navigator, notifier) = check(&session);

        assert!(access.is_granted());
        assert!(navigator.last_visited().is_none());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_highlight_matches_exact_path_only() {
        let mut nav = SidebarNav::new()
            .item("/admin", "Dashboard")
            .item("/admin/orders", "Orders")
            .item("/admin/products", "Products");

        nav.highlight("/admin/orders");
        assert_eq!(nav.active_href(), Some("/admin/orders"));

        nav.highlight("/admin/orders/42");
        assert_eq!(nav.active_href(), None);
    }

    #[test]
    fn test_highlight_current_reads_the_navigator() {
        let navigator = MemoryNavigator::new("/admin/products");
        let mut nav = SidebarNav::new()
            .item("/admin", "Dashboard")
            .item("/admin/products", "Products");

        nav.highlight_current(&navigator);
        assert_eq!(nav.active_href(), Some("/admin/products"));
    }

    #[test]
    fn test_highlight_clears_previous() {
        let mut nav = SidebarNav::new()
            .item("/admin", "Dashboard")
            .item("/admin/orders", "Orders");

        nav.highlight("/admin");
        nav.highlight("/admin/orders");

        let actives: Vec<_> = nav.items().iter().filter(|i| i.active).collect();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].href, "/admin/orders");
    }
}
