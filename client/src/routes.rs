//! Route table: paths and the access metadata attached to each.
//!
//! DESIGN
//! ======
//! The Leptos router in `app.rs` mounts one view per variant; the guard only
//! ever sees `RouteMeta`, so adding a route means adding a variant here.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Static access requirements of a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_admin: false };
    pub const AUTHENTICATED: Self = Self { requires_auth: true, requires_admin: false };
    pub const ADMIN: Self = Self { requires_auth: true, requires_admin: true };
}

/// Every navigable location in the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// `/`, always forwarded to the login page.
    Root,
    Login,
    Chat,
    /// Account management, admins only.
    Users,
}

impl AppRoute {
    pub const ALL: [Self; 4] = [Self::Root, Self::Login, Self::Chat, Self::Users];

    /// Where a signed-in user lands, and where non-admins are bounced to.
    pub const DEFAULT_AUTHENTICATED: Self = Self::Chat;

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Chat => "/chat",
            Self::Users => "/users",
        }
    }

    #[must_use]
    pub fn meta(self) -> RouteMeta {
        match self {
            Self::Root | Self::Login => RouteMeta::PUBLIC,
            Self::Chat => RouteMeta::AUTHENTICATED,
            Self::Users => RouteMeta::ADMIN,
        }
    }

    /// Target that `/` forwards to.
    #[must_use]
    pub fn redirect_target(self) -> Option<Self> {
        match self {
            Self::Root => Some(Self::Login),
            _ => None,
        }
    }
}
