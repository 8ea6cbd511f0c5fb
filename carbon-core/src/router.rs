//! Route table and login guard.

use std::fmt;

use tracing::debug;

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Dashboard,
    QuickEstimate,
    DetailedAnalysis,
    Quiz,
    History,
    RegionalStats,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Landing,
            Route::Dashboard,
            Route::QuickEstimate,
            Route::DetailedAnalysis,
            Route::Quiz,
            Route::History,
            Route::RegionalStats,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Dashboard => "/dashboard",
            Route::QuickEstimate => "/quick-estimate",
            Route::DetailedAnalysis => "/detailed-analysis",
            Route::Quiz => "/quiz",
            Route::History => "/history",
            Route::RegionalStats => "/regional-stats",
        }
    }

    /// Unknown paths fall back to the landing page. A trailing slash is
    /// ignored.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::all()
            .iter()
            .copied()
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::Landing)
    }

    /// Every route except the landing page needs a logged-in user.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing)
    }
}

impl fmt::Display for Route {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What to do with a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    /// The route that ends up on screen.
    pub fn target(&self) -> Route {
        match self {
            Resolution::Render(route) | Resolution::Redirect(route) => *route,
        }
    }
}

/// Applies the login guard to `route`.
///
/// A logged-in user never sees the landing page; it forwards to the
/// dashboard. Without a user every protected route sends back to landing.
pub fn resolve(
    route: Route,
    user: Option<&User>,
) -> Resolution {
    let resolution = match (route, user) {
        (Route::Landing, Some(_)) => Resolution::Redirect(Route::Dashboard),
        (route, None) if route.is_protected() => Resolution::Redirect(Route::Landing),
        (route, _) => Resolution::Render(route),
    };
    if let Resolution::Redirect(to) = resolution {
        debug!(from = %route, %to, "redirected");
    }
    resolution
}
