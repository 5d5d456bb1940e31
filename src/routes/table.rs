use std::collections::BTreeMap;

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Requires a session.
    Protected,
    /// Only without a session (login and password pages).
    Guest,
    Public,
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: &'static str,
    pub to: Option<&'static str>,
}

impl Crumb {
    pub const fn label(label: &'static str) -> Self {
        Self { label, to: None }
    }

    pub const fn link(label: &'static str, to: &'static str) -> Self {
        Self {
            label,
            to: Some(to),
        }
    }
}

/// A route declaration. `:name` segments capture parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub access: Access,
    pub redirect: Option<&'static str>,
    pub breadcrumb: Vec<Crumb>,
}

impl Route {
    pub fn protected(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name: Some(name),
            access: Access::Protected,
            redirect: None,
            breadcrumb: Vec::new(),
        }
    }

    pub fn guest(path: &'static str, name: &'static str) -> Self {
        Self {
            access: Access::Guest,
            ..Self::protected(path, name)
        }
    }

    pub fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            access: Access::Public,
            redirect: Some(to),
            breadcrumb: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_breadcrumb(mut self, crumbs: Vec<Crumb>) -> Self {
        self.breadcrumb = crumbs;
        self
    }

    fn matches(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = split(self.path);
        if pattern.len() != segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            if let Some(name) = expected.strip_prefix(':') {
                params.insert(name.to_string(), (*actual).to_string());
            } else if expected != actual {
                return None;
            }
        }
        Some(params)
    }
}

/// A resolved route with its captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

/// A feature area contributing its own routes.
pub trait FeatureModule {
    fn name(&self) -> &'static str;
    fn routes(&self) -> Vec<Route>;
}

/// Ordered route declarations. The first match wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The fixed application shell.
    pub fn shell() -> Self {
        let dashboard = Crumb::label("Dashboard");
        let plans = Crumb::link("Plans", "/plans");
        Self {
            routes: vec![
                Route::redirect("/", "/dashboard"),
                Route::protected("/dashboard", "Dashboard").with_breadcrumb(vec![dashboard.clone()]),
                Route::protected("/menu", "Menu")
                    .with_breadcrumb(vec![dashboard.clone(), Crumb::label("Menu")]),
                Route::protected("/plans", "Plans")
                    .with_breadcrumb(vec![dashboard.clone(), Crumb::label("Plans")]),
                Route::protected("/plans/add", "AddPlan").with_breadcrumb(vec![
                    dashboard.clone(),
                    plans.clone(),
                    Crumb::label("Add Plan"),
                ]),
                Route::protected("/plans/:id/edit", "EditPlan").with_breadcrumb(vec![
                    dashboard,
                    plans,
                    Crumb::label("Edit Plan"),
                ]),
                Route::guest("/auth/login", "Login"),
                Route::guest("/auth/verify/email", "CodeVerification"),
                Route::guest("/auth/password/forget", "Password Reset Request"),
                Route::guest("/auth/password/reset", "New Password Setup"),
                Route::guest("/auth/password/set", "Password Setup"),
            ],
        }
    }

    /// Append a feature module's routes.
    #[must_use]
    pub fn with_module(mut self, module: &dyn FeatureModule) -> Self {
        let routes = module.routes();
        tracing::debug!(name: "route.module.registered", module = module.name(), count = routes.len(), "Feature routes registered");
        self.routes.extend(routes);
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == Some(name))
    }

    /// Match a path, ignoring any query string or fragment.
    /// `None` means the catch-all not-found page.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments = split(path);
        self.routes.iter().find_map(|route| {
            route
                .matches(&segments)
                .map(|params| RouteMatch { route, params })
        })
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_route_wins_over_param() {
        let table = RouteTable::shell();
        let found = table.resolve("/plans/add").unwrap();
        assert_eq!(found.route.name, Some("AddPlan"));
        assert!(found.params.is_empty());
    }

    #[test]
    fn test_query_and_trailing_slash_ignored() {
        let table = RouteTable::shell();
        assert_eq!(
            table.resolve("/plans/?page=2").unwrap().route.name,
            Some("Plans")
        );
        assert_eq!(
            table.resolve("/auth/login#top").unwrap().route.access,
            Access::Guest
        );
    }

    #[test]
    fn test_breadcrumbs() {
        let table = RouteTable::shell();
        let edit = table.by_name("EditPlan").unwrap();
        assert_eq!(edit.breadcrumb.len(), 3);
        assert_eq!(edit.breadcrumb[1].to, Some("/plans"));
    }
}
