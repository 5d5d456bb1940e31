use super::table::{Crumb, FeatureModule, Route};

/// Email templates, email configuration and integrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdministrationModule;

impl FeatureModule for AdministrationModule {
    fn name(&self) -> &'static str {
        "administration"
    }

    fn routes(&self) -> Vec<Route> {
        let dashboard = Crumb::label("Dashboard");
        let templates = Crumb::link("Email Templates", "/administration/email-templates");
        vec![
            Route::protected("/administration/email-templates", "EmailTemplates")
                .with_breadcrumb(vec![dashboard.clone(), Crumb::label("Email Templates")]),
            Route::protected("/administration/email-templates/:id/edit", "EditEmailTemplate")
                .with_breadcrumb(vec![
                    dashboard.clone(),
                    templates,
                    Crumb::label("Edit Template"),
                ]),
            Route::protected("/administration/email-configuration", "EmailConfiguration")
                .with_breadcrumb(vec![dashboard.clone(), Crumb::label("Email Configuration")]),
            Route::protected("/administration/integrations", "Integrations")
                .with_breadcrumb(vec![dashboard, Crumb::label("Integrations")]),
        ]
    }
}
