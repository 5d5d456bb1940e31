mod common;

use common::{MockBackend, harness, token_body};
use serde_json::json;

use tmb_admin::dispatch::Severity;
use tmb_admin::types::{LoginRequest, Query};

#[tokio::test]
async fn test_plan_mutations_toast_once_each() {
    let mock = MockBackend::new();
    mock.on("POST", "/api/admin/plans", 201, json!({ "data": { "id": 3 } }))
        .on("PUT", "/api/admin/plans/3", 200, json!({ "data": { "id": 3 } }))
        .on("POST", "/api/admin/plans/3/change-status", 200, json!({ "data": { "status": 0 } }))
        .on("DELETE", "/api/admin/plans/3", 204, json!(null));
    let base = mock.serve().await;
    let h = harness(&base);
    let plan = json!({ "name": "Pro", "price": 49.0 });

    let created = h.app.plans.create(&plan).await.unwrap();
    assert_eq!(created["data"]["id"], 3);
    h.app.plans.update(3, &plan).await.unwrap();
    h.app
        .plans
        .change_status(3, &json!({ "status": 0 }))
        .await
        .unwrap();
    h.app.plans.delete_item(3).await.unwrap();

    let notes = h.notifier.snapshot();
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Plan created", "Plan updated", "Plan updated", "Plan deleted"]
    );
    assert!(notes.iter().all(|n| n.severity == Severity::Success));

    assert_eq!(mock.last("PUT", "/api/admin/plans/3").unwrap().json(), plan);
    assert!(mock.last("DELETE", "/api/admin/plans/3").is_some());
}

#[tokio::test]
async fn test_menu_mutations_toast_once_each() {
    let mock = MockBackend::new();
    mock.on("POST", "/api/admin/menus", 201, json!({ "data": { "id": 4 } }))
        .on("PUT", "/api/admin/menus/4", 200, json!({ "data": { "id": 4 } }))
        .on(
            "POST",
            "/api/admin/menus/4/change-status",
            200,
            json!({ "data": { "status": 1 } }),
        );
    let base = mock.serve().await;
    let h = harness(&base);
    let menu = json!({ "name": "Reports", "route": "/reports" });

    let created = h.app.menus.create(&menu).await.unwrap();
    assert_eq!(created["data"]["id"], 4);
    assert_eq!(h.notifier.count(Severity::Success), 1);

    h.app.menus.update(4, &menu).await.unwrap();
    assert_eq!(h.notifier.count(Severity::Success), 2);

    h.app
        .menus
        .change_status(4, &json!({ "status": 1 }))
        .await
        .unwrap();

    let notes = h.notifier.snapshot();
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["Menu created", "Menu updated", "Menu updated"]);
    assert!(notes.iter().all(|n| n.severity == Severity::Success));

    assert_eq!(mock.last("POST", "/api/admin/menus").unwrap().json(), menu);
    assert_eq!(mock.last("PUT", "/api/admin/menus/4").unwrap().json(), menu);
    assert_eq!(
        mock.last("POST", "/api/admin/menus/4/change-status")
            .unwrap()
            .json()["status"],
        1
    );
    assert_eq!(mock.requests().len(), 3);
}

#[tokio::test]
async fn test_failed_mutation_shows_only_the_error() {
    let mock = MockBackend::new();
    mock.on(
        "POST",
        "/api/admin/menus",
        422,
        json!({ "message": "The name field is required." }),
    );
    let base = mock.serve().await;
    let h = harness(&base);

    let err = h.app.menus.create(&json!({})).await.unwrap_err();
    assert_eq!(err.status(), Some(422));

    assert_eq!(h.notifier.count(Severity::Success), 0);
    let notes = h.notifier.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Error");
    assert_eq!(notes[0].message, "The name field is required.");
    assert!(!h.app.dispatcher.is_loading());
}

#[tokio::test]
async fn test_reads_do_not_toast() {
    let mock = MockBackend::new();
    mock.on(
        "POST",
        "/api/admin/plans/search",
        200,
        json!({ "data": [{ "id": 1 }, { "id": 2 }], "meta": { "total": 2 } }),
    )
    .on("GET", "/api/admin/plans/5", 200, json!({ "data": { "id": 5 } }))
    .on(
        "GET",
        "/api/dashboard/summary",
        200,
        json!({ "data": { "plans": 2, "menus": 4 } }),
    );
    let base = mock.serve().await;
    let h = harness(&base);

    let filters = json!({ "search": "pro" });
    let query = Query::new().with("page", 2).with("per_page", 25);
    let found = h.app.plans.search(&filters, Some(&query)).await.unwrap();
    assert_eq!(found["meta"]["total"], 2);

    let sent = mock.last("POST", "/api/admin/plans/search").unwrap();
    assert_eq!(sent.query.as_deref(), Some("page=2&per_page=25"));
    assert_eq!(sent.json(), filters);

    h.app.plans.show(5).await.unwrap();
    let show = mock.last("GET", "/api/admin/plans/5").unwrap();
    assert_eq!(
        show.query.as_deref(),
        Some("include=planMenuLimits%2CplanPricings")
    );

    let summary = h.app.dashboard.summary().await.unwrap();
    assert_eq!(summary["data"]["menus"], 4);

    assert!(h.notifier.snapshot().is_empty());
}

#[tokio::test]
async fn test_email_templates() {
    let mock = MockBackend::new();
    mock.on("GET", "/api/email-templates/9", 200, json!({ "data": { "id": 9 } }))
        .on("PUT", "/api/email-templates/9", 200, json!({ "data": { "id": 9 } }))
        .on(
            "POST",
            "/api/email-templates/9/change-status",
            200,
            json!({ "data": { "id": 9 } }),
        )
        .on_text(
            "POST",
            "/api/email-templates/9/preview",
            "<h1>Welcome, Ada</h1>",
        );
    let base = mock.serve().await;
    let h = harness(&base);

    let query = Query::new().with("include", "variables");
    h.app.email_templates.show(9, Some(&query)).await.unwrap();
    assert_eq!(
        mock.last("GET", "/api/email-templates/9").unwrap().query.as_deref(),
        Some("include=variables")
    );

    let html = h
        .app
        .email_templates
        .preview(9, &json!({ "name": "Ada" }))
        .await
        .unwrap();
    assert_eq!(html, "<h1>Welcome, Ada</h1>");

    // Preview asks for text only; everything else asks for JSON only
    let preview = mock.last("POST", "/api/email-templates/9/preview").unwrap();
    assert_eq!(preview.accept, ["text/html, text/plain, */*"]);
    assert_eq!(preview.json()["name"], "Ada");
    let show = mock.last("GET", "/api/email-templates/9").unwrap();
    assert_eq!(show.accept, ["application/json"]);

    h.app
        .email_templates
        .update(9, &json!({ "subject": "Hi" }))
        .await
        .unwrap();
    h.app
        .email_templates
        .change_status(9, &json!({ "status": 1 }))
        .await
        .unwrap();

    let titles: Vec<String> = h.notifier.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["Template updated", "Template updated"]);
}

#[tokio::test]
async fn test_email_configuration_caches_data() {
    let mock = MockBackend::new();
    let config = json!({ "host": "smtp.example.com", "port": 587 });
    mock.on(
        "GET",
        "/api/email-configuration",
        200,
        json!({ "data": config.clone() }),
    )
    .on("POST", "/api/email-configuration", 200, json!({ "message": "saved" }));
    let base = mock.serve().await;
    let h = harness(&base);

    assert_eq!(h.app.email_configuration.current_config(), None);
    h.app.email_configuration.get_configuration().await.unwrap();
    assert_eq!(h.app.email_configuration.current_config(), Some(config.clone()));

    // Saving leaves the cache until the next fetch
    h.app
        .email_configuration
        .update_configuration(&json!({ "host": "smtp2.example.com" }))
        .await
        .unwrap();
    assert_eq!(h.app.email_configuration.current_config(), Some(config));
    assert_eq!(h.notifier.count(Severity::Success), 1);
}

#[tokio::test]
async fn test_quickbooks_integration() {
    let mock = MockBackend::new();
    mock.on("GET", "/api/quickbooks/info", 200, json!({ "data": { "connected": true } }))
        .on("POST", "/api/quickbooks/setup", 200, json!({ "data": { "url": "https://qb" } }))
        .on("POST", "/api/quickbooks/toggle", 200, json!({ "data": { "enabled": false } }))
        .on("POST", "/api/quickbooks/save-defaults", 200, json!({ "message": "ok" }))
        .on("POST", "/api/quickbooks/disconnect", 200, json!({ "message": "ok" }))
        .on("GET", "/api/quickbooks/deposit-banks", 200, json!({ "data": [{ "id": "35" }] }))
        .on("GET", "/api/quickbooks/expense-bank-accounts", 200, json!({ "data": [] }))
        .on("GET", "/api/quickbooks/credit-card-accounts", 200, json!({ "data": [] }));
    let base = mock.serve().await;
    let h = harness(&base);
    let qb = &h.app.integrations;

    assert_eq!(qb.quickbooks_info().await.unwrap()["data"]["connected"], true);
    assert_eq!(qb.setup_quickbooks().await.unwrap()["data"]["url"], "https://qb");
    qb.toggle_quickbooks(&json!({ "enabled": false })).await.unwrap();
    assert_eq!(
        mock.last("POST", "/api/quickbooks/toggle").unwrap().json()["enabled"],
        false
    );
    qb.save_integration_defaults(&json!({ "deposit_bank": "35" }))
        .await
        .unwrap();
    assert_eq!(qb.deposit_banks().await.unwrap()["data"][0]["id"], "35");
    qb.expense_bank_accounts().await.unwrap();
    qb.credit_card_accounts().await.unwrap();
    qb.disconnect_quickbooks().await.unwrap();

    let notes = h.notifier.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "QuickBooks defaults saved");
}

#[tokio::test]
async fn test_requests_carry_bearer_once_signed_in() {
    let mock = MockBackend::new();
    mock.on("POST", "/api/auth/login", 200, token_body("tok-abc", 3600))
        .on("GET", "/api/dashboard/summary", 200, json!({ "data": {} }));
    let base = mock.serve().await;
    let h = harness(&base);

    h.app.dashboard.summary().await.unwrap();
    assert_eq!(
        mock.last("GET", "/api/dashboard/summary").unwrap().authorization,
        None
    );

    h.app
        .auth
        .login(&LoginRequest {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    h.app.dashboard.summary().await.unwrap();
    assert_eq!(
        mock.last("GET", "/api/dashboard/summary")
            .unwrap()
            .authorization
            .as_deref(),
        Some("Bearer tok-abc")
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_an_http_error() {
    // Nothing listens on the discard port
    let h = harness("http://127.0.0.1:9");

    let err = h.app.dashboard.summary().await.unwrap_err();
    assert!(matches!(err, tmb_admin::Error::Http(_)));
    assert_eq!(h.notifier.count(Severity::Error), 1);
}

#[tokio::test]
async fn test_concurrent_actions_track_loading() {
    let mock = MockBackend::new();
    mock.on("GET", "/api/dashboard/summary", 200, json!({ "data": {} }))
        .on("POST", "/api/admin/menus/search", 200, json!({ "data": [] }));
    let base = mock.serve().await;
    let h = harness(&base);

    let filter = json!({});
    let (a, b) = tokio::join!(
        h.app.dashboard.summary(),
        h.app.menus.search(&filter, None)
    );
    a.unwrap();
    b.unwrap();
    assert_eq!(h.app.dispatcher.in_flight(), 0);
    assert_eq!(mock.requests().len(), 2);
}
