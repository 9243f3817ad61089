use anyhow::Result;
use chrono::{Locale, NaiveDate};
use httpmock::prelude::*;
use kurs_dashboard::config::{Endpoints, OutputFormat};
use kurs_dashboard::core::loader::LoadState;
use kurs_dashboard::core::view::ViewOptions;
use kurs_dashboard::core::Storage;
use kurs_dashboard::utils::validation::Validate;
use kurs_dashboard::{Dashboard, DashboardEngine, HttpDataSource, LocalStorage, TomlConfig};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn options() -> ViewOptions {
    ViewOptions {
        today: today(),
        locale: Locale::en_US,
    }
}

/// Mounts the five collection endpoints below `/api/`.
fn mock_collections(server: &MockServer) -> Vec<httpmock::Mock<'_>> {
    let base = server.url("/api");
    let collections = [
        ("/api/dozenten/", serde_json::json!([{"id": 1}, {"id": 2}])),
        (
            "/api/teilnehmer/",
            serde_json::json!([
                {"id": 1, "name": "Anna Becker"},
                {"id": 2, "name": "Jonas Wolf"}
            ]),
        ),
        ("/api/raeume/", serde_json::json!([{"id": "R1"}])),
        (
            "/api/kurse/",
            serde_json::json!([
                {"id": 1, "titel": "Töpfern", "preis": "100.00", "startdatum": "2026-10-17"},
                {"id": 2, "titel": "Spanisch A1", "preis": "80.00", "startdatum": "2026-11-17"},
                {"id": 3, "titel": "Ohne Termin", "preis": "50.00"}
            ]),
        ),
        (
            "/api/anmeldungen/",
            serde_json::json!([
                {"id": 1, "teilnehmer": format!("{}/teilnehmer/1/", base), "kurs": format!("{}/kurse/1/", base), "anmeldedatum": "2026-10-01T09:30:00Z", "bezahlt": true},
                {"id": 2, "teilnehmer": format!("{}/teilnehmer/2/", base), "kurs": format!("{}/kurse/1/", base), "anmeldedatum": "2026-10-05T12:00:00Z", "bezahlt": true},
                {"id": 3, "teilnehmer": format!("{}/teilnehmer/1/", base), "kurs": format!("{}/kurse/2/", base), "anmeldedatum": "2026-08-12", "bezahlt": false},
                {"id": 4, "teilnehmer": format!("{}/teilnehmer/9/", base), "kurs": format!("{}/kurse/3/", base), "anmeldedatum": null}
            ]),
        ),
    ];

    collections
        .into_iter()
        .map(|(path, body)| {
            server.mock(|when, then| {
                when.method(GET).path(path);
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(body.clone());
            })
        })
        .collect()
}

#[tokio::test]
async fn test_end_to_end_dashboard_over_http() -> Result<()> {
    let server = MockServer::start();
    let mocks = mock_collections(&server);

    let source = HttpDataSource::new(&server.url("/api/"), Endpoints::default())?;
    let dashboard = Dashboard::load(&source).await;

    for mock in &mocks {
        mock.assert();
    }
    assert_eq!(dashboard.state(), LoadState::Ready);

    let engine = DashboardEngine::new(source, options(), OutputFormat::Json);
    let json = engine.run().await?;
    let view: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(view["hero"]["active_courses"], 1);
    assert_eq!(view["hero"]["upcoming_courses"], 1);
    assert_eq!(view["hero"]["registrations"], 4);
    assert_eq!(view["payments"]["paid"], 2);
    assert_eq!(view["payments"]["unpaid"], 2);
    assert_eq!(view["payments"]["revenue"], "200.00");

    let buckets = view["monthly_registrations"].as_array().unwrap();
    let counts: Vec<u64> = buckets.iter().map(|b| b["count"].as_u64().unwrap()).collect();
    assert_eq!(counts, vec![0, 0, 0, 1, 0, 2]);

    let recent = view["recent_registrations"].as_array().unwrap();
    assert_eq!(recent.len(), 4);
    assert_eq!(recent[0]["participant"], "Jonas Wolf");
    assert_eq!(recent[0]["course"], "Töpfern");
    assert_eq!(recent[3]["participant"], "—");

    let counts: Vec<(String, u64)> = view["kpi_cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["href"].as_str().unwrap().to_string(),
                c["count"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("/kurse".to_string(), 3),
            ("/teilnehmer".to_string(), 2),
            ("/dozenten".to_string(), 2),
            ("/raeume".to_string(), 1),
            ("/anmeldungen".to_string(), 4)
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_one_failing_endpoint_renders_empty_dashboard() -> Result<()> {
    let server = MockServer::start();
    for path in ["/dozenten/", "/teilnehmer/", "/kurse/", "/anmeldungen/"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": 1, "name": "x"}]));
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/raeume/");
        then.status(503);
    });

    let source = HttpDataSource::new(&server.base_url(), Endpoints::default())?;
    let dashboard = Dashboard::load(&source).await;

    assert_eq!(dashboard.state(), LoadState::Failed);
    assert!(dashboard.data().teilnehmer.is_empty());
    assert!(dashboard.data().kurse.is_empty());

    let engine = DashboardEngine::new(source, options(), OutputFormat::Text);
    let text = engine.run().await?;

    assert!(text.contains("Aktive Kurse: 0"));
    assert!(text.contains("Anmeldungen: 0"));
    assert!(text.contains("Umsatz: 0.00 €"));
    assert!(text.contains("Keine Anmeldungen"));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_renders_empty_dashboard() -> Result<()> {
    // 連不上的埠
    let source = HttpDataSource::new("http://127.0.0.1:9/api/", Endpoints::default())?;
    let engine = DashboardEngine::new(source, options(), OutputFormat::Json);

    let json = engine.run().await?;
    let view: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(view["loading"], false);
    assert_eq!(view["hero"]["registrations"], 0);
    assert_eq!(view["recent_registrations"].as_array().unwrap().len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_toml_config_drives_endpoints_and_output() -> Result<()> {
    let server = MockServer::start();
    let temp_dir = TempDir::new()?;

    let mut mocks = Vec::new();
    for path in [
        "/v2/dozenten/",
        "/v2/teilnehmer/",
        "/v2/raeume/",
        "/v2/courses/",
        "/v2/anmeldungen/",
    ] {
        mocks.push(server.mock(|when, then| {
            when.method(GET).path(path).header("X-Client", "dashboard");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        }));
    }

    let output_file = temp_dir.path().join("dashboard.txt");
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[source]
base_url = "{}/v2"

[source.endpoints]
kurse = "courses/"

[source.headers]
X-Client = "dashboard"

[display]
locale = "en_US"
format = "text"
today = "2026-10-17"

[output]
path = "{}"
"#,
        server.base_url(),
        output_file.to_str().unwrap().replace('\\', "/")
    ))?;
    config.validate()?;

    let source = HttpDataSource::from_config(&config)?;
    let engine = DashboardEngine::from_config(source, &config)?;
    let rendered = engine.run().await?;

    for mock in &mocks {
        mock.assert();
    }

    LocalStorage::new(temp_dir.path())
        .write_file("dashboard.txt", rendered.as_bytes())
        .await?;

    let written = std::fs::read_to_string(&output_file)?;
    assert!(written.contains("Stand 17.10.2026"));
    assert!(written.contains("Oct"));
    assert!(written.contains("Aktive Kurse: 0"));

    Ok(())
}

#[tokio::test]
async fn test_odd_record_shapes_still_load() -> Result<()> {
    let server = MockServer::start();
    let collections = [
        ("/dozenten/", serde_json::json!([])),
        ("/raeume/", serde_json::json!([])),
        ("/teilnehmer/", serde_json::json!([{"id": 1, "name": "Anna Becker"}])),
        (
            "/kurse/",
            serde_json::json!([{"id": 1, "titel": 2024, "preis": "60.00", "startdatum": "2026-10-01"}]),
        ),
        (
            "/anmeldungen/",
            serde_json::json!([
                {"id": 1, "teilnehmer": "/api/teilnehmer/1/", "kurs": "/api/kurse/1/", "anmeldedatum": "2026-10-02", "bezahlt": true},
                {"id": 2, "teilnehmer": false, "kurs": {}, "anmeldedatum": "2026-10-03", "bezahlt": false}
            ]),
        ),
    ];
    for (path, body) in collections {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body.clone());
        });
    }

    let source = HttpDataSource::new(&server.base_url(), Endpoints::default())?;
    let dashboard = Dashboard::load(&source).await;

    assert_eq!(dashboard.state(), LoadState::Ready);
    assert_eq!(dashboard.data().anmeldungen.len(), 2);

    let engine = DashboardEngine::new(source, options(), OutputFormat::Json);
    let view: serde_json::Value = serde_json::from_str(&engine.run().await?)?;

    assert_eq!(view["payments"]["revenue"], "60.00");
    let recent = view["recent_registrations"].as_array().unwrap();
    assert_eq!(recent[0]["participant"], "—");
    assert_eq!(recent[0]["course"], "—");
    assert_eq!(recent[1]["participant"], "Anna Becker");
    assert_eq!(recent[1]["course"], "2024");

    Ok(())
}
