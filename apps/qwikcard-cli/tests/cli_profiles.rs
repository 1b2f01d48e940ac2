use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("qwikcard").expect("binary");
    cmd.env_remove("QWIKCARD_CONFIG")
        .env_remove("QWIKCARD_API_URL")
        .env_remove("QWIKCARD_PUBLIC_ORIGIN")
        .env_remove("QWIKCARD_LOG_ROLL");
    cmd
}

#[test]
fn create_submits_and_saves_png() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/create-profile").json_body(json!({
            "name": "Ada",
            "fields": [
                {"type": "phone", "value": "+1 555-0100"},
                {"type": "github", "value": "octocat"}
            ]
        }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"profile_id": "Xy12Ab"}));
    });
    let out = tempdir().expect("tmpdir");

    bin()
        .arg("--api-base")
        .arg(server.base_url())
        .arg("--public-origin")
        .arg("https://qwik.example")
        .arg("create")
        .arg("--name")
        .arg("Ada")
        .arg("--field")
        .arg("phone=+1 555-0100")
        .arg("--field")
        .arg("github=octocat")
        .arg("--out-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("https://qwik.example/profile/Xy12Ab"));

    mock.assert();
    let png = std::fs::read(out.path().join("Ada.png")).expect("png written");
    assert_eq!(png[..8], PNG_SIGNATURE);
}

#[test]
fn create_without_name_makes_no_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/create-profile");
        then.status(200).json_body(json!({"profile_id": "never"}));
    });

    bin()
        .arg("--api-base")
        .arg(server.base_url())
        .arg("create")
        .arg("--field")
        .arg("email=ada@example.com")
        .arg("--no-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("a name is required"));

    assert_eq!(mock.hits(), 0);
}

#[test]
fn create_reports_server_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/create-profile");
        then.status(500);
    });

    bin()
        .arg("--api-base")
        .arg(server.base_url())
        .arg("create")
        .arg("--name")
        .arg("Ada")
        .arg("--no-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create profile."));
}

#[test]
fn show_prints_action_links() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/profile/Xy12Ab");
        then.status(200).json_body(json!({
            "name": "Ada",
            "fields": [
                {"type": "phone", "value": "+1 555-0100"},
                {"type": "website", "value": "example.com"}
            ]
        }));
    });
    let vcard = format!("{}/api/profile/Xy12Ab/vcard", server.base_url());

    bin()
        .env("QWIKCARD_API_URL", server.base_url())
        .arg("show")
        .arg("Xy12Ab")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat on WhatsApp -> https://wa.me/15550100"))
        .stdout(predicate::str::contains(vcard))
        .stdout(predicate::str::contains("Visit Website -> https://example.com"));
}

#[test]
fn show_unknown_profile_fails_with_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/profile/missing");
        then.status(404).json_body(json!({"detail": "Profile not found"}));
    });

    bin()
        .arg("--api-base")
        .arg(server.base_url())
        .arg("show")
        .arg("missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Profile not found! This QR code may be invalid.",
        ));
}
