use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct LiftEntry {
    id: String,
    date: String,
    exercise: String,
    top_weight: f64,
    top_reps: u32,
    set_count: u32,
    personal_record: bool,
}

#[derive(Debug, Deserialize)]
struct LiftList {
    entries: Vec<LiftEntry>,
}

#[derive(Debug, Deserialize)]
struct Routine {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Routines {
    routines: Vec<Routine>,
    active_id: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("gymlog_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/status")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_gymlog"))
        .env("PORT", port.to_string())
        .env("GYMLOG_DATA_DIR", data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn record_lift(
    client: &Client,
    base: &str,
    exercise: &str,
    date: &str,
    weight: f64,
    reps: u32,
) -> LiftEntry {
    client
        .post(format!("{base}/api/lifts"))
        .json(&serde_json::json!({
            "exercise": exercise,
            "date": date,
            "sets": [{ "weight": weight, "reps": reps }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_personal_record_sequence() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first = record_lift(&client, &server.base_url, "Test Press A", "2026-01-05", 100.0, 5).await;
    assert!(first.personal_record);
    assert_eq!(first.top_weight, 100.0);
    assert_eq!(first.top_reps, 5);

    let second = record_lift(&client, &server.base_url, "Test Press A", "2026-01-07", 95.0, 8).await;
    assert!(!second.personal_record);

    let third = record_lift(&client, &server.base_url, "Test Press A", "2026-01-09", 105.0, 3).await;
    assert!(third.personal_record);
}

#[tokio::test]
async fn http_top_set_prefers_heaviest_first() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let entry: LiftEntry = client
        .post(format!("{}/api/lifts", server.base_url))
        .json(&serde_json::json!({
            "exercise": "Test Row B",
            "date": "2026-01-06",
            "sets": [
                { "weight": 100.0, "reps": 5 },
                { "weight": 95.0, "reps": 8 },
                { "weight": 100.0, "reps": 3 },
                { "weight": 0.0, "reps": 10 }
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(entry.top_weight, 100.0);
    assert_eq!(entry.top_reps, 5);
    assert_eq!(entry.set_count, 3);
}

#[tokio::test]
async fn http_rejects_lifts_without_valid_sets() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/lifts", server.base_url))
        .json(&serde_json::json!({
            "exercise": "Test Curl C",
            "sets": [{ "weight": 0.0, "reps": 10 }, { "weight": 50.0, "reps": 0 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let list: LiftList = client
        .get(format!("{}/api/lifts?exercise=Test%20Curl%20C", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.entries.is_empty());
}

#[tokio::test]
async fn http_deleting_a_record_promotes_later_entries_in_views() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let record = record_lift(&client, &server.base_url, "Test Pull D", "2026-01-02", 200.0, 3).await;
    let later = record_lift(&client, &server.base_url, "Test Pull D", "2026-01-08", 190.0, 5).await;
    assert!(!later.personal_record);

    let response = client
        .delete(format!("{}/api/lifts/{}", server.base_url, record.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let list: LiftList = client
        .get(format!("{}/api/lifts?exercise=Test%20Pull%20D", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.entries.len(), 1);
    assert!(list.entries[0].personal_record);
}

#[tokio::test]
async fn http_last_routine_cannot_be_deleted() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let routines: Routines = client
        .get(format!("{}/api/routines", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    if routines.routines.len() == 1 {
        let response = client
            .delete(format!("{}/api/routines/{}", server.base_url, routines.routines[0].id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    let created: Routine = client
        .post(format!("{}/api/routines", server.base_url))
        .json(&serde_json::json!({ "name": "Temp Split", "template": "full-body" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created.name, "Temp Split");

    let response = client
        .delete(format!("{}/api/routines/{}", server.base_url, created.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after: Routines = client
        .get(format!("{}/api/routines", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!after.routines.iter().any(|r| r.id == created.id));
    assert!(after.routines.iter().any(|r| r.id == after.active_id));
}

#[tokio::test]
async fn http_import_rejects_malformed_documents() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    record_lift(&client, &server.base_url, "Test Squat E", "2026-01-03", 225.0, 5).await;

    let before = client
        .get(format!("{}/api/lifts", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let mut doc: serde_json::Value = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    doc["lifts"] = serde_json::json!(42);

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .json(&doc)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let after = client
        .get(format!("{}/api/lifts", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn http_export_import_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    record_lift(&client, &server.base_url, "Test Dip F", "2026-01-04", 45.0, 10).await;

    let doc: serde_json::Value = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(doc["bwLogs"].is_array());
    assert!(doc["proteinMap"].is_object());

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .json(&doc)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let list: LiftList = client
        .get(format!("{}/api/lifts?exercise=Test%20Dip%20F", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.entries.len(), 1);
    assert_eq!(list.entries[0].exercise, "Test Dip F");
}

#[tokio::test]
async fn http_bodyweight_replaces_same_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for weight in [183.0, 181.4] {
        let response = client
            .post(format!("{}/api/bodyweight", server.base_url))
            .json(&serde_json::json!({ "date": "2026-01-06", "weight": weight }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let data: serde_json::Value = client
        .get(format!("{}/api/bodyweight", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let on_date: Vec<&serde_json::Value> = data["entries"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|entry| entry["date"] == "2026-01-06")
        .collect();
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0]["weight"], 181.4);
}

#[tokio::test]
async fn http_protein_and_today_views() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let saved: serde_json::Value = client
        .post(format!("{}/api/protein", server.base_url))
        .json(&serde_json::json!({
            "morning": 40.0, "lunch": 55.0, "pre": 25.0, "dinner": 60.0, "bed": 30.0
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["total"], 210.0);

    let today: serde_json::Value = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(today["protein_total"], 210.0);
    assert!(today["focus"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(!today["date"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn http_exercise_catalog_includes_custom_names() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let names: serde_json::Value = client
        .post(format!("{}/api/exercises", server.base_url))
        .json(&serde_json::json!({ "name": "Test  Landmine Press" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let list = names["names"].as_array().unwrap();
    assert!(list.iter().any(|n| n == "Test Landmine Press"));
    assert!(list.iter().any(|n| n == "Cable Crunch"));
}
