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
#[serde(rename_all = "camelCase")]
struct Nutrition {
    protein: u32,
    carbs: u32,
    fats: u32,
    fiber: u32,
    vitamin_c: u32,
    iron: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyRecord {
    date: String,
    tiredness: u32,
    steps: u32,
    calories_consumed: u32,
    calories_burned: u32,
    nutrition: Nutrition,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "chair_monitor_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_chair_monitor"))
        .env("PORT", port.to_string())
        .env("MONITOR_DATA_PATH", data_path)
        // keep the background step ticker out of the way of assertions
        .env("STEP_TICK_SECS", "3600")
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

async fn today(client: &Client, server: &TestServer) -> DailyRecord {
    client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_week_is_seven_days_ending_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let week: Vec<DailyRecord> = client
        .get(format!("{}/api/week", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let today = today(&client, &server).await;

    assert_eq!(week.len(), 7);
    assert_eq!(week.last().unwrap().date, today.date);
    assert!(week.windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[tokio::test]
async fn http_patch_then_read_back() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let date = today(&client, &server).await.date;
    let response = client
        .patch(format!("{}/api/days/{date}", server.base_url))
        .json(&serde_json::json!({ "steps": 9999, "tiredness": 8 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let written: DailyRecord = response.json().await.unwrap();

    let read = today(&client, &server).await;
    assert_eq!(read.steps, 9999);
    assert_eq!(read.tiredness, 8);
    assert_eq!(read.calories_consumed, written.calories_consumed);
    assert_eq!(read.calories_burned, written.calories_burned);
}

#[tokio::test]
async fn http_step_tick_stays_under_cap() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let date = today(&client, &server).await.date;
    client
        .patch(format!("{}/api/days/{date}", server.base_url))
        .json(&serde_json::json!({ "steps": 11950 }))
        .send()
        .await
        .unwrap();

    let after: DailyRecord = client
        .post(format!("{}/api/steps/tick", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(after.steps >= 12000 - 50 && after.steps <= 12000);
}

#[tokio::test]
async fn http_meals_never_exceed_one_hundred() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for meal in ["breakfast", "lunch", "dinner", "lunch", "dinner"] {
        let response = client
            .post(format!("{}/api/meals", server.base_url))
            .json(&serde_json::json!({ "meal": meal }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let n = today(&client, &server).await.nutrition;
    for value in [n.protein, n.carbs, n.fats, n.fiber, n.vitamin_c, n.iron] {
        assert!(value <= 100);
    }
    assert_eq!(n.protein, 100);

    let rejected = client
        .post(format!("{}/api/meals", server.base_url))
        .json(&serde_json::json!({ "meal": "snack" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
}
