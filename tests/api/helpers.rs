use std::{path::PathBuf, sync::LazyLock};

use signature_recipients::{
    configuration::{Settings, get_configuration},
    domain::{AppData, DirectoryUser},
    startup::Application,
    store_client::StoreClient,
    telemetry::{get_subscriber, init_subscriber},
};
use uuid::Uuid;

// Ensure that the `tracing` stack is only initialised once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // Set `TEST_LOG=true` to see the logs of a failing test.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub data_path: PathBuf,
    pub api_client: reqwest::Client,
    /// The settings the app was built with, with the store client pointed
    /// at the spawned app.
    pub configuration: Settings,
}

impl TestApp {
    pub async fn get_data(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/data", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_reasons(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/reasons", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// `reason` must already be percent-encoded.
    pub async fn delete_reason(&self, reason: &str) -> reqwest::Response {
        self.api_client
            .delete(&format!("{}/reasons/{}", &self.address, reason))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn store_client(&self) -> StoreClient {
        self.configuration
            .store_client
            .client()
            .expect("Failed to build the store client.")
    }

    pub fn saved_data(&self) -> AppData {
        let bytes = std::fs::read(&self.data_path).expect("Failed to read the data file.");
        serde_json::from_slice(&bytes).expect("Failed to parse the data file.")
    }

    pub fn overwrite_data_file(&self, contents: &[u8]) {
        std::fs::write(&self.data_path, contents).expect("Failed to write the data file.");
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        std::fs::remove_file(&self.data_path).ok();
    }
}

pub fn seed_data() -> AppData {
    AppData {
        users: vec![
            DirectoryUser::new("John Doe", "john.doe@example.com"),
            DirectoryUser::new("Charlie Brown", "charlie.b@example.com"),
            DirectoryUser::new("Charlie Brown", "charlie.brown2@different.com"),
        ],
        signature_reasons: vec!["Approval".into(), "Review".into()],
        other_reasons: vec!["Audit".into()],
    }
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    // Every test gets its own data file.
    let data_path =
        std::env::temp_dir().join(format!("signature-recipients-{}.json", Uuid::new_v4()));
    std::fs::write(
        &data_path,
        serde_json::to_vec_pretty(&seed_data()).expect("Failed to serialize seed data."),
    )
    .expect("Failed to seed the data file.");

    let mut configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.store.data_path = data_path.clone();
        c
    };

    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());
    configuration.store_client.base_url = address.clone();

    TestApp {
        address,
        data_path,
        api_client: reqwest::Client::new(),
        configuration,
    }
}
