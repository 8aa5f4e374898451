use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::config::Config;

pub struct AppState {
    pub config: Config,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("HTTP client misconfigured!");

        Arc::new(Self { config, http })
    }
}
