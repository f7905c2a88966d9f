
use std::time::Duration;

use guilted_ai::Provider;

use crate::config::Config;

fn test_config() -> Config {
    Config {
        port: 4001,
        host: "127.0.0.1".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
        provider: Provider::OpenAI,
        api_key: Some("sk-test".to_string()),
        model: None,
        ai_base_url: None,
        ai_timeout: Duration::from_secs(5),
        idea_count: 3,
        prompts_dir: None,
        server_url: "http://localhost:4001".to_string(),
    }
}
