use std::env;
use tracing::warn;

pub const DEFAULT_CLINIC_NAME: &str = "MMU Dispensary";
pub const DEFAULT_CLINIC_BANNER_URL: &str = "http://localhost:3000/gifs/mmu.gif";
pub const DEFAULT_ADMIN_PATH: &str = "/admin";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub appointment_collection_id: String,
    pub clinic_name: String,
    pub clinic_banner_url: String,
    pub revalidate_url: Option<String>,
    pub revalidate_secret: Option<String>,
    pub admin_path: String,
    pub port: u16,
}

fn required(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using empty value", name);
        String::new()
    })
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using default", name);
        default.to_string()
    })
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("PORT '{}' is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            backend_endpoint: required("BACKEND_ENDPOINT")
                .trim_end_matches('/')
                .to_string(),
            project_id: required("PROJECT_ID"),
            api_key: required("API_KEY"),
            database_id: required("DATABASE_ID"),
            appointment_collection_id: required("APPOINTMENT_COLLECTION_ID"),
            clinic_name: with_default("CLINIC_NAME", DEFAULT_CLINIC_NAME),
            clinic_banner_url: with_default("CLINIC_BANNER_URL", DEFAULT_CLINIC_BANNER_URL),
            revalidate_url: optional("REVALIDATE_URL"),
            revalidate_secret: optional("REVALIDATE_SECRET"),
            admin_path: env::var("ADMIN_PATH").unwrap_or_else(|_| DEFAULT_ADMIN_PATH.to_string()),
            port,
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        if config.revalidate_url.is_none() {
            warn!("REVALIDATE_URL not set, page revalidation will only be logged");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_endpoint.is_empty()
            && !self.project_id.is_empty()
            && !self.api_key.is_empty()
            && !self.database_id.is_empty()
            && !self.appointment_collection_id.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_endpoint: String::new(),
            project_id: String::new(),
            api_key: String::new(),
            database_id: String::new(),
            appointment_collection_id: String::new(),
            clinic_name: DEFAULT_CLINIC_NAME.to_string(),
            clinic_banner_url: DEFAULT_CLINIC_BANNER_URL.to_string(),
            revalidate_url: None,
            revalidate_secret: None,
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
