use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlightSearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for FlightSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_SERPAPI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_PLACES_BASE_URL.to_string(),
        }
    }
}

/// Everything the server needs, resolved once at startup and handed to the
/// service constructors.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub flights: FlightSearchConfig,
    pub places: PlacesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            gemini: GeminiConfig::default(),
            flights: FlightSearchConfig::default(),
            places: PlacesConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| PORT.to_string())
            .parse()
            .unwrap_or(PORT);

        Self {
            host,
            port,
            gemini: GeminiConfig {
                api_key: non_blank_var("GEMINI_API_KEY"),
                model: non_blank_var("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: non_blank_var("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            },
            flights: FlightSearchConfig {
                api_key: non_blank_var("SERPAPI_KEY"),
                base_url: non_blank_var("SERPAPI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_SERPAPI_BASE_URL.to_string()),
            },
            places: PlacesConfig {
                api_key: non_blank_var("GOOGLE_PLACES_API_KEY"),
                base_url: non_blank_var("GOOGLE_PLACES_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            },
        }
    }
}

// An exported-but-empty key counts as unset.
fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
