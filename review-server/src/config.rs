use crate::error::ServerError;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub documents_dir: PathBuf,
    pub seed_documents: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            documents_dir: PathBuf::from("documents"),
            seed_documents: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let defaults = Self::default();

        let bind_addr = match lookup("REVIEW_BIND_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| ServerError::Config(format!("REVIEW_BIND_ADDR '{raw}': {e}")))?,
            None => defaults.bind_addr,
        };
        let documents_dir = lookup("REVIEW_DOCUMENTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.documents_dir);
        let seed_documents = match lookup("REVIEW_SEED_DOCUMENTS") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ServerError::Config(format!(
                        "REVIEW_SEED_DOCUMENTS must be a boolean, got '{other}'"
                    )))
                }
            },
            None => defaults.seed_documents,
        };

        Ok(Self {
            bind_addr,
            documents_dir,
            seed_documents,
        })
    }
}
