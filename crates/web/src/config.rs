use std::env;

pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Reads `PORT`. `None` when it is missing or not a valid port number.
    pub fn from_env() -> Option<Self> {
        let port: u16 = env::var("PORT").ok()?.parse().ok()?;
        Some(Self::new(port))
    }
}
