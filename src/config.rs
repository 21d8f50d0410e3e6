//! Server configuration, constructed once at startup from the
//! environment and passed explicitly into the handler.

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BINARY: &str = "amass";

/// Runtime configuration for the MCP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port for the HTTP listener. `PORT` env var, default 8000.
    pub port: u16,
    /// Name or path of the amass binary. `AMASS_BIN` env var override
    /// for deployments where amass is not on PATH.
    pub binary: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok()),
            binary: std::env::var("AMASS_BIN").unwrap_or_else(|_| DEFAULT_BINARY.to_string()),
        }
    }
}

fn parse_port(value: Option<String>) -> u16 {
    match value {
        None => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid PORT value '{}', falling back to {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset() {
        assert_eq!(parse_port(None), 8000);
    }

    #[test]
    fn port_parses_override() {
        assert_eq!(parse_port(Some("9090".to_string())), 9090);
    }

    #[test]
    fn port_falls_back_on_garbage() {
        assert_eq!(parse_port(Some("not-a-port".to_string())), 8000);
    }
}
