use crate::{ApiSettings, LoggingSettings, RawSettings, SecretSettings};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::net::SocketAddr;
use street_imagery::SelectorConfig;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub imagery: SelectorConfig,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        Self {
            logging: LoggingSettings {
                level: raw.logging.level.to_lowercase(),
            },
            api: raw.api,
            secrets: raw.secrets,
            imagery: raw.imagery,
        }
    }
}

impl AppSettings {
    /// Logs settings that load fine but will degrade selection. Call once
    /// tracing is installed. Returns whether everything looked right.
    pub fn report_problems(&self) -> bool {
        let mut ok = self.imagery.validate();
        if self.secrets.imagery_token.is_empty() {
            warn!("No imagery token configured, image searches will be rejected");
            ok = false;
        }
        ok
    }
}

impl ApiSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .wrap_err_with(|| format!("Invalid api host {:?}", self.host))
    }
}
