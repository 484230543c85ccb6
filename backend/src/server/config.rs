//! Application settings loaded via OrthoConfig.
//!
//! Values come from `RELIEF_*` environment variables, configuration files and
//! command-line flags, in increasing order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Server, store and bootstrap-admin settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RELIEF")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    #[ortho_config(default = DEFAULT_HOST)]
    pub host: IpAddr,
    /// Port to bind; defaults to 8080.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Email of the administrator created at startup when missing.
    pub admin_email: Option<String>,
    /// Password for that administrator.
    pub admin_password: Option<String>,
    /// Display name for that administrator.
    pub admin_name: Option<String>,
}

/// Credentials for the bootstrap administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminBootstrap {
    /// Login email, trimmed.
    pub email: String,
    /// Plaintext password; only its digest is stored.
    pub password: String,
    /// Display name, `Administrator` unless configured.
    pub full_name: String,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Bootstrap administrator, when both email and password are set.
    pub fn admin(&self) -> Option<AdminBootstrap> {
        let email = self.admin_email.as_deref()?.trim();
        let password = self.admin_password.as_deref()?;
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some(AdminBootstrap {
            email: email.to_owned(),
            password: password.to_owned(),
            full_name: self
                .admin_name
                .clone()
                .unwrap_or_else(|| "Administrator".to_owned()),
        })
    }
}
