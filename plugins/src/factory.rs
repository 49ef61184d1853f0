use std::sync::Arc;

use anyhow::Result;

use adp_core::api::{AdpServiceConfig, AdpTransport, AppConfig, BlockingSession, Session};

use crate::transport::HttpTransport;

pub fn build_transport(cfg: &AdpServiceConfig) -> Result<Arc<dyn AdpTransport>> {
    Ok(Arc::new(HttpTransport::new(cfg)?))
}

pub fn build_session(cfg: &AppConfig) -> Result<Session> {
    let transport = build_transport(&cfg.adp)?;
    if cfg.adp.username.trim().is_empty() {
        tracing::warn!(target: "adp.factory", "no ADP username configured");
    }
    Ok(Session::new(
        transport,
        cfg.adp.username.clone(),
        cfg.adp.password.clone(),
    ))
}

pub fn build_blocking_session(cfg: &AppConfig) -> Result<BlockingSession> {
    Ok(BlockingSession::new(build_session(cfg)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adp_core::api::{AUTH_PASSWORD_HEADER, AUTH_USERNAME_HEADER};

    #[test]
    fn session_carries_configured_credentials() {
        let mut cfg = AppConfig::default();
        cfg.adp.username = "svc".into();
        cfg.adp.password = "pw".into();
        let session = build_session(&cfg).unwrap();
        assert_eq!(session.base_headers()[AUTH_USERNAME_HEADER], "svc");
        assert_eq!(session.base_headers()[AUTH_PASSWORD_HEADER], "pw");
    }

    #[test]
    fn blocking_session_builds_outside_a_runtime() {
        let session = build_blocking_session(&AppConfig::default()).unwrap();
        assert!(format!("{session:?}").contains("Session"));
    }
}
