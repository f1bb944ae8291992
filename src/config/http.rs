use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

/// Where and how the HTTP server listens.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Http {
  /// **Environment variables**:
  /// - `AGORA_HTTP_IP`
  pub ip: IpAddr,
  /// **Environment variables**:
  /// - `AGORA_HTTP_PORT`
  pub port: u16,
  /// Amount of actix-web workers. Defaults to the amount
  /// of available CPU cores.
  ///
  /// **Environment variables**:
  /// - `AGORA_HTTP_WORKERS`
  pub workers: usize,
}

impl Default for Http {
  fn default() -> Self {
    Self {
      ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 8080,
      workers: std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1),
    }
  }
}
