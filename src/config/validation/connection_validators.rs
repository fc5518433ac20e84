//! Connection configuration validators
//!
//! Validation implementations for ClientConfig, ClusterConfig and
//! CollectionConfig.

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

fn validate_tcp_addr(addr: &str) -> Result<(), String> {
    if addr.is_empty() {
        return Err("Redis address cannot be empty".to_string());
    }
    if addr.chars().any(char::is_whitespace) {
        return Err(format!("Redis address contains whitespace: {:?}", addr));
    }
    let (host, port) = split_host_port(addr)?;
    if host.is_empty() {
        return Err(format!("Redis address has no host: {}", addr));
    }
    if port.is_some_and(|port| port.parse::<u16>().is_err()) {
        return Err(format!("Redis address has an invalid port: {}", addr));
    }
    Ok(())
}

/// Split `host[:port]`; bracketed IPv6 hosts keep their colons
fn split_host_port(addr: &str) -> Result<(&str, Option<&str>), String> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| format!("Redis address has an unclosed '[': {}", addr))?;
        if tail.is_empty() {
            return Ok((host, None));
        }
        return match tail.strip_prefix(':') {
            Some(port) => Ok((host, Some(port))),
            None => Err(format!("Redis address has an invalid port: {}", addr)),
        };
    }
    Ok(match addr.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (addr, None),
    })
}

fn validate_timeouts(dial: u64, read: u64, write: u64) -> Result<(), String> {
    if dial == 0 {
        return Err("Dial timeout must be greater than 0".to_string());
    }
    if read == 0 || write == 0 {
        return Err("Read and write timeouts must be greater than 0".to_string());
    }
    Ok(())
}

fn validate_prefix(prefix: &str) -> Result<(), String> {
    if prefix.chars().any(char::is_whitespace) {
        return Err(format!("Key prefix contains whitespace: {:?}", prefix));
    }
    Ok(())
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating client configuration");

        match self.network {
            Network::Tcp => validate_tcp_addr(&self.addr)?,
            Network::Unix => {
                if self.addr.is_empty() {
                    return Err("Unix socket path cannot be empty".to_string());
                }
                if self.tls.is_some() {
                    return Err("TLS is not supported over unix sockets".to_string());
                }
            }
        }

        if self.db < 0 {
            return Err(format!("Database index must not be negative: {}", self.db));
        }

        if self.pool_size == 0 {
            return Err("Pool size must be greater than 0".to_string());
        }

        if self.pool_size > 1000 {
            return Err("Pool size should not exceed 1000".to_string());
        }

        if self.connect_attempts == 0 {
            return Err("Connect attempts must be greater than 0".to_string());
        }

        validate_timeouts(self.dial_timeout_ms, self.read_timeout_ms, self.write_timeout_ms)?;
        validate_prefix(&self.prefix)
    }
}

impl Validate for ClusterConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating cluster configuration");

        if self.addrs.is_empty() {
            return Err("Cluster requires at least one seed address".to_string());
        }

        for addr in &self.addrs {
            validate_tcp_addr(addr)?;
        }

        validate_timeouts(self.dial_timeout_ms, self.read_timeout_ms, self.write_timeout_ms)?;
        validate_prefix(&self.prefix)
    }
}

impl Validate for CollectionConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating collection configuration");

        if self.dbs.is_empty() {
            return Err("Collection requires at least one database".to_string());
        }

        let mut seen = HashSet::new();
        for db in &self.dbs {
            if !seen.insert(db.db) {
                return Err(format!("Database {} is configured more than once", db.db));
            }
        }

        for client in self.client_configs() {
            client.validate()?;
        }

        Ok(())
    }
}
