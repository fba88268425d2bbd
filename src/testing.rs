//! Test helpers: a mock HTTP server and fake external programs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mockito::{Mock, Server, ServerGuard};
use reqwest::blocking::Client;

/// A running mock server and the routes registered on it.
///
/// Routes stay registered for as long as this value lives. Paths without a
/// route get mockito's 501.
pub struct StubServer {
    server: ServerGuard,
    _routes: Vec<Mock>,
}

impl StubServer {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:1234`.
    pub fn url(&self) -> String {
        self.server.url()
    }
}

/// Answer `HEAD` and `GET` for each `(path, body)` with 200.
pub fn serve(routes: &[(&str, &str)]) -> StubServer {
    let mut server = Server::new();
    let mut mocks = Vec::with_capacity(routes.len() * 2);
    for (path, body) in routes {
        mocks.push(server.mock("HEAD", *path).with_status(200).create());
        mocks.push(
            server
                .mock("GET", *path)
                .with_status(200)
                .with_header("content-type", "text/plain")
                .with_body(*body)
                .create(),
        );
    }
    StubServer {
        server,
        _routes: mocks,
    }
}

/// A client that never goes through a proxy, for talking to [`serve`].
pub fn loopback_client() -> Client {
    Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("loopback client")
}

/// Write an executable shell script called `name` into `dir`.
#[cfg(unix)]
pub fn fake_program(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).expect("write script");
    let mut permissions = std::fs::metadata(&path).expect("metadata").permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("chmod");
    path
}
