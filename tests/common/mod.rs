//! Shared fixtures: archive builders and a mock GitHub.

#![allow(dead_code)]

use gh_release_plugins::{Arch, Installer, Platform, Plugin, Registry, Settings};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REPO: &str = "owner/tool";
pub const TAG: &str = "v1.0.0";
pub const VERSION: &str = "1.0.0";
pub const BINARY: &[u8] = b"#!/bin/sh\necho tool 1.0.0\n";

/// A mock GitHub plus a temp directory holding the install root and scratch parent.
pub struct Fixture {
    pub server: MockServer,
    pub dir: TempDir,
}

impl Fixture {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings::default()
            .with_api_url(self.server.uri())
            .with_github_url(self.server.uri())
            .with_scratch_dir(self.scratch())
    }

    /// An installer over just `plugins`, pinned to linux/x86_64.
    pub fn installer(&self, plugins: Vec<Plugin>) -> Installer {
        let mut registry = Registry::new();
        for plugin in plugins {
            registry.register(plugin);
        }
        Installer::new(self.settings())
            .with_registry(registry)
            .with_host(Platform::Linux, Arch::X86_64)
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    pub fn scratch(&self) -> PathBuf {
        self.dir.path().join("scratch")
    }

    /// True when no scratch directory survived.
    pub fn scratch_is_clean(&self) -> bool {
        match std::fs::read_dir(self.scratch()) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        }
    }

    /// Serve `body` as release asset `name` of `REPO@TAG`.
    pub async fn asset(&self, name: &str, body: Vec<u8>) {
        self.serve(&format!("/{}/releases/download/{}/{}", REPO, TAG, name), body)
            .await;
    }

    pub async fn serve(&self, url_path: &str, body: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(url_path.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&self.server)
            .await;
    }

    pub async fn releases(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/releases", REPO)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

pub fn tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, name, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

pub fn zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn gz(content: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap()
}

#[cfg(unix)]
pub fn mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}
