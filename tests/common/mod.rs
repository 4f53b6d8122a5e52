#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub site: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let site = make_fixture_site(tmp.path());

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            site,
            cargo_home,
            rustup_home,
        }
    }

    /// Runs from the site root so the default `content/site.json` resolves.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("copydesk");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("RUST_LOG")
            .current_dir(&self.site);
        cmd
    }

    pub fn content_path(&self) -> PathBuf {
        self.site.join("content/site.json")
    }

    pub fn content(&self) -> Value {
        let raw = fs::read_to_string(self.content_path()).expect("read content");
        serde_json::from_str(&raw).expect("content is json")
    }

    pub fn raw_content(&self) -> String {
        fs::read_to_string(self.content_path()).expect("read content")
    }

    pub fn write_config(&self, toml: &str) {
        let dir = self.home.join(".config/copydesk");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.toml"), toml).expect("write config");
    }

    pub fn audit_lines(&self) -> Vec<Value> {
        let path = self.home.join(".config/copydesk/audit.jsonl");
        match fs::read_to_string(path) {
            Ok(raw) => raw
                .lines()
                .map(|l| serde_json::from_str(l).expect("audit line is json"))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn fixture_document() -> Value {
    serde_json::json!({
        "meta": {
            "siteTitle": "JM AI Consulting",
            "consultant": "Jose Martinez",
            "email": "jose@example.com",
            "siteDescription": "Practical AI advisory for small firms."
        },
        "nav": [
            {"label": "Home", "href": "/"},
            {"label": "About", "href": "/about/"}
        ],
        "home": {
            "headline": "Hi there",
            "subheadline": "We help you use AI.\nNo hype."
        },
        "about": {"bio": "Jose has ten years of experience."},
        "contact": {"email": "hello@example.com", "blurb": "Drop us a line."}
    })
}

fn make_fixture_site(base: &Path) -> PathBuf {
    let site = base.join("site");
    fs::create_dir_all(site.join("content")).expect("create content dir");
    let mut text =
        serde_json::to_string_pretty(&fixture_document()).expect("serialize fixture");
    text.push('\n');
    fs::write(site.join("content/site.json"), text).expect("write fixture content");
    site
}

/// Answers a single chat request with `content` as the assistant message.
/// The join handle yields the request body that was received.
pub fn serve_chat_once(content: &str) -> (String, JoinHandle<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake ollama");
    let url = format!(
        "http://{}/api/chat",
        listener.local_addr().expect("local addr")
    );
    let body = serde_json::json!({
        "model": "fake",
        "message": {"role": "assistant", "content": content},
        "done": true
    })
    .to_string();

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content length");
                }
            }
        }
        let mut request = vec![0u8; content_length];
        reader.read_exact(&mut request).expect("read body");

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .expect("write response");
        stream.flush().expect("flush response");
        serde_json::from_slice(&request).expect("request is json")
    });

    (url, handle)
}
