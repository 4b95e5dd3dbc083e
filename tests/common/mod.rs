//! Shared cassette builders for integration tests.

#![allow(dead_code)]

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use serde_json::{json, Value};

use tapsite::cassette::format::{Cassette, Interaction};
use tapsite::config::SiteConfig;

pub const REPO: &str = "repos/acme/homebrew-tap";

/// Builds a cassette of `github.get` interactions in request order.
#[derive(Default)]
pub struct Script {
    interactions: Vec<Interaction>,
}

impl Script {
    pub fn ok(mut self, resource: &str, body: Value) -> Self {
        self.push(resource, json!({ "Ok": body }));
        self
    }

    pub fn err(mut self, resource: &str, error: Value) -> Self {
        self.push(resource, json!({ "Err": error }));
        self
    }

    fn push(&mut self, resource: &str, output: Value) {
        self.interactions.push(Interaction {
            seq: self.interactions.len() as u64,
            port: "github".into(),
            method: "get".into(),
            input: json!({ "resource": format!("{REPO}/{resource}") }),
            output,
        });
    }

    pub fn cassette(self) -> Cassette {
        Cassette {
            name: "generate-site".into(),
            recorded_at: Utc::now(),
            repository: "acme/homebrew-tap".into(),
            interactions: self.interactions,
        }
    }
}

pub fn entry(dir: &str, name: &str) -> Value {
    json!({ "name": name, "path": format!("{dir}/{name}"), "type": "file" })
}

pub fn content(text: &str) -> Value {
    // GitHub wraps base64 bodies; the newline must be ignored.
    let encoded = STANDARD.encode(text);
    let (head, tail) = encoded.split_at(encoded.len() / 2);
    json!({ "content": format!("{head}\n{tail}"), "encoding": "base64" })
}

pub fn signature(name: &str, date: &str) -> Value {
    json!({ "name": name, "date": date })
}

pub fn commit_item(sha: &str, message: &str, author: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "html_url": format!("https://github.com/acme/homebrew-tap/commit/{sha}"),
        "commit": {
            "message": message,
            "author": signature(author, date),
            "committer": signature("GitHub", date),
        },
    })
}

pub fn commit_detail(sha: &str, date: &str, files: Value) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": "update",
            "author": signature("Ann", date),
            "committer": signature("GitHub", date),
        },
        "files": files,
    })
}

pub fn not_found(resource: &str) -> Value {
    json!({ "kind": "not_found", "resource": format!("{REPO}/{resource}") })
}

pub fn config(out: &Path) -> SiteConfig {
    SiteConfig::new("acme", "homebrew-tap").with_output_dir(out)
}

/// One formula added on 2024-01-01 and modified on 2024-06-01; no casks.
pub fn foo_script() -> Script {
    Script::default()
        .ok("contents/Formula", json!([entry("Formula", "foo.rb")]))
        .err("contents/Casks", not_found("contents/Casks"))
        .ok(
            "commits?per_page=100",
            json!([
                commit_item("b2", "foo: bump", "Ann", "2024-06-01T12:00:00Z"),
                commit_item("a1", "foo: add", "Ann", "2024-01-01T12:00:00Z"),
            ]),
        )
        .ok(
            "commits/a1",
            commit_detail(
                "a1",
                "2024-01-01T12:00:00Z",
                json!([{ "filename": "Formula/foo.rb", "status": "added" }]),
            ),
        )
        .ok(
            "commits/b2",
            commit_detail(
                "b2",
                "2024-06-01T12:00:00Z",
                json!([{ "filename": "Formula/foo.rb", "status": "modified" }]),
            ),
        )
        .ok("contents/Formula/foo.rb", content("class Foo < Formula\n  desc \"Foo tool\"\nend\n"))
        .ok(
            "commits?path=Formula%2Ffoo.rb&per_page=10",
            json!([
                commit_item("b2", "foo: bump", "Ann", "2024-06-01T12:00:00Z"),
                commit_item("a1", "foo: add", "Ann", "2024-01-01T12:00:00Z"),
            ]),
        )
}
