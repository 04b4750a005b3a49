//! Integration tests for the interactive session
//!
//! A scripted prompt replays operator answers in order, the remote service is
//! a wiremock server, and the export archive lives in a temporary directory.

use firecrawl_explorer::archive::{ContentType, ExportCategory, ExportContent, ExportMetadata};
use firecrawl_explorer::config::{load_config, ApiConfig, ArchiveConfig, Config, PollingConfig};
use firecrawl_explorer::session::{InputClosed, Prompt, PromptResult, Session};
use indicatif::ProgressBar;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Main menu positions
const SCRAPE: usize = 0;
const CRAWL: usize = 1;
const MAP: usize = 2;
const MANAGE_EXPORTS: usize = 3;
const SETTINGS: usize = 4;
const HELP: usize = 5;
const QUIT: usize = 6;

#[derive(Debug)]
enum Answer {
    Choice(usize),
    Text(String),
    Confirm(bool),
}

fn text(s: impl Into<String>) -> Answer {
    Answer::Text(s.into())
}

/// Replays scripted answers; runs out of input like a closed terminal
#[derive(Default)]
struct ScriptedPrompt {
    answers: RefCell<VecDeque<Answer>>,
    output: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            ..Self::default()
        }
    }

    fn next(&self) -> Option<Answer> {
        self.answers.borrow_mut().pop_front()
    }

    fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn saw(&self, needle: &str) -> bool {
        self.output.borrow().iter().any(|line| line.contains(needle))
    }

    fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn select(&self, prompt: &str, items: &[String], _default: usize) -> PromptResult<usize> {
        match self.next() {
            Some(Answer::Choice(index)) => {
                assert!(index < items.len(), "'{}' has no item {}", prompt, index);
                Ok(index)
            }
            Some(other) => panic!("'{}' expected a choice, script has {:?}", prompt, other),
            None => Err(InputClosed),
        }
    }

    fn input(&self, prompt: &str, default: &str) -> PromptResult<String> {
        match self.next() {
            Some(Answer::Text(answer)) if answer.is_empty() => Ok(default.to_string()),
            Some(Answer::Text(answer)) => Ok(answer),
            Some(other) => panic!("'{}' expected text, script has {:?}", prompt, other),
            None => Err(InputClosed),
        }
    }

    fn secret(&self, prompt: &str) -> PromptResult<String> {
        match self.next() {
            Some(Answer::Text(answer)) => Ok(answer),
            Some(other) => panic!("'{}' expected a secret, script has {:?}", prompt, other),
            None => Err(InputClosed),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> PromptResult<bool> {
        match self.next() {
            Some(Answer::Confirm(answer)) => Ok(answer),
            Some(other) => panic!("'{}' expected a confirmation, script has {:?}", prompt, other),
            None => Err(InputClosed),
        }
    }

    fn pause(&self) -> PromptResult<()> {
        Ok(())
    }

    fn heading(&self, text: &str) {
        self.output.borrow_mut().push(text.to_string());
    }

    fn info(&self, text: &str) {
        self.output.borrow_mut().push(text.to_string());
    }

    fn success(&self, text: &str) {
        self.output.borrow_mut().push(text.to_string());
    }

    fn warn(&self, text: &str) {
        self.output.borrow_mut().push(text.to_string());
    }

    fn error(&self, text: &str) {
        self.errors.borrow_mut().push(text.to_string());
    }

    fn panel(&self, title: &str, body: &str) {
        self.output.borrow_mut().push(format!("{}\n{}", title, body));
    }

    fn table(&self, title: &str, _headers: &[&str], rows: &[Vec<String>]) {
        let mut out = self.output.borrow_mut();
        out.push(title.to_string());
        out.extend(rows.iter().map(|row| row.join(" | ")));
    }

    fn progress(&self, _label: &str, _total: Option<u64>) -> ProgressBar {
        ProgressBar::hidden()
    }
}

fn test_config(server: &MockServer, archive: &TempDir, max_attempts: u32) -> Config {
    Config {
        api: ApiConfig {
            base_url: server.uri(),
            api_key: Some("fc-test".to_string()),
            timeout_secs: 5,
        },
        archive: ArchiveConfig {
            root: archive.path().to_path_buf(),
        },
        polling: PollingConfig {
            interval_secs: 0,
            max_attempts,
        },
    }
}

async fn run_session(
    server: &MockServer,
    archive: &TempDir,
    answers: Vec<Answer>,
) -> Session<ScriptedPrompt> {
    let config = test_config(server, archive, 5);
    let mut session = Session::new(config, ScriptedPrompt::new(answers)).unwrap();
    session.run().await;
    session
}

#[tokio::test]
async fn test_scrape_and_save_with_metadata() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(body_json(json!({
            "url": "https://example.com/report",
            "formats": ["markdown"],
            "onlyMainContent": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "markdown": "# Quarterly report",
                "metadata": {"title": "Report", "description": null}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = run_session(
        &server,
        &archive,
        vec![
            Answer::Choice(SCRAPE),
            text("https://example.com/report"),
            Answer::Choice(0), // markdown
            Answer::Confirm(true),
            Answer::Confirm(true), // save
            Answer::Choice(0),     // scrapes
            text("report"),
            Answer::Confirm(true),
            text("Q3 numbers"),
            text("research, finance"),
            Answer::Choice(QUIT),
        ],
    )
    .await;

    let prompt = session.prompt();
    assert!(prompt.errors().is_empty(), "{:?}", prompt.errors());
    assert_eq!(prompt.remaining(), 0);
    assert!(prompt.saw("# Quarterly report"));
    assert!(prompt.saw("title | Report"));
    assert!(prompt.saw("Thank you for using Firecrawl Explorer!"));

    let saved = archive.path().join("scrapes").join("report.md");
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "# Quarterly report");

    let records = session
        .archive()
        .search(Some(ExportCategory::Scrapes), "FINANCE")
        .unwrap();
    assert_eq!(records.len(), 1);
    let metadata = records[0].metadata.as_ref().unwrap();
    assert_eq!(metadata.description, "Q3 numbers");
    assert_eq!(
        metadata.source_url.as_deref(),
        Some("https://example.com/report")
    );
    assert_eq!(metadata.format, Some(ContentType::Markdown));
}

#[tokio::test]
async fn test_crawl_polls_until_complete_and_saves() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .and(body_json(json!({
            "url": "https://example.com",
            "maxDepth": 2,
            "limit": 5,
            "includePaths": ["/blog/*"],
            "scrapeOptions": {"formats": ["markdown"], "onlyMainContent": true}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "crawl-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/crawl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "scraping"})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/crawl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [
                {"markdown": "hello", "metadata": {"sourceURL": "https://example.com/blog/a"}},
                {"metadata": {}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = run_session(
        &server,
        &archive,
        vec![
            Answer::Choice(CRAWL),
            text("https://example.com"),
            text(""),        // exclude
            text("/blog/*"), // include
            text(""),        // depth keeps 2
            text("5"),
            Answer::Confirm(true),
            Answer::Choice(1), // crawls
            text("site"),
            Answer::Confirm(false),
            Answer::Choice(QUIT),
        ],
    )
    .await;

    let prompt = session.prompt();
    assert!(prompt.errors().is_empty(), "{:?}", prompt.errors());
    assert!(prompt.saw("Crawl initiated with ID: crawl-1"));
    assert!(prompt.saw("https://example.com/blog/a | Success | 5"));
    assert!(prompt.saw("Unknown | Success | 0"));

    let saved = archive.path().join("crawls").join("site.json");
    let body: Value = serde_json::from_str(&std::fs::read_to_string(saved).unwrap()).unwrap();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_crawl_timeout_is_reported_and_session_continues() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "slow"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "scraping"})))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server, &archive, 3);
    let answers = vec![
        Answer::Choice(CRAWL),
        text("https://example.com"),
        text(""),
        text(""),
        text(""),
        text(""),
        Answer::Choice(HELP),
        Answer::Choice(QUIT),
    ];
    let mut session = Session::new(config, ScriptedPrompt::new(answers)).unwrap();
    session.run().await;

    let prompt = session.prompt();
    let errors = prompt.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("slow"), "{}", errors[0]);
    assert!(prompt.saw("Help"));
    assert_eq!(prompt.remaining(), 0);
}

#[tokio::test]
async fn test_map_saves_link_summary() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .and(body_json(json!({
            "url": "https://example.com",
            "search": "docs",
            "includeSubdomains": true,
            "limit": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://example.com/docs", "https://docs.example.com/"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = run_session(
        &server,
        &archive,
        vec![
            Answer::Choice(MAP),
            text("https://example.com"),
            text("docs"),
            Answer::Confirm(true),
            text(""),
            Answer::Confirm(true),
            Answer::Choice(2), // maps
            text("links"),
            Answer::Confirm(true),
            text("docs links"),
            text(""),
            Answer::Choice(QUIT),
        ],
    )
    .await;

    let prompt = session.prompt();
    assert!(prompt.errors().is_empty(), "{:?}", prompt.errors());
    assert!(prompt.saw("Total links found: 2"));

    let saved = archive.path().join("maps").join("links.json");
    let body: Value = serde_json::from_str(&std::fs::read_to_string(saved).unwrap()).unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["export_metadata"]["description"], "docs links");
    assert!(!archive.path().join("maps").join("links.meta.json").exists());
}

#[tokio::test]
async fn test_remote_error_is_reported_without_saving() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let session = run_session(
        &server,
        &archive,
        vec![
            Answer::Choice(SCRAPE),
            text(""), // default test URL
            Answer::Choice(0),
            Answer::Confirm(false),
            Answer::Choice(QUIT),
        ],
    )
    .await;

    let prompt = session.prompt();
    let errors = prompt.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("500"), "{}", errors[0]);
    assert!(errors[0].contains("boom"), "{}", errors[0]);
    assert!(prompt.saw("Thank you for using Firecrawl Explorer!"));
    assert!(session.archive().list(None).unwrap().is_empty());
}

#[tokio::test]
async fn test_json_scrape_without_json_field_warns() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"markdown": "# only markdown"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = run_session(
        &server,
        &archive,
        vec![
            Answer::Choice(SCRAPE),
            text("https://example.com"),
            Answer::Choice(3), // json
            Answer::Confirm(true),
            Answer::Confirm(false),
            Answer::Choice(QUIT),
        ],
    )
    .await;

    let prompt = session.prompt();
    assert!(prompt.errors().is_empty(), "{:?}", prompt.errors());
    assert!(prompt.saw("No json content returned"));
    assert!(prompt.saw("Scrape Results for https://example.com\n{}"));
}

#[tokio::test]
async fn test_invalid_input_is_reported() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    let session = run_session(
        &server,
        &archive,
        vec![
            Answer::Choice(SCRAPE),
            text("ftp://example.com"),
            Answer::Choice(CRAWL),
            text("https://example.com"),
            text(""),
            text(""),
            text("deep"),
            Answer::Choice(QUIT),
        ],
    )
    .await;

    let errors = session.prompt().errors();
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(errors[0].contains("ftp://example.com"));
    assert!(errors[1].contains("deep"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_input_ends_session() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    // Input ends in the middle of the scrape prompts
    let session = run_session(
        &server,
        &archive,
        vec![Answer::Choice(SCRAPE), text("https://example.com")],
    )
    .await;

    let prompt = session.prompt();
    assert!(prompt.errors().is_empty());
    assert!(!prompt.saw("Thank you"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_manage_exports_search_and_view() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    let config = test_config(&server, &archive, 5);
    let answers = vec![
        Answer::Choice(MANAGE_EXPORTS),
        Answer::Choice(1), // search
        Answer::Choice(0), // all categories
        text("alpha"),
        Answer::Choice(0), // the only match
        Answer::Choice(0), // view
        Answer::Choice(1), // search again
        Answer::Choice(2), // crawls
        text("alpha"),
        Answer::Choice(2), // back
        Answer::Choice(QUIT),
    ];
    let mut session = Session::new(config, ScriptedPrompt::new(answers)).unwrap();

    let metadata = ExportMetadata::new("alpha notes", vec!["alpha".to_string()], None);
    let alpha = session
        .archive()
        .save(
            ExportCategory::Docs,
            "alpha.md",
            &ExportContent::from("alpha body"),
            ContentType::Markdown,
            Some(&metadata),
        )
        .unwrap();
    session
        .archive()
        .save(
            ExportCategory::Docs,
            "beta.md",
            &ExportContent::from("beta body"),
            ContentType::Markdown,
            None,
        )
        .unwrap();

    session.run().await;
    let prompt = session.prompt();
    assert!(prompt.errors().is_empty(), "{:?}", prompt.errors());
    assert!(prompt.saw("alpha.md\nalpha body"));
    assert!(prompt.saw("No exports found"));
    assert!(alpha.exists());
}

#[tokio::test]
async fn test_manage_exports_delete_removes_sidecar() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    let config = test_config(&server, &archive, 5);
    let answers = vec![
        Answer::Choice(MANAGE_EXPORTS),
        Answer::Choice(0), // browse
        Answer::Choice(4), // docs
        Answer::Choice(0),
        Answer::Choice(1), // delete
        Answer::Confirm(true),
        Answer::Choice(2), // back
        Answer::Choice(QUIT),
    ];
    let mut session = Session::new(config, ScriptedPrompt::new(answers)).unwrap();

    let metadata = ExportMetadata::new("to remove", Vec::new(), None);
    let path = session
        .archive()
        .save(
            ExportCategory::Docs,
            "gone.txt",
            &ExportContent::from("bye"),
            ContentType::Text,
            Some(&metadata),
        )
        .unwrap();

    session.run().await;

    let prompt = session.prompt();
    assert!(prompt.errors().is_empty(), "{:?}", prompt.errors());
    assert!(prompt.saw("Deleted metadata"));
    assert!(!path.exists());
    assert!(!archive.path().join("docs").join("gone.meta.json").exists());
    assert!(session.archive().list(None).unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_update_is_written_back() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();
    let new_root = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("explorer.toml");

    let config = test_config(&server, &archive, 5);
    let answers = vec![
        Answer::Choice(SETTINGS),
        Answer::Confirm(true),
        text("http://firecrawl.internal:3002/"),
        text("-"), // clear the key
        text(new_root.path().display().to_string()),
        Answer::Confirm(true),
        Answer::Choice(QUIT),
    ];
    let mut session = Session::new(config, ScriptedPrompt::new(answers))
        .unwrap()
        .with_config_path(&config_path);
    session.run().await;

    assert!(session.prompt().errors().is_empty());
    assert_eq!(session.config().api.base_url, "http://firecrawl.internal:3002");
    assert_eq!(session.config().api.api_key, None);
    assert_eq!(session.archive().root(), new_root.path());
    assert!(new_root.path().join("custom").is_dir());

    let written = load_config(&config_path).unwrap();
    assert_eq!(&written, session.config());
}

#[tokio::test]
async fn test_settings_rejects_bad_url() {
    let server = MockServer::start().await;
    let archive = TempDir::new().unwrap();

    let answers = vec![
        Answer::Choice(SETTINGS),
        Answer::Confirm(true),
        text("localhost:3002"),
        Answer::Choice(QUIT),
    ];
    let config = test_config(&server, &archive, 5);
    let mut session = Session::new(config.clone(), ScriptedPrompt::new(answers)).unwrap();
    session.run().await;

    assert_eq!(session.prompt().errors().len(), 1);
    assert_eq!(session.config(), &config);
}
