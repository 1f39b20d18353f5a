//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("proofread");
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dump-text"))
        .stdout(predicate::str::contains("--ignore-words"));
}

#[test]
fn test_cli_requires_source() {
    let home = TempDir::new().unwrap();
    cmd(&home).assert().failure();
}

#[test]
fn test_cli_completions() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("proofread"));
}

#[test]
fn test_cli_completions_every_shell() {
    for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
        let home = TempDir::new().unwrap();
        cmd(&home)
            .args(["--completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("proofread"));
    }
}

#[test]
fn test_cli_missing_source() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_cli_invalid_log_level() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["--log-level", "loud", "post.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_cli_missing_config_file() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["--config", "/nonexistent/proofread.yaml", "post.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));
}

#[cfg(unix)]
mod with_fake_blogc {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// A stand-in for blogc that prints `html` for CONTENT and `title` for TITLE.
    fn fake_blogc(dir: &Path, title: Option<&str>, html_fixture: &str) -> PathBuf {
        let html_path = fs::canonicalize(get_fixture_path(html_fixture)).unwrap();
        let mut script = String::from("#!/bin/sh\ncase \"$1\" in\n  -v) echo 'blogc 0.20.1'; exit 0;;\nesac\ncase \"$2\" in\n");
        script.push_str(&format!("  CONTENT) cat '{}'; exit 0;;\n", html_path.display()));
        if let Some(title) = title {
            script.push_str(&format!("  TITLE) echo '{}'; exit 0;;\n", title));
        }
        script.push_str("esac\nexit 78\n");

        let path = dir.join("blogc");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn source(dir: &Path) -> PathBuf {
        let path = dir.join("post.txt");
        fs::write(&path, "TITLE: A post\n----------\nText.\n").unwrap();
        path
    }

    /// Answers a single HTTP request with `body` and hands back the request.
    fn serve_once(body: &'static str) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 8192];
            loop {
                let n = socket.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    const RESPONSE: &str = r#"{"software":{"name":"LanguageTool","version":"6.4"},"matches":[
        {"message":"Possible spelling mistake found.","sentence":"The source is rendered by blogc, reduced to text and sent to LanguageTool.",
         "rule":{"id":"MORFOLOGIK_RULE_EN_US","description":"Possible spelling mistake","issueType":"misspelling","category":{"id":"TYPOS","name":"Possible Typo"}},
         "context":{"text":"...source is rendered by blogc, reduced to text...","offset":25,"length":5},"replacements":[{"value":"blog"}]},
        {"message":"Use a comma.","sentence":"Before publishing, it is worth running the prose through a grammar checker.",
         "rule":{"id":"COMMA_RULE","description":"Comma","issueType":"typographical","category":{"id":"PUNCTUATION","name":"Punctuation"}},
         "context":{"text":"Before publishing it is worth","offset":7,"length":10},"replacements":[]}
    ]}"#;

    #[test]
    fn test_cli_dump_html() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), Some("A post"), "post.html");

        cmd(&home)
            .args(["--blogc", blogc.to_str().unwrap(), "--dump-html"])
            .arg(source(home.path()))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<h1>A post</h1>\n<h1>Checking prose"));
    }

    #[test]
    fn test_cli_dump_text() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), None, "post.html");
        let expected = fs::read_to_string(get_fixture_path("post.txt")).unwrap();

        cmd(&home)
            .args(["--blogc", blogc.to_str().unwrap(), "-t"])
            .arg(source(home.path()))
            .assert()
            .success()
            .stdout(format!("{}\n", expected));
    }

    #[test]
    fn test_cli_dump_text_from_settings() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), Some("A post"), "unicode.html");
        fs::write(
            home.path().join(".proofread.yaml"),
            format!("blogc: {}\ndump-text: true\n", blogc.display()),
        )
        .unwrap();

        cmd(&home)
            .arg(source(home.path()))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("A post\n\nCafé culture\n\n"));
    }

    #[test]
    fn test_cli_unknown_settings_key() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".proofread.yaml"), "langauge: en-US\n").unwrap();

        cmd(&home)
            .arg(source(home.path()))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration error"));
    }

    #[test]
    fn test_cli_comment_in_content_fails() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), None, "with_comment.html");

        cmd(&home)
            .args(["--blogc", blogc.to_str().unwrap(), "--dump-text"])
            .arg(source(home.path()))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to convert HTML to text"))
            .stderr(predicate::str::contains("Unexpected node type"));
    }

    #[test]
    fn test_cli_verbose() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), None, "post.html");

        cmd(&home)
            .args(["--blogc", blogc.to_str().unwrap(), "-v", "-t"])
            .arg(source(home.path()))
            .assert()
            .success()
            .stderr(predicate::str::contains("Proofread"))
            .stderr(predicate::str::contains(blogc.display().to_string()))
            .stderr(predicate::str::contains("Converting HTML to text"));
    }

    #[test]
    fn test_cli_check_text_report() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), None, "post.html");
        let (api_url, server) = serve_once(RESPONSE);

        cmd(&home)
            .args(["--blogc", blogc.to_str().unwrap(), "--api-url", &api_url, "-l", "en-GB", "-r", "A,B"])
            .args(["-v", "--timeout", "12"])
            .arg(source(home.path()))
            .assert()
            .success()
            .stderr(predicate::str::contains(format!("Checking grammar with {}", api_url)))
            .stderr(predicate::str::contains("12s"))
            .stdout(predicate::str::contains("Rule: MORFOLOGIK_RULE_EN_US: Possible spelling mistake"))
            .stdout(predicate::str::contains("Rule: COMMA_RULE: Comma"))
            .stdout(predicate::str::contains(&"-".repeat(80)));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /v2/check"));
        assert!(request.contains("language=en-GB"));
        assert!(request.contains("disabledRules=A%2CB"));
    }

    #[test]
    fn test_cli_check_ignored_words_json() {
        let home = TempDir::new().unwrap();
        let blogc = fake_blogc(home.path(), None, "post.html");
        let (api_url, server) = serve_once(RESPONSE);

        let output = cmd(&home)
            .args(["--blogc", blogc.to_str().unwrap(), "--api-url", &api_url, "-i", "blogc", "-f", "json"])
            .arg(source(home.path()))
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        server.join().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["findings"][0]["rule"]["id"], "COMMA_RULE");
    }
}
