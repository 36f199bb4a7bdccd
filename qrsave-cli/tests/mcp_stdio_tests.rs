//! End-to-end tests of `qrsave serve` over stdio

use assert_cmd::prelude::*;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

struct McpClient {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl McpClient {
    fn start(log_file: &std::path::Path) -> Self {
        let mut child = Command::cargo_bin("qrsave")
            .unwrap()
            .arg("serve")
            .arg("--log-file")
            .arg(log_file)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start MCP server");

        let stdin = child.stdin.take();
        let stdout = BufReader::new(child.stdout.take().unwrap());
        Self {
            child,
            stdin,
            stdout,
        }
    }

    fn send(&mut self, message: Value) {
        let stdin = self.stdin.as_mut().unwrap();
        writeln!(stdin, "{message}").unwrap();
        stdin.flush().unwrap();
    }

    fn receive(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).unwrap();
        serde_json::from_str(&line).unwrap_or_else(|e| panic!("bad response {line:?}: {e}"))
    }

    fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        self.send(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}));
        let response = self.receive();
        assert_eq!(response["id"], json!(id));
        response
    }

    fn handshake(&mut self) -> Value {
        let response = self.request(
            1,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "1.0.0"}
            }),
        );
        self.send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
        response
    }

    fn close(mut self) -> std::process::ExitStatus {
        drop(self.stdin.take());
        self.child.wait().unwrap()
    }
}

#[test]
fn test_mcp_handshake_and_tool_listing() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("mcp.log");
    let mut client = McpClient::start(&log_file);

    let init = client.handshake();
    assert_eq!(init["result"]["serverInfo"]["name"], "qrsave");
    assert!(init["result"]["capabilities"]["tools"].is_object());

    let listing = client.request(2, "tools/list", json!({}));
    let names: Vec<&str> = listing["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "generate_and_save_qrcode",
            "batch_generate_qrcodes",
            "list_generated_qrcodes"
        ]
    );

    assert!(client.close().success());
    assert!(log_file.exists());
}

#[test]
fn test_mcp_generate_returns_text_and_preview() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let mut client = McpClient::start(&temp_dir.path().join("mcp.log"));
    client.handshake();

    let response = client.request(
        2,
        "tools/call",
        json!({
            "name": "generate_and_save_qrcode",
            "arguments": {"content": "over stdio", "output_directory": out, "filename": "stdio"}
        }),
    );
    let result = &response["result"];
    assert_eq!(result["isError"], json!(false));
    assert_eq!(result["content"][0]["type"], "text");
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("✅ QR Code Generated and Saved Successfully!"));
    assert_eq!(result["content"][1]["type"], "image");
    assert_eq!(result["content"][1]["mimeType"], "image/png");
    assert!(out.join("stdio.png").exists());

    assert!(client.close().success());
}

#[test]
fn test_mcp_tool_errors_are_results() {
    let temp_dir = TempDir::new().unwrap();
    let mut client = McpClient::start(&temp_dir.path().join("mcp.log"));
    client.handshake();

    let response = client.request(
        2,
        "tools/call",
        json!({"name": "batch_generate_qrcodes", "arguments": {"qr_codes": []}}),
    );
    assert_eq!(response["result"]["isError"], json!(true));
    assert_eq!(
        response["result"]["content"][0]["text"],
        "Error: No QR codes specified"
    );

    let response = client.request(
        3,
        "tools/call",
        json!({"name": "make_qrcode", "arguments": {}}),
    );
    assert!(response["error"].is_object());
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("make_qrcode"));

    assert!(client.close().success());
}
