use fs_err as fs;
use serde_json::{json, to_string_pretty};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::provider::{Completion, ProviderError, Task};

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: PathBuf,
    pub response: PathBuf,
}

/// Writes each model exchange to `<root>/.neurosong/tx/<id>/`.
#[derive(Debug, Clone)]
pub struct Transcripts {
    root: PathBuf,
}

fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".neurosong").join("tx").join(tx.to_string())
}

impl Transcripts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn save(
        &self,
        stage: &str,
        tx: Uuid,
        req: &Completion,
        outcome: &Result<String, ProviderError>,
    ) -> anyhow::Result<SavedPaths> {
        let dir = tx_dir(&self.root, tx);
        fs::create_dir_all(&dir)?;

        let task = match &req.task {
            Task::Verse { length, vibe } => json!({ "kind": "verse", "length": length, "vibe": vibe }),
            Task::Topic => json!({ "kind": "topic" }),
        };
        let request = json!({
            "stage": stage,
            "timestamp": chrono::Utc::now(),
            "max_tokens": req.max_tokens,
            "temperature": req.temperature,
            "task": task,
            "prompt": req.prompt,
        });
        let response = match outcome {
            Ok(content) => json!({ "ok": true, "content": content }),
            Err(e) => json!({ "ok": false, "error": e.to_string() }),
        };

        let request_path = dir.join(format!("{stage}.request.json"));
        fs::write(&request_path, to_string_pretty(&request)?)?;
        let response_path = dir.join(format!("{stage}.response.json"));
        fs::write(&response_path, to_string_pretty(&response)?)?;

        Ok(SavedPaths { dir, request: request_path, response: response_path })
    }
}
