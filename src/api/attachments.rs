use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use url::Url;

use crate::error::{SdkError, SdkResult};

use super::client::ApiClient;
use super::http::HttpClient;
use super::models::AttachmentInput;
use super::validate;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttachmentPayload {
    pub content: String,
    #[serde(rename = "Type")]
    pub mime_type: String,
    pub filename: String,
    pub disposition: &'static str,
    pub content_id: String,
}

pub(crate) fn check(input: &AttachmentInput) -> SdkResult<()> {
    if input.path.is_empty() {
        return Err(SdkError::validation("Attachment path is required"));
    }
    if input.mime_type.is_empty() {
        return Err(SdkError::validation("Attachment type is required"));
    }
    Ok(())
}

pub(crate) async fn resolve<C: HttpClient>(
    client: &ApiClient<C>,
    input: &AttachmentInput,
) -> SdkResult<AttachmentPayload> {
    check(input)?;

    let (data, filename) = match validate::parse_remote_url(&input.path) {
        Some(url) => {
            let filename = remote_filename(&url);
            (read_remote(client, url).await?, filename)
        }
        None => (read_local(&input.path)?, local_filename(&input.path)),
    };

    Ok(AttachmentPayload {
        content: STANDARD.encode(data),
        mime_type: input.mime_type.clone(),
        filename,
        disposition: "attachment",
        content_id: content_id(&input.path),
    })
}

async fn read_remote<C: HttpClient>(client: &ApiClient<C>, url: Url) -> SdkResult<Vec<u8>> {
    tracing::debug!(%url, "fetching remote attachment");
    let response = client
        .fetch(url.clone())
        .await
        .map_err(|err| SdkError::Other(format!("error fetching remote file: {url}: {err}")))?;

    if !response.is_success() {
        return Err(SdkError::Other(format!(
            "error fetching remote file: {url} (status {})",
            response.status
        )));
    }

    Ok(response.body)
}

fn read_local(raw: &str) -> SdkResult<Vec<u8>> {
    for candidate in local_candidates(raw) {
        if !candidate.is_file() {
            continue;
        }
        // Unreadable candidates fall through to the next variation.
        let Ok(mut file) = File::open(&candidate) else {
            continue;
        };

        tracing::debug!(path = %candidate.display(), "reading local attachment");
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(|err| {
            SdkError::Other(format!(
                "error reading attachment {}: {err}",
                candidate.display()
            ))
        })?;
        return Ok(data);
    }

    Err(SdkError::Other(format!("attachment file not found: {raw}")))
}

/// The path as given, its canonical form, then relative to the working directory.
fn local_candidates(raw: &str) -> Vec<PathBuf> {
    let path = PathBuf::from(raw);
    let mut candidates = vec![path.clone()];

    if let Ok(canonical) = fs::canonicalize(&path) {
        candidates.push(canonical);
    }
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join(&path));
    }

    candidates
}

fn local_filename(raw: &str) -> String {
    Path::new(raw)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn remote_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
        .map(ToOwned::to_owned)
        .or_else(|| url.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| url.to_string())
}

fn content_id(path: &str) -> String {
    crc32fast::hash(path.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_path_segment() {
        assert_eq!(local_filename("docs/reports/q1.pdf"), "q1.pdf");
        assert_eq!(local_filename("q1.pdf"), "q1.pdf");

        let url = Url::parse("https://placehold.co/600x400.png?text=hi").expect("url");
        assert_eq!(remote_filename(&url), "600x400.png");

        let url = Url::parse("https://cdn.example.test/files/").expect("url");
        assert_eq!(remote_filename(&url), "files");
    }

    #[test]
    fn content_id_is_deterministic_crc32() {
        assert_eq!(content_id("a.txt"), content_id("a.txt"));
        assert_ne!(content_id("a.txt"), content_id("b.txt"));
        // crc32("The quick brown fox jumps over the lazy dog")
        assert_eq!(
            content_id("The quick brown fox jumps over the lazy dog"),
            "1095738169"
        );
    }

    #[test]
    fn reads_existing_local_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("note.txt");
        fs::write(&path, b"hello attachment").expect("write fixture");

        let data = read_local(path.to_str().expect("utf8 path")).expect("read");
        assert_eq!(data, b"hello attachment");
    }

    #[test]
    fn missing_local_file_is_reported() {
        let error = read_local("definitely/not/here.txt").expect_err("missing file");
        assert!(error.message().starts_with("attachment file not found"));
    }

    #[test]
    fn directories_are_not_attachments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = read_local(dir.path().to_str().expect("utf8 path")).expect_err("directory");
        assert!(error.message().contains("not found"));
    }

    #[test]
    fn candidates_end_with_working_directory_fallback() {
        let cwd = env::current_dir().expect("cwd");
        let candidates = local_candidates("reports/q1.pdf");

        assert_eq!(candidates.first(), Some(&PathBuf::from("reports/q1.pdf")));
        assert_eq!(candidates.last(), Some(&cwd.join("reports/q1.pdf")));
    }

    #[test]
    fn reads_path_relative_to_working_directory() {
        use std::io::Write;

        let cwd = env::current_dir().expect("cwd");
        let mut file = tempfile::Builder::new()
            .prefix("attachment-")
            .suffix(".txt")
            .tempfile_in(&cwd)
            .expect("fixture in cwd");
        file.write_all(b"relative bytes").expect("write fixture");

        let name = file
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .expect("utf8 name");
        assert_eq!(read_local(name).expect("read"), b"relative bytes");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_falls_through_to_not_found() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("locked.txt");
        fs::write(&path, b"secret").expect("write fixture");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Privileged users can open it anyway; nothing to check then.
        if File::open(&path).is_ok() {
            return;
        }

        let error = read_local(path.to_str().expect("utf8 path")).expect_err("unreadable");
        assert_eq!(error.kind(), crate::error::ErrorKind::Other);
        assert!(error.message().starts_with("attachment file not found"));
    }
}
