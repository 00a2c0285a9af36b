//! Data models for the TeraBox share-list API and the relay's own responses.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::url_parser::ShareLink;

/// Response body of the remote `share/list` endpoint.
#[derive(Debug, Deserialize)]
pub struct ShareListResponse {
    #[serde(default)]
    pub errno: i64,
    #[serde(default)]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub list: Vec<RemoteFile>,
    #[serde(default)]
    pub shareid: Option<u64>,
    #[serde(default)]
    pub uk: Option<u64>,
}

/// One entry of the remote file list, as the remote encodes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    #[serde(default)]
    pub server_filename: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_u64")]
    pub size: u64,
    #[serde(default)]
    pub fs_id: Option<serde_json::Value>,
    #[serde(default)]
    pub path: String,
    #[serde(default, deserialize_with = "deserialize_lenient_u64")]
    pub isdir: u64,
    #[serde(default)]
    pub category: i64,
    #[serde(default)]
    pub dlink: Option<String>,
    #[serde(default)]
    pub thumbs: Option<Thumbs>,
}

/// Thumbnail variants attached to image/video records.
#[derive(Debug, Clone, Deserialize)]
pub struct Thumbs {
    #[serde(default)]
    pub url3: Option<String>,
}

/// The remote encodes numeric fields as either numbers or numeric strings
/// depending on endpoint version; accept both.
fn deserialize_lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Ok(n),
        Some(Raw::Str(s)) => s.parse().map_err(serde::de::Error::custom),
        None => Ok(0),
    }
}

/// Normalized projection of one shared file or directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub size: u64,
    pub fs_id: Option<serde_json::Value>,
    pub path: String,
    pub isdir: bool,
    pub category: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<RemoteFile> for FileRecord {
    fn from(file: RemoteFile) -> Self {
        Self {
            filename: file
                .server_filename
                .unwrap_or_else(|| "Unknown".to_string()),
            size: file.size,
            fs_id: file.fs_id,
            path: file.path,
            isdir: file.isdir != 0,
            category: file.category,
            download_link: file.dlink,
            // Third-tier variant; the remote omits the others' quality tiers
            // for most file categories.
            thumbnail: file.thumbs.map(|t| t.url3.unwrap_or_default()),
        }
    }
}

/// Share-level metadata echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareInfo {
    pub shareid: Option<u64>,
    pub uk: Option<u64>,
}

/// Successful `/api/download` payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub surl: String,
    pub original_url: String,
    pub files: Vec<FileRecord>,
    pub share_info: ShareInfo,
    pub message: String,
}

impl DownloadResponse {
    /// Normalize a remote listing into the relay's output shape.
    ///
    /// File ordering follows the remote response; nothing is re-sorted.
    pub fn from_listing(link: &ShareLink, response: ShareListResponse) -> Self {
        let files: Vec<FileRecord> = response.list.into_iter().map(FileRecord::from).collect();
        let message = format!("Successfully extracted {} file(s)", files.len());

        Self {
            success: true,
            surl: link.surl.clone(),
            original_url: link.raw_url.clone(),
            files,
            share_info: ShareInfo {
                shareid: response.shareid,
                uk: response.uk,
            },
            message,
        }
    }
}

/// Failure payload shared by every error branch.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            errno: None,
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(error)
        }
    }
}

impl From<&RelayError> for ErrorResponse {
    fn from(err: &RelayError) -> Self {
        Self {
            errno: err.errno(),
            ..Self::new(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_file_deserialize() {
        let json = r#"{
            "server_filename": "video.mp4",
            "size": 1048576,
            "fs_id": 123456789,
            "path": "/video.mp4",
            "isdir": 0,
            "category": 1,
            "thumbs": {"url3": "https://thumb.example/u3.jpg"}
        }"#;

        let file: RemoteFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.server_filename.as_deref(), Some("video.mp4"));
        assert_eq!(file.size, 1048576);
        assert_eq!(file.isdir, 0);
        assert_eq!(file.thumbs.unwrap().url3.as_deref(), Some("https://thumb.example/u3.jpg"));
    }

    #[test]
    fn test_remote_file_stringified_numbers() {
        let json = r#"{"server_filename": "a.txt", "size": "2048", "isdir": "1"}"#;

        let file: RemoteFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.size, 2048);
        assert_eq!(file.isdir, 1);
    }

    #[test]
    fn test_file_record_mapping() {
        let remote = RemoteFile {
            server_filename: None,
            size: 42,
            fs_id: Some(serde_json::json!(987)),
            path: "/dir".to_string(),
            isdir: 1,
            category: 6,
            dlink: None,
            thumbs: None,
        };

        let record = FileRecord::from(remote);
        assert_eq!(record.filename, "Unknown");
        assert!(record.isdir);
        assert!(record.download_link.is_none());
        assert!(record.thumbnail.is_none());
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let record = FileRecord {
            filename: "a.txt".to_string(),
            size: 1,
            fs_id: None,
            path: "/a.txt".to_string(),
            isdir: false,
            category: 4,
            download_link: None,
            thumbnail: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("download_link").is_none());
        assert!(value.get("thumbnail").is_none());
        // fs_id is always present, null when the remote omitted it
        assert!(value.get("fs_id").is_some());
    }

    #[test]
    fn test_error_response_from_relay_error() {
        let err = RelayError::RemoteApi {
            errno: -9,
            message: "share expired".to_string(),
        };

        let body = ErrorResponse::from(&err);
        assert!(!body.success);
        assert_eq!(body.error, "TeraBox API error: share expired");
        assert_eq!(body.errno, Some(-9));

        let body = ErrorResponse::from(&RelayError::EmptyShare);
        assert_eq!(body.error, "No files found in the shared link");
        assert!(body.errno.is_none());
    }
}
