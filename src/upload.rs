use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::Field;
use uuid::Uuid;

use crate::database::models::complaint::Attachment;
use crate::error::AppError;

/// 单文件大小上限 10MB
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// 上传类别决定存放目录与允许的扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Complaints,
    Documents,
    Gallery,
}

impl UploadKind {
    pub fn dir(self) -> &'static str {
        match self {
            UploadKind::Complaints => "complaints",
            UploadKind::Documents => "documents",
            UploadKind::Gallery => "gallery",
        }
    }

    pub fn allows_extension(self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        match self {
            UploadKind::Documents => matches!(
                extension.as_str(),
                "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt"
            ),
            UploadKind::Complaints | UploadKind::Gallery => {
                matches!(extension.as_str(), "jpeg" | "jpg" | "png" | "gif" | "webp")
            }
        }
    }

    fn rejection_message(self) -> &'static str {
        match self {
            UploadKind::Documents => "Invalid document type. Only PDF, DOC, XLS, PPT files allowed.",
            UploadKind::Complaints | UploadKind::Gallery => {
                "Invalid image type. Only JPEG, PNG, GIF, WebP files allowed."
            }
        }
    }
}

/// 已写入磁盘的上传文件
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub size: i64,
    pub mime_type: Option<String>,
}

impl StoredFile {
    pub fn into_attachment(self) -> Attachment {
        Attachment {
            filename: self.filename,
            original_name: self.original_name,
            path: self.path,
            size: self.size,
        }
    }
}

/// 已读入内存、尚未落盘的上传文件。字段校验全部通过前不写磁盘，
/// 校验失败时不会留下孤儿文件
#[derive(Debug)]
pub struct PendingFile {
    pub original_name: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

impl PendingFile {
    pub async fn read(field: Field<'_>) -> Result<Self, AppError> {
        let original_name = field.file_name().unwrap_or("file").to_string();
        let mime_type = field.content_type().map(|mime| mime.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::Validation("Failed to read uploaded file".to_string()))?;

        Ok(Self {
            original_name,
            mime_type,
            data,
        })
    }

    pub async fn store(self, kind: UploadKind, upload_dir: &str) -> Result<StoredFile, AppError> {
        store_bytes(
            kind,
            &self.original_name,
            self.mime_type,
            &self.data,
            upload_dir,
        )
        .await
    }
}

/// 校验扩展名与大小，uuid 重命名后写入对应子目录
pub async fn store_bytes(
    kind: UploadKind,
    original_name: &str,
    mime_type: Option<String>,
    data: &[u8],
    upload_dir: &str,
) -> Result<StoredFile, AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(
            "File too large. Maximum size is 10MB.".to_string(),
        ));
    }

    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if !kind.allows_extension(&extension) {
        return Err(AppError::Validation(kind.rejection_message().to_string()));
    }

    let filename = format!("{}.{}", Uuid::new_v4(), extension);
    let dir = format!("{}/{}", upload_dir, kind.dir());
    tokio::fs::create_dir_all(&dir).await?;

    let path = format!("{}/{}", dir, filename);
    tokio::fs::write(&path, data).await?;

    Ok(StoredFile {
        filename,
        original_name: original_name.to_string(),
        path,
        size: data.len() as i64,
        mime_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_policy_per_kind() {
        assert!(UploadKind::Documents.allows_extension("pdf"));
        assert!(UploadKind::Documents.allows_extension("DOCX"));
        assert!(!UploadKind::Documents.allows_extension("png"));

        assert!(UploadKind::Complaints.allows_extension("jpg"));
        assert!(UploadKind::Gallery.allows_extension("webp"));
        assert!(!UploadKind::Complaints.allows_extension("pdf"));
        assert!(!UploadKind::Gallery.allows_extension("exe"));
        assert!(!UploadKind::Gallery.allows_extension(""));
    }

    #[tokio::test]
    async fn stores_image_under_kind_directory() {
        let root = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));
        let root = root.to_str().unwrap().to_string();

        let stored = store_bytes(
            UploadKind::Complaints,
            "streetlight.jpg",
            Some("image/jpeg".to_string()),
            b"not really a jpeg",
            &root,
        )
        .await
        .unwrap();

        assert_eq!(stored.original_name, "streetlight.jpg");
        assert!(stored.filename.ends_with(".jpg"));
        assert_ne!(stored.filename, "streetlight.jpg");
        assert_eq!(stored.size, 17);
        assert!(stored.path.starts_with(&format!("{}/complaints/", root)));
        assert!(std::path::Path::new(&stored.path).exists());

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_disallowed_extension() {
        let root = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));
        let root = root.to_str().unwrap().to_string();

        let result = store_bytes(
            UploadKind::Complaints,
            "report.pdf",
            Some("application/pdf".to_string()),
            b"%PDF-",
            &root,
        )
        .await;

        assert!(result.is_err());
    }
}
