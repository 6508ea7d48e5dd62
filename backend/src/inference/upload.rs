use sha2::{Digest, Sha256};

/// One user-supplied image, held in memory for a single pipeline run.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// SHA-256 of the upload, used to correlate log lines.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_sha256_hex() {
        let upload = UploadedImage::new("empty.jpg", Vec::new());
        assert_eq!(
            upload.fingerprint(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(upload.len(), 0);
        assert_eq!(upload.file_name(), "empty.jpg");
    }
}
