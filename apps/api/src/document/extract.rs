use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// An uploaded document. Held only for the duration of one request.
#[derive(Debug, Clone)]
pub struct Document {
    pub data: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl Document {
    pub fn new(
        data: impl Into<Bytes>,
        filename: Option<String>,
        content_type: Option<String>,
    ) -> Self {
        Self {
            data: data.into(),
            filename,
            content_type,
        }
    }

    fn kind(&self) -> Result<DocumentKind, AppError> {
        if self.data.starts_with(PDF_MAGIC) {
            return Ok(DocumentKind::Pdf);
        }

        let extension = self
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Ok(DocumentKind::Pdf),
            Some("txt" | "md" | "markdown") => return Ok(DocumentKind::PlainText),
            _ => {}
        }

        match self.content_type.as_deref() {
            Some("application/pdf") => Ok(DocumentKind::Pdf),
            Some(ct) if ct.starts_with("text/") => Ok(DocumentKind::PlainText),
            // No usable hint at all: try it as text.
            _ if extension.is_none() => Ok(DocumentKind::PlainText),
            _ => Err(AppError::Extraction(format!(
                "unsupported document type '{}'",
                extension.unwrap_or_default()
            ))),
        }
    }
}

/// Extracts every piece of text from the document, pages in source order.
///
/// Fails with `AppError::Extraction` when the payload is empty, unreadable,
/// of an unsupported type, or contains no text.
pub async fn extract_text(document: &Document) -> Result<String, AppError> {
    if document.data.is_empty() {
        return Err(AppError::Extraction("document is empty".to_string()));
    }

    let kind = document.kind()?;
    debug!("Extracting {:?} document ({} bytes)", kind, document.data.len());

    let raw = match kind {
        DocumentKind::Pdf => {
            let data = document.data.clone();
            // pdf-extract panics on some malformed files; the join error catches that.
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await
                .map_err(|e| AppError::Extraction(format!("PDF parser crashed: {e}")))?
                .map_err(|e| AppError::Extraction(format!("PDF parse error: {e}")))?
        }
        DocumentKind::PlainText => std::str::from_utf8(&document.data)
            .map_err(|_| AppError::Extraction("document is not valid UTF-8 text".to_string()))?
            .to_string(),
    };

    let text = normalize(&raw);
    if text.is_empty() {
        return Err(AppError::Extraction(
            "no extractable text found in document".to_string(),
        ));
    }

    info!("Extracted {} chars of text", text.chars().count());
    Ok(text)
}

/// Normalizes line endings and strips form feeds and surrounding whitespace.
fn normalize(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace(['\r', '\u{c}'], "\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(data: &[u8], filename: Option<&str>, content_type: Option<&str>) -> Document {
        Document::new(
            data.to_vec(),
            filename.map(String::from),
            content_type.map(String::from),
        )
    }

    /// One-page PDF showing `line` in Helvetica, with a correct xref table.
    fn single_page_pdf(line: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>".to_string(),
            format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[tokio::test]
    async fn test_pdf_text_is_extracted() {
        let pdf = single_page_pdf("Jane Doe Rust Engineer");
        let text = extract_text(&doc(&pdf, Some("cv.pdf"), Some("application/pdf")))
            .await
            .unwrap();
        assert!(text.contains("Jane"), "unexpected text: {text:?}");
        assert!(text.contains("Engineer"), "unexpected text: {text:?}");
    }

    #[tokio::test]
    async fn test_empty_document_fails() {
        let err = extract_text(&doc(b"", Some("cv.pdf"), None)).await.unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_plain_text_by_extension() {
        let text = extract_text(&doc(b"  Jane Doe\r\nRust engineer\n", Some("cv.txt"), None))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[tokio::test]
    async fn test_plain_text_by_content_type() {
        let text = extract_text(&doc(b"# Jane", None, Some("text/markdown")))
            .await
            .unwrap();
        assert_eq!(text, "# Jane");
    }

    #[tokio::test]
    async fn test_whitespace_only_text_fails() {
        let err = extract_text(&doc(b" \n\t ", Some("cv.md"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_fails() {
        let err = extract_text(&doc(&[0xff, 0xfe, 0x00], Some("cv.txt"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails() {
        let err = extract_text(&doc(b"%PDF-1.7 this is not a real pdf", Some("cv.pdf"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_unsupported_extension_fails() {
        let err = extract_text(&doc(b"PK\x03\x04", Some("cv.docx"), None))
            .await
            .unwrap_err();
        match err {
            AppError::Extraction(msg) => assert!(msg.contains("docx")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pdf_detected_by_magic_regardless_of_name() {
        let document = doc(b"%PDF-1.4\n...", Some("upload.bin"), None);
        assert_eq!(document.kind().unwrap(), DocumentKind::Pdf);
    }
}
