use axum::body::Bytes;
use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;

use crate::error::{AppError, Result};
use crate::text::clean_text;

// Some article hosts block obvious bot user agents, so fetch with a
// browser-like one.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

// Create static selectors to avoid recompiling them each time
static CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, p, li").expect("Failed to parse content selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1").expect("Failed to parse h1 selector")
});

/// Plain article text derived from a webpage or an uploaded file.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub title: Option<String>,
}

/// An uploaded file as received from the multipart form.
pub struct FileUpload {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Kinds of uploaded files the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    PlainText,
}

impl FileKind {
    /// Dispatches on the declared content type first, then the file extension.
    pub fn detect(content_type: Option<&str>, filename: &str) -> Result<Self> {
        let filename = filename.to_lowercase();
        match content_type {
            Some("application/pdf") => return Ok(FileKind::Pdf),
            Some("text/plain") => return Ok(FileKind::PlainText),
            _ => {}
        }
        if filename.ends_with(".pdf") {
            Ok(FileKind::Pdf)
        } else if filename.ends_with(".txt") {
            Ok(FileKind::PlainText)
        } else {
            Err(AppError::UnsupportedFileType(
                content_type.unwrap_or("unknown").to_string(),
            ))
        }
    }
}

/// Fetches a URL and extracts readable article text plus a best-effort title.
pub async fn extract_from_url(url: &str) -> Result<ExtractedDocument> {
    let response = CLIENT
        .get(url)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|_| {
            AppError::FetchError("Could not fetch the URL. It may be invalid or blocked.".to_string())
        })?;

    let html = response
        .text()
        .await
        .map_err(|e| AppError::FetchError(format!("Failed to read response body: {}", e)))?;

    // HTML parsing is CPU-bound, keep it off the async runtime
    let (text, title) = tokio::task::spawn_blocking(move || {
        let document = Html::parse_document(&html);
        (readable_text(&document), document_title(&document))
    })
    .await
    .map_err(|e| AppError::ExtractError(format!("Extraction task failed: {}", e)))?;

    let text = text.ok_or_else(|| AppError::ExtractError("Could not extract article text.".to_string()))?;

    Ok(ExtractedDocument { text, title })
}

/// Reads an uploaded file and extracts its text. The filename doubles as the
/// document title.
pub async fn extract_from_file(upload: FileUpload) -> Result<ExtractedDocument> {
    let kind = FileKind::detect(upload.content_type.as_deref(), &upload.filename)?;

    let text = match kind {
        FileKind::Pdf => {
            let bytes = upload.bytes.clone();
            // PDF parsing is blocking, offload it like the HTML pass
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| AppError::ExtractError(format!("Extraction task failed: {}", e)))?
                .map_err(|e| AppError::ExtractError(format!("Failed to read PDF: {}", e)))?
        }
        FileKind::PlainText => String::from_utf8(upload.bytes.to_vec())
            .map_err(|_| AppError::InvalidInput("File is not valid UTF-8 text.".to_string()))?,
    };

    let text = clean_text(&text);
    if text.is_empty() {
        return Err(AppError::EmptyDocument(
            "File appears to be empty or unreadable.".to_string(),
        ));
    }

    Ok(ExtractedDocument {
        text,
        title: Some(upload.filename),
    })
}

/// Walks heading, paragraph and list elements in document order, padding
/// headings with blank lines so the result reads as a sequence of sections.
fn readable_text(document: &Html) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    for element in document.select(&CONTENT_SELECTOR) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            continue;
        }
        if element.value().name().starts_with('h') {
            parts.push(format!("\n{}\n", text));
        } else {
            parts.push(text);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(clean_text(&parts.join("\n\n")))
    }
}

/// Pulls a title from <title>, falling back to the first <h1>. Best-effort;
/// a missing title is not an error.
fn document_title(document: &Html) -> Option<String> {
    for selector in [&*TITLE_SELECTOR, &*H1_SELECTOR] {
        if let Some(element) = document.select(selector).next() {
            let title: String = element.text().collect();
            let title = title.trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_text_selects_headings_and_paragraphs() {
        let html = Html::parse_document(
            "<html><body>\
             <h1>Title</h1>\
             <p>First paragraph.</p>\
             <ul><li>item one</li><li>item two</li></ul>\
             <script>ignored()</script>\
             </body></html>",
        );
        let text = readable_text(&html).unwrap();
        assert_eq!(text, "Title\n\nFirst paragraph.\n\nitem one\n\nitem two");
    }

    #[test]
    fn readable_text_is_none_without_content() {
        let html = Html::parse_document("<html><body><div>bare div text</div></body></html>");
        assert!(readable_text(&html).is_none());
    }

    #[test]
    fn title_prefers_title_tag_over_h1() {
        let html = Html::parse_document(
            "<html><head><title> Page Title </title></head><body><h1>Heading</h1></body></html>",
        );
        assert_eq!(document_title(&html), Some("Page Title".to_string()));
    }

    #[test]
    fn title_falls_back_to_h1() {
        let html = Html::parse_document("<html><body><h1>Heading</h1></body></html>");
        assert_eq!(document_title(&html), Some("Heading".to_string()));
    }

    #[test]
    fn title_is_optional() {
        let html = Html::parse_document("<html><body><p>text</p></body></html>");
        assert_eq!(document_title(&html), None);
    }

    #[test]
    fn file_kind_from_content_type() {
        assert_eq!(FileKind::detect(Some("application/pdf"), "doc.bin").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::detect(Some("text/plain"), "doc.bin").unwrap(), FileKind::PlainText);
    }

    #[test]
    fn file_kind_from_extension() {
        assert_eq!(FileKind::detect(None, "Report.PDF").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::detect(None, "notes.txt").unwrap(), FileKind::PlainText);
    }

    #[test]
    fn unknown_file_kind_is_rejected() {
        let err = FileKind::detect(Some("application/msword"), "doc.docx").unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }
}
