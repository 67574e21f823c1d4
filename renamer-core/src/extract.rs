//! Content extraction
//!
//! Pulls raw candidate text out of a file. Plain-text files contribute their
//! first [`TEXT_READ_LIMIT`] characters. PDFs contribute their metadata title
//! when one is set, otherwise the text of the first page.

use crate::scan::{is_all_caps, title_case};
use crate::{RenameError, Result, TEXT_READ_LIMIT};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Page numbers in `lopdf` start at 1
const FIRST_PAGE: u32 = 1;

/// How a file's content is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    PlainText,
    Pdf,
}

impl ContentKind {
    /// Determine the kind from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => ContentKind::Pdf,
            _ => ContentKind::PlainText,
        }
    }
}

/// Raw text handed to the rest of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    /// Already a title (PDF metadata), skips candidate scanning
    Title(String),
    /// Free text that still needs scanning
    Text(String),
}

/// Capability interface over a PDF backend
pub trait PdfSource {
    /// Title from the document information dictionary
    fn metadata_title(&self) -> Option<String>;

    /// Extracted text of page 1
    fn first_page_text(&self) -> Option<String>;
}

/// Extract raw text from a file
pub fn extract_raw_text(path: &Path, kind: ContentKind) -> Result<RawContent> {
    match kind {
        ContentKind::PlainText => read_text_prefix(path, TEXT_READ_LIMIT).map(RawContent::Text),
        ContentKind::Pdf => {
            let doc = PdfDocument::open(path).map_err(|e| RenameError::unreadable(path, e))?;
            extract_from_pdf_source(&doc)
                .ok_or_else(|| RenameError::unreadable(path, "no text on first page"))
        }
    }
}

/// Title-first extraction over any [`PdfSource`]
pub fn extract_from_pdf_source(source: &dyn PdfSource) -> Option<RawContent> {
    if let Some(title) = source.metadata_title() {
        let title = title.trim();
        if !title.is_empty() {
            let title = if is_all_caps(title) {
                title_case(title)
            } else {
                title.to_string()
            };
            return Some(RawContent::Title(title));
        }
    }

    source
        .first_page_text()
        .filter(|text| !text.trim().is_empty())
        .map(RawContent::Text)
}

/// Read at most `limit` characters of UTF-8 text from the start of a file
pub fn read_text_prefix(path: &Path, limit: usize) -> Result<String> {
    let file = File::open(path).map_err(|e| RenameError::unreadable(path, e))?;

    // a char is at most 4 bytes in UTF-8
    let mut buf = Vec::with_capacity(limit * 4);
    file.take((limit * 4) as u64)
        .read_to_end(&mut buf)
        .map_err(|e| RenameError::unreadable(path, e))?;

    let text = match std::str::from_utf8(&buf) {
        Ok(text) => text,
        // the read may stop in the middle of a multi-byte sequence
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&buf[..e.valid_up_to()]).map_err(|e| RenameError::unreadable(path, e))?
        }
        Err(e) => return Err(RenameError::unreadable(path, e)),
    };

    Ok(text.chars().take(limit).collect())
}

/// PDF backed by `lopdf` for both metadata and page text
pub struct PdfDocument {
    document: lopdf::Document,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let document = lopdf::Document::load(path)?;
        Ok(Self { document })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let document = lopdf::Document::load_mem(bytes)?;
        Ok(Self { document })
    }
}

impl PdfSource for PdfDocument {
    fn metadata_title(&self) -> Option<String> {
        let info = self.document.trailer.get(b"Info").ok()?;
        let (_, info) = self.document.dereference(info).ok()?;
        let title = info.as_dict().ok()?.get(b"Title").ok()?;
        match self.document.dereference(title).ok()?.1 {
            lopdf::Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            _ => None,
        }
    }

    fn first_page_text(&self) -> Option<String> {
        // content stream decoding can panic on malformed fonts
        let text = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.document.extract_text(&[FIRST_PAGE])
        }));

        match text {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                tracing::warn!("PDF text extraction failed: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!("PDF text extraction panicked, likely malformed fonts");
                None
            }
        }
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    bytes.iter().map(|&b| b as char).collect()
}
