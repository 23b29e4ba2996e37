//! PDF text extraction
//!
//! Extracts text content from uploaded PDF bytes using lopdf. Text showing
//! operators between BT/ET blocks are decoded page by page; pages that fail
//! to parse are skipped rather than failing the whole document.

use literatus_common::errors::{AppError, Result};
use tracing::{debug, warn};

/// Extract text content from PDF bytes
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| AppError::PdfParse {
        message: format!("Failed to load PDF: {}", e),
    })?;

    let mut text = String::new();
    let pages = doc.get_pages();

    debug!(page_count = pages.len(), "Extracting text from PDF");

    for (page_num, page_id) in pages.iter() {
        match doc.get_page_content(*page_id) {
            Ok(content) => {
                text.push_str(&extract_text_from_content(&content));
                text.push('\n');
            }
            Err(e) => {
                warn!(page = page_num, error = %e, "Failed to read page content, skipping");
            }
        }
    }

    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }

    let cleaned = clean_text(&text);

    debug!(
        original_len = text.len(),
        cleaned_len = cleaned.len(),
        "Text extraction complete"
    );

    Ok(cleaned)
}

/// Extract text from a PDF content stream: everything shown by text
/// operators between BT and ET markers.
fn extract_text_from_content(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;
    let mut current_text = String::new();

    for line in content_str.lines() {
        let trimmed = line.trim();

        if trimmed == "BT" {
            in_text_block = true;
            continue;
        }

        if trimmed == "ET" {
            in_text_block = false;
            if !current_text.is_empty() {
                text.push_str(&current_text);
                text.push(' ');
                current_text.clear();
            }
            continue;
        }

        if in_text_block {
            if let Some(text_content) = extract_text_from_operator(trimmed) {
                current_text.push_str(&text_content);
            }
        }
    }

    text
}

/// Extract text from a PDF text showing operator: Tj, ', " or TJ
fn extract_text_from_operator(line: &str) -> Option<String> {
    // (text) Tj and the quote variants
    if line.ends_with("Tj") || line.ends_with('\'') || line.ends_with('"') {
        if let Some(start) = line.find('(') {
            if let Some(end) = line.rfind(')') {
                let text = &line[start + 1..end];
                return Some(decode_pdf_string(text));
            }
        }
    }

    // [(text) num (text) num] TJ array form
    if line.ends_with("TJ") {
        let mut result = String::new();
        let mut in_paren = false;
        let mut current = String::new();

        for ch in line.chars() {
            match ch {
                '(' => {
                    in_paren = true;
                }
                ')' => {
                    in_paren = false;
                    result.push_str(&decode_pdf_string(&current));
                    current.clear();
                }
                _ if in_paren => {
                    current.push(ch);
                }
                _ => {}
            }
        }

        if !result.is_empty() {
            return Some(result);
        }
    }

    None
}

/// Decode PDF string escapes
fn decode_pdf_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('(') => result.push('('),
                Some(')') => result.push(')'),
                Some(c) => result.push(c),
                None => {}
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Collapse runs of whitespace into single spaces
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
