mod common;

use common::pdf_with_pages;
use pdf_chat::chunk::split_paragraphs;
use pdf_chat::extract::{extract_pages, extract_text};

#[test]
fn test_pages_in_document_order() {
    let pdf = pdf_with_pages(&["First page text", "Second page text", "Third page text"]);
    let pages = extract_pages(&pdf).unwrap();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("First page text"));
    assert!(pages[1].contains("Second page text"));
    assert!(pages[2].contains("Third page text"));
}

#[test]
fn test_text_is_concatenation_of_pages() {
    let pdf = pdf_with_pages(&["Hello", "World"]);
    let pages = extract_pages(&pdf).unwrap();
    assert_eq!(extract_text(&pdf).unwrap(), pages.concat());
}

#[test]
fn test_extracted_text_splits_into_nonempty_chunks() {
    let pdf = pdf_with_pages(&["Alpha", "Beta"]);
    let text = extract_text(&pdf).unwrap();
    let chunks = split_paragraphs(&text);
    assert!(!chunks.is_empty());
    assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    assert!(chunks.concat().contains("Alpha"));
    assert!(chunks.concat().contains("Beta"));
}
