use super::pagination::*;

#[test]
fn test_page_request_defaults() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.per_page, 50);
    assert_eq!(request.offset(), 0);
}

#[test]
fn test_page_request_clamps_zero_values() {
    let request = PageRequest::new(0, 0);
    assert_eq!(request, PageRequest::new(1, 1));
}

#[test]
fn test_offset_and_next() {
    let request = PageRequest::new(3, 20);
    assert_eq!(request.offset(), 40);
    assert_eq!(request.limit(), 20);
    assert_eq!(request.next().page, 4);
}

#[test]
fn test_total_pages_rounds_up() {
    let response = PageResponse::new(vec![1, 2], 1, 2, 5);
    assert_eq!(response.meta.total_pages, 3);
    assert!(response.meta.has_next());
}

#[test]
fn test_empty_result_has_single_page() {
    let response: PageResponse<u8> = PageResponse::new(vec![], 1, 20, 0);
    assert_eq!(response.meta.total_pages, 1);
    assert!(!response.meta.has_next());
}

#[test]
fn test_paginate_slices_in_order() {
    let items: Vec<u32> = (1..=7).collect();

    let second = PageRequest::new(2, 3).paginate(items.clone());
    assert_eq!(second.data, vec![4, 5, 6]);
    assert!(second.meta.has_next());

    let last = PageRequest::new(3, 3).paginate(items);
    assert_eq!(last.data, vec![7]);
    assert!(!last.meta.has_next());
}
