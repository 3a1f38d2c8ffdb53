// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first item shown, 0 when empty.
    pub start_item: usize,
    pub end_item: usize,
}

/// Slices `items` into page `page` (1-based, clamped to the valid range).
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_pages,
        total_items,
        start_item: if total_items == 0 { 0 } else { start + 1 },
        end_item: end,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page links for a pager: all pages up to seven, otherwise the first
/// three, the last two and the neighbourhood of `current`, with ellipses
/// over the gaps.
pub fn page_markers(total_pages: usize, current: usize) -> Vec<PageMarker> {
    let total = total_pages.max(1);
    if total <= 7 {
        return (1..=total).map(PageMarker::Page).collect();
    }
    let current = current.clamp(1, total);
    let mut pages: BTreeSet<usize> = [1, 2, 3, total - 1, total, current].into_iter().collect();
    if current > 4 {
        pages.insert(current - 1);
    }
    if current + 1 < total - 1 {
        pages.insert(current + 1);
    }

    let mut out = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<usize> = None;
    for p in pages {
        if let Some(prev) = previous {
            if p - prev > 1 {
                out.push(PageMarker::Ellipsis);
            }
        }
        out.push(PageMarker::Page(p));
        previous = Some(p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Ellipsis, Page as P};

    #[test]
    fn paginates_with_item_range() {
        let items: Vec<u32> = (1..=12).collect();
        let p = paginate(&items, 3, 5);
        assert_eq!(p.items, vec![11, 12]);
        assert_eq!(p.total_pages, 3);
        assert_eq!((p.start_item, p.end_item), (11, 12));

        let first = paginate(&items, 1, 5);
        assert_eq!(first.items, vec![1, 2, 3, 4, 5]);
        assert_eq!((first.start_item, first.end_item), (1, 5));
    }

    #[test]
    fn clamps_out_of_range_pages() {
        let items: Vec<u32> = (1..=6).collect();
        assert_eq!(paginate(&items, 0, 5).page, 1);
        let last = paginate(&items, 99, 5);
        assert_eq!(last.page, 2);
        assert_eq!(last.items, vec![6]);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let p = paginate::<u32>(&[], 1, 5);
        assert_eq!(p.total_pages, 1);
        assert!(p.items.is_empty());
        assert_eq!((p.start_item, p.end_item), (0, 0));
    }

    #[test]
    fn short_pagers_list_every_page() {
        assert_eq!(page_markers(3, 2), vec![P(1), P(2), P(3)]);
        assert_eq!(page_markers(0, 1), vec![P(1)]);
    }

    #[test]
    fn long_pagers_elide_gaps() {
        assert_eq!(
            page_markers(10, 5),
            vec![P(1), P(2), P(3), P(4), P(5), P(6), Ellipsis, P(9), P(10)]
        );
        assert_eq!(
            page_markers(10, 1),
            vec![P(1), P(2), P(3), Ellipsis, P(9), P(10)]
        );
        assert_eq!(
            page_markers(20, 12),
            vec![P(1), P(2), P(3), Ellipsis, P(11), P(12), P(13), Ellipsis, P(19), P(20)]
        );
    }
}
