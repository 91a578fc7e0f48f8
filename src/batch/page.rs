// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use std::fmt;

use crate::errors::SeqfetchError;

/// Half-open range of record indices, `[start, end)`, fetched in a single request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
}

impl Page {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Lazily yields the pages covering `[0, count)`, in increasing order. Every page holds
/// `page_size` records except possibly the last, which holds what remains.
#[derive(Clone, Debug)]
pub struct Pages {
    count: usize,
    page_size: usize,
    next_start: usize,
}

impl Pages {
    pub fn new(count: usize, page_size: usize) -> Result<Self, SeqfetchError> {
        if page_size == 0 {
            return Err(SeqfetchError::InvalidArgument(String::from(
                "page size must be at least 1",
            )));
        }
        Ok(Pages {
            count,
            page_size,
            next_start: 0,
        })
    }
}

impl Iterator for Pages {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        if self.next_start >= self.count {
            return None;
        }
        let start = self.next_start;
        let end = self.count.min(start.saturating_add(self.page_size));
        self.next_start = end;
        Some(Page { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count.saturating_sub(self.next_start);
        let n = remaining.div_ceil(self.page_size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Pages {}
