//! Pagination and sorting types.
//!
//! A [`PageRequest`] carries a 0-based page index, a page size, and a
//! [`Sort`]; a [`Page`] is the bounded result slice plus total-count
//! metadata. Requesting a page past the end of the result set yields an
//! empty page with the correct total, not an error.
//!
//! # Examples
//!
//! ```rust
//! use aisle_query::{PageRequest, Sort, SortOrder};
//!
//! let request = PageRequest::of(2, 25).sorted_by(Sort::by("price").descending());
//! assert_eq!(request.offset(), 50);
//!
//! let unsorted = PageRequest::of(0, 20);
//! assert!(unsorted.sort().is_unsorted());
//! ```

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use smol_str::SmolStr;

/// Sort direction for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortOrder {
    /// Ascending (A-Z, 0-9, oldest first); nulls sort last.
    #[default]
    Asc,
    /// Descending (Z-A, 9-0, newest first); nulls sort first.
    Desc,
}

impl SortOrder {
    /// The conventional keyword for this direction.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a sort specification, referenced by external field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    /// External field name, resolved against the entity schema at
    /// execution time.
    pub name: SmolStr,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortField {
    /// Ascending sort on a field.
    pub fn asc(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            order: SortOrder::Asc,
        }
    }

    /// Descending sort on a field.
    pub fn desc(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            order: SortOrder::Desc,
        }
    }
}

/// A sort specification: zero or more fields, applied in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sort {
    fields: SmallVec<[SortField; 2]>,
}

impl Sort {
    /// The empty sort: store-defined (id) order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Start a sort on one field, ascending.
    pub fn by(name: impl Into<SmolStr>) -> Self {
        Self {
            fields: SmallVec::from_iter([SortField::asc(name)]),
        }
    }

    /// Flip the most recently added field to descending.
    pub fn descending(mut self) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.order = SortOrder::Desc;
        }
        self
    }

    /// Add a secondary sort field, ascending.
    pub fn then_by(mut self, name: impl Into<SmolStr>) -> Self {
        self.fields.push(SortField::asc(name));
        self
    }

    /// Whether no sort field was requested.
    pub fn is_unsorted(&self) -> bool {
        self.fields.is_empty()
    }

    /// The requested sort fields, in priority order.
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unsorted() {
            return f.write_str("UNSORTED");
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", field.name, field.order)?;
        }
        Ok(())
    }
}

/// A request for one bounded slice of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u64,
    size: u64,
    sort: Sort,
}

impl PageRequest {
    /// Request page `page` (0-based) of `size` records. A zero size is
    /// bumped to one record per page.
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::unsorted(),
        }
    }

    /// Attach a sort specification.
    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// The 0-based page index.
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The page size.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The sort specification.
    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of records before this page.
    pub const fn offset(&self) -> u64 {
        self.page * self.size
    }

    /// A copy of this request with the page size capped at `max_size`.
    pub fn clamped(&self, max_size: u64) -> Self {
        Self {
            page: self.page,
            size: self.size.min(max_size.max(1)),
            sort: self.sort.clone(),
        }
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} size {} sort {}", self.page, self.size, self.sort)
    }
}

/// One bounded slice of a result set plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    page: u64,
    size: u64,
    total: u64,
}

impl<T> Page<T> {
    /// Assemble a page from its slice and the total match count.
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total,
        }
    }

    /// The records on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, yielding its records.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The 0-based page index this slice came from.
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The requested page size (the slice may be shorter).
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Total number of matching records across all pages.
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Total number of pages at this page size.
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.size)
    }

    /// Whether a later page exists.
    pub const fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(PageRequest::of(0, 25).offset(), 0);
        assert_eq!(PageRequest::of(3, 25).offset(), 75);
    }

    #[test]
    fn test_zero_size_is_bumped() {
        assert_eq!(PageRequest::of(0, 0).size(), 1);
    }

    #[test]
    fn test_clamp_caps_size_only() {
        let request = PageRequest::of(2, 5_000).sorted_by(Sort::by("price"));
        let clamped = request.clamped(1_000);
        assert_eq!(clamped.size(), 1_000);
        assert_eq!(clamped.page(), 2);
        assert_eq!(clamped.sort(), request.sort());

        let small = PageRequest::of(0, 10).clamped(1_000);
        assert_eq!(small.size(), 10);
    }

    #[test]
    fn test_sort_builder() {
        let sort = Sort::by("price").descending().then_by("id");
        assert_eq!(
            sort.fields(),
            [SortField::desc("price"), SortField::asc("id")]
        );
        assert_eq!(sort.to_string(), "price DESC, id ASC");
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::of(1, 2);
        let page = Page::new(vec!["c"], &request, 3);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.len(), 1);
        assert!(!page.has_next());

        let first = Page::new(vec!["a", "b"], &PageRequest::of(0, 2), 3);
        assert!(first.has_next());
    }

    #[test]
    fn test_page_serializes_with_metadata() {
        let page = Page::new(vec![1, 2], &PageRequest::of(0, 2), 5);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!([1, 2]));
        assert_eq!(json["total"], 5);
        assert_eq!(json["page"], 0);
    }

    #[test]
    fn test_empty_out_of_range_page() {
        let request = PageRequest::of(9, 10);
        let page: Page<i32> = Page::new(Vec::new(), &request, 3);
        assert!(page.is_empty());
        assert_eq!(page.total(), 3);
        assert_eq!(page.total_pages(), 1);
    }
}
