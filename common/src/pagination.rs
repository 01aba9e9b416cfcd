//! Abstractions for page-number pagination over in-memory sequences.

use std::num::NonZeroUsize;

use derive_more::{Display, Error};
#[cfg(feature = "serde")]
use serde::Serialize;

/// Maximum number of items a single [`Page`] may contain.
pub const MAX_SIZE: usize = 100;

/// Page number used when none is requested.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when none is requested.
pub const DEFAULT_SIZE: i64 = 10;

/// Validated pagination arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested [`Page`].
    page: NonZeroUsize,

    /// Maximum number of items in the requested [`Page`].
    size: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`] out of the raw `page` and `size`.
    ///
    /// # Errors
    ///
    /// Conditions are checked in the following order, the first violated one
    /// is reported:
    /// - [`ArgumentsError::PageNotPositive`] if `page` is not positive;
    /// - [`ArgumentsError::SizeNotPositive`] if `size` is not positive;
    /// - [`ArgumentsError::SizeTooLarge`] if `size` exceeds [`MAX_SIZE`].
    pub fn new(page: i64, size: i64) -> Result<Self, ArgumentsError> {
        let page = positive(page).ok_or(ArgumentsError::PageNotPositive)?;
        let size = positive(size).ok_or(ArgumentsError::SizeNotPositive)?;
        if size.get() > MAX_SIZE {
            return Err(ArgumentsError::SizeTooLarge);
        }
        Ok(Self { page, size })
    }

    /// Returns the 1-based page number of these [`Arguments`].
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.get()
    }

    /// Returns the page size of these [`Arguments`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Returns the index of the first item of the requested [`Page`].
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.size())
    }
}

/// Converts the provided `num` into a [`NonZeroUsize`], saturating values not
/// fitting into [`usize`].
fn positive(num: i64) -> Option<NonZeroUsize> {
    if num <= 0 {
        return None;
    }
    NonZeroUsize::new(usize::try_from(num).unwrap_or(usize::MAX))
}

/// Error of creating [`Arguments`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ArgumentsError {
    /// Requested page number is zero or negative.
    #[display("page must be greater than 0")]
    PageNotPositive,

    /// Requested page size is zero or negative.
    #[display("size must be greater than 0")]
    SizeNotPositive,

    /// Requested page size exceeds [`MAX_SIZE`].
    #[display("size cannot exceed 100")]
    SizeTooLarge,
}

/// A window of items along with the metadata of the whole sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Page<T> {
    /// 1-based number of this [`Page`].
    pub page: usize,

    /// Requested size of this [`Page`].
    pub size: usize,

    /// Total number of items in the paginated sequence.
    pub total_items: usize,

    /// Total number of pages in the paginated sequence.
    pub total_pages: usize,

    /// Items of this [`Page`].
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Cuts a new [`Page`] out of the provided `items` according to the
    /// provided [`Arguments`].
    ///
    /// Out-of-range pages are not an error: they just contain no items.
    #[must_use]
    pub fn new<I>(args: &Arguments, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let total_items = items.len();

        Self {
            page: args.page(),
            size: args.size(),
            total_items,
            total_pages: total_items.div_ceil(args.size()),
            data: items.skip(args.offset()).take(args.size()).collect(),
        }
    }

    /// Maps the items of this [`Page`] with the provided function, keeping
    /// the metadata intact.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Self {
            page,
            size,
            total_items,
            total_pages,
            data,
        } = self;
        Page {
            page,
            size,
            total_items,
            total_pages,
            data: data.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Arguments, ArgumentsError, Page, MAX_SIZE};

    const NAMES: [&str; 5] = ["John", "Jane", "Emily", "Michael", "Sarah"];

    fn page(page: i64, size: i64) -> Page<&'static str> {
        Page::new(&Arguments::new(page, size).unwrap(), NAMES)
    }

    #[test]
    fn validates_arguments_in_order() {
        assert_eq!(Arguments::new(0, 10), Err(ArgumentsError::PageNotPositive));
        assert_eq!(
            Arguments::new(-1, 10),
            Err(ArgumentsError::PageNotPositive),
        );
        assert_eq!(Arguments::new(0, 0), Err(ArgumentsError::PageNotPositive));
        assert_eq!(
            Arguments::new(0, 101),
            Err(ArgumentsError::PageNotPositive),
        );

        assert_eq!(Arguments::new(1, 0), Err(ArgumentsError::SizeNotPositive));
        assert_eq!(
            Arguments::new(1, -1),
            Err(ArgumentsError::SizeNotPositive),
        );

        assert_eq!(Arguments::new(1, 101), Err(ArgumentsError::SizeTooLarge));

        let args = Arguments::new(1, 100).unwrap();
        assert_eq!(args.size(), MAX_SIZE);
        assert!(Arguments::new(i64::MAX, 1).is_ok());
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            ArgumentsError::PageNotPositive.to_string(),
            "page must be greater than 0",
        );
        assert_eq!(
            ArgumentsError::SizeNotPositive.to_string(),
            "size must be greater than 0",
        );
        assert_eq!(
            ArgumentsError::SizeTooLarge.to_string(),
            "size cannot exceed 100",
        );
    }

    #[test]
    fn computes_total_pages_as_ceiling() {
        for total in 0..=25_usize {
            for size in 1..=7_i64 {
                let args = Arguments::new(1, size).unwrap();
                let page = Page::new(&args, 0..total);

                #[expect(clippy::cast_possible_truncation, reason = "small")]
                #[expect(clippy::cast_precision_loss, reason = "small")]
                #[expect(clippy::cast_sign_loss, reason = "positive")]
                let expected = (total as f64 / size as f64).ceil() as usize;
                assert_eq!(page.total_items, total);
                assert_eq!(page.total_pages, expected, "{total} / {size}");
                assert!(page.data.len() <= args.size());
            }
        }
    }

    #[test]
    fn slices_requested_window() {
        let first = page(1, 2);
        assert_eq!(first.total_items, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.data, ["John", "Jane"]);

        assert_eq!(page(2, 2).data, ["Emily", "Michael"]);

        let last = page(3, 2);
        assert_eq!(last.data, ["Sarah"]);
        assert_eq!(last.total_pages, 3);

        assert_eq!(page(1, 100).data, NAMES);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let beyond = page(10, 2);
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.page, 10);
        assert_eq!(beyond.total_items, 5);
        assert_eq!(beyond.total_pages, 3);

        assert!(page(i64::MAX, 100).data.is_empty());
    }

    #[test]
    fn empty_sequence() {
        let args = Arguments::new(1, 10).unwrap();
        let page = Page::new(&args, Vec::<u8>::new());

        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn map_keeps_metadata() {
        let mapped = page(2, 2).map(str::len);

        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.size, 2);
        assert_eq!(mapped.total_items, 5);
        assert_eq!(mapped.total_pages, 3);
        assert_eq!(mapped.data, [5_usize, 7]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_in_camel_case() {
        assert_eq!(
            serde_json::to_value(page(3, 2)).unwrap(),
            serde_json::json!({
                "page": 3,
                "size": 2,
                "totalItems": 5,
                "totalPages": 3,
                "data": ["Sarah"],
            }),
        );
    }
}
