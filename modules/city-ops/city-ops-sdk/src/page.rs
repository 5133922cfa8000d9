//! Skip/limit pagination.

use crate::error::CityOpsError;

/// Largest page size accepted unless configured otherwise.
pub const DEFAULT_MAX_LIMIT: u64 = 100;

/// Validated offset/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: u64,
    limit: u64,
}

impl PageRequest {
    /// Inputs are signed so that negative values coming from a query string
    /// are rejected here rather than at deserialization.
    ///
    /// # Errors
    /// `InvalidPage` when `skip < 0` or `limit` is outside `[1, max_limit]`.
    pub fn new(skip: i64, limit: i64, max_limit: u64) -> Result<Self, CityOpsError> {
        let skip = u64::try_from(skip)
            .map_err(|_| CityOpsError::InvalidPage(format!("skip must be >= 0, got {skip}")))?;
        let limit = u64::try_from(limit)
            .ok()
            .filter(|l| (1..=max_limit).contains(l))
            .ok_or_else(|| {
                CityOpsError::InvalidPage(format!(
                    "limit must be between 1 and {max_limit}, got {limit}"
                ))
            })?;
        Ok(Self { skip, limit })
    }

    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

/// Page descriptor returned next to every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PageInfo {
    /// `page` is derived from the offset and is only the true page number
    /// when `skip` is a multiple of `limit`.
    #[must_use]
    #[allow(clippy::integer_division)]
    pub const fn compute(req: PageRequest, total: u64) -> Self {
        let limit = req.limit;
        Self {
            total,
            page: req.skip / limit + 1,
            per_page: limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// One slice of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, req: PageRequest, total: u64) -> Self {
        Self {
            items,
            info: PageInfo::compute(req, total),
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn req(skip: i64, limit: i64) -> PageRequest {
        PageRequest::new(skip, limit, DEFAULT_MAX_LIMIT).unwrap()
    }

    #[test]
    fn second_page_of_forty_five() {
        let info = PageInfo::compute(req(20, 20), 45);
        assert_eq!(info.page, 2);
        assert_eq!(info.per_page, 20);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total, 45);
    }

    #[test]
    #[allow(clippy::integer_division)]
    fn formula_holds_across_inputs() {
        for total in [0_u64, 1, 19, 20, 21, 99, 100, 101, 1000] {
            for limit in [1_i64, 7, 20, 100] {
                for skip in [0_i64, 1, 5, 19, 20, 250] {
                    let info = PageInfo::compute(req(skip, limit), total);
                    let l = limit.unsigned_abs();
                    let s = skip.unsigned_abs();
                    assert_eq!(info.page, s / l + 1);
                    assert_eq!(info.total_pages, (total + l - 1) / l);
                }
            }
        }
    }

    #[test]
    fn offset_not_multiple_of_limit_keeps_formula() {
        assert_eq!(PageInfo::compute(req(25, 20), 45).page, 2);
        assert_eq!(PageInfo::compute(req(19, 20), 45).page, 1);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let info = PageInfo::compute(req(0, 20), 0);
        assert_eq!(info.page, 1);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert!(PageRequest::new(-1, 20, 100).is_err());
        assert!(PageRequest::new(0, 0, 100).is_err());
        assert!(PageRequest::new(0, 101, 100).is_err());
        assert!(PageRequest::new(0, -5, 100).is_err());
        assert!(PageRequest::new(0, 100, 100).is_ok());
        assert!(PageRequest::new(0, 1, 100).is_ok());
    }

    #[test]
    fn map_keeps_page_info() {
        let page = Page::new(vec![1, 2, 3], req(0, 3), 10).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.info.total_pages, 4);
    }
}
