//! Page requests for listings.

use crate::error::RbacError;

/// A validated `(page, size)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Build a page request from optional query parameters.
    ///
    /// - neither given: `None` (no pagination)
    /// - page only: `default_size` items per page
    /// - size only: first page
    ///
    /// Negative values and a zero size are rejected.
    pub fn from_params(
        page: Option<i64>,
        size: Option<i64>,
        default_size: usize,
    ) -> Result<Option<Self>, RbacError> {
        let page = page.map(|p| to_index(p, "page", 0)).transpose()?;
        let size = size.map(|s| to_index(s, "size", 1)).transpose()?;

        Ok(match (page, size) {
            (None, None) => None,
            (Some(page), None) => Some(Self {
                page,
                size: default_size,
            }),
            (None, Some(size)) => Some(Self { page: 0, size }),
            (Some(page), Some(size)) => Some(Self { page, size }),
        })
    }

    /// Keep the items of this page.
    #[must_use]
    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.page.saturating_mul(self.size))
            .take(self.size)
            .collect()
    }
}

fn to_index(value: i64, name: &str, min: i64) -> Result<usize, RbacError> {
    if value < min {
        return Err(RbacError::Validation(format!(
            "Invalid pagination: {name} must be at least {min} (got {value})"
        )));
    }
    usize::try_from(value)
        .map_err(|_| RbacError::Validation(format!("Invalid pagination: {name} is too large")))
}
