use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Page-number pagination settings shared by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub page_size: u64,
    pub max_page_size: u64,
}

impl PaginationConfig {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;
    pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

    pub fn new(page_size: u64, max_page_size: u64) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            max_page_size: max_page_size.max(page_size),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE, Self::DEFAULT_MAX_PAGE_SIZE)
    }
}

/// `?page=2&page_size=20`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PaginationQuery {
    pub fn resolve(&self, config: &PaginationConfig) -> Result<PageRequest, ApiError> {
        let number = self.page.unwrap_or(1);
        if number == 0 {
            return Err(invalid_page());
        }

        let size = match self.page_size {
            Some(0) | None => config.page_size,
            Some(n) => n.min(config.max_page_size),
        };

        Ok(PageRequest { number, size })
    }
}

/// A resolved page: 1-based number and item count per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Zero-based index, as sea-orm's paginator expects.
    pub fn index(&self) -> u64 {
        self.number - 1
    }
}

/// The list envelope: `{count, next, previous, results}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn build(
        req: &HttpRequest,
        page: PageRequest,
        count: u64,
        results: Vec<T>,
    ) -> Result<Self, ApiError> {
        let num_pages = count.div_ceil(page.size).max(1);
        if page.number > num_pages {
            return Err(invalid_page());
        }

        let next = (page.number < num_pages).then(|| page_url(req, Some(page.number + 1)));
        let previous = match page.number {
            1 => None,
            2 => Some(page_url(req, None)),
            n => Some(page_url(req, Some(n - 1))),
        };

        Ok(Self {
            count,
            next,
            previous,
            results,
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

fn invalid_page() -> ApiError {
    ApiError::NotFound("Invalid page.".to_string())
}

/// Absolute URL of the current request with only `page` swapped out.
/// `None` drops the parameter entirely (the first page).
fn page_url(req: &HttpRequest, page: Option<u64>) -> String {
    let info = req.connection_info();

    let mut pairs: Vec<String> = req
        .query_string()
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "page" && !pair.starts_with("page="))
        .map(str::to_string)
        .collect();
    if let Some(n) = page {
        pairs.push(format!("page={n}"));
    }

    let base = format!("{}://{}{}", info.scheme(), info.host(), req.path());
    if pairs.is_empty() {
        base
    } else {
        format!("{base}?{}", pairs.join("&"))
    }
}
