//! Query-string pagination with forgiving parsing: anything that is not a
//! usable number falls back to the defaults instead of erroring.

const DEFAULT_PAGE: u64 = 0;
const DEFAULT_SIZE: u64 = 10;
const MAX_SIZE: u64 = 10;

/// Resolves `page` and `size` query parameters. Non-numeric or negative
/// pages become page 0; sizes outside `1..=10` become 10.
#[must_use]
pub fn resolve(page: Option<&str>, size: Option<&str>) -> (u64, u64) {
    let page = page
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|p| *p >= 0)
        .map_or(DEFAULT_PAGE, |p| p.unsigned_abs());

    let size = size
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|s| (1..=MAX_SIZE).contains(s))
        .unwrap_or(DEFAULT_SIZE);

    (page, size)
}
