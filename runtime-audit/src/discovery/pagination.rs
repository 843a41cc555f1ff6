//! Page-number pagination.

use std::future::Future;

/// Fetches numbered pages (starting at 1) until one comes back short.
///
/// A page with fewer than `page_size` items is the last one; no further page
/// is requested, so an exactly-full final page costs one extra (empty) fetch
/// but a short one never does.
///
/// # Errors
///
/// Returns the first error produced by `fetch_page`.
pub async fn paginate<T, E, F, Fut>(page_size: usize, mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch_page(page).await?;
        let fetched = batch.len();
        items.extend(batch);

        if fetched < page_size {
            break;
        }
        page += 1;
    }

    Ok(items)
}
