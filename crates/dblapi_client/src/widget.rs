//! Listing widget links.

use crate::DEFAULT_BASE_URL;
use dblapi_core::WidgetOptions;
use dblapi_error::{DblResult, DirectoryError, DirectoryErrorKind};

/// Link to the SVG widget of bot `id` on the public directory.
///
/// Only the colours present in `options` are appended, in a fixed order.
///
/// ```
/// use dblapi_client::widget_url;
/// use dblapi_core::WidgetOptions;
///
/// let opts = WidgetOptions::builder().topcolor("fff").build().unwrap();
/// assert_eq!(
///     widget_url("123", &opts).unwrap(),
///     "https://discordbots.org/api/widget/123.svg?topcolor=fff",
/// );
/// assert_eq!(
///     widget_url("123", &WidgetOptions::default()).unwrap(),
///     "https://discordbots.org/api/widget/123.svg",
/// );
/// ```
pub fn widget_url(id: &str, options: &WidgetOptions) -> DblResult<String> {
    build(DEFAULT_BASE_URL, id, options)
}

pub(crate) fn build(base: &str, id: &str, options: &WidgetOptions) -> DblResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DirectoryError::new(DirectoryErrorKind::MissingId("bot id".into())).into());
    }

    let mut url = format!("{}/widget/{}.svg", base.trim_end_matches('/'), id);
    let pairs = options.to_query_pairs();
    if !pairs.is_empty() {
        let query: Vec<String> = pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }
    Ok(url)
}
