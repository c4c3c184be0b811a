use super::query::CollectionQuery;

/// `<api_root>/<collection>?<query params>`
pub fn build_collection_url(api_root: &str, query: &CollectionQuery) -> String {
    let base = format!("{}/{}", api_root.trim_end_matches('/'), query.collection);
    append_params(base, &query.params())
}

/// Collection URL with `limit` and `page` appended
pub fn build_page_url(api_root: &str, query: &CollectionQuery, page_size: usize, page: usize) -> String {
    let base = build_collection_url(api_root, query);
    let paging = [
        ("limit".to_string(), page_size.to_string()),
        ("page".to_string(), page.to_string()),
    ];
    append_params(base, &paging)
}

fn append_params(mut url: String, params: &[(String, String)]) -> String {
    for (key, value) in params {
        url.push(determine_separator(&url));
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

fn determine_separator(url: &str) -> char {
    if url.contains('?') { '&' } else { '?' }
}
