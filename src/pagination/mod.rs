mod config;
mod fetcher;
mod iterator;
mod page;
mod query;
mod urls;

pub use config::PaginationConfig;
pub use fetcher::{PagedFetcher, within_deadline};
pub use iterator::PageIterator;
pub use page::{PageResponse, parse_page};
pub use query::{CollectionQuery, Filter, FilterOp};
pub use urls::{build_collection_url, build_page_url};
