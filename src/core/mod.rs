// Core view engine exports
pub mod aggregate;
pub mod filters;
pub mod input;
pub mod normalize;
pub mod pagination;
pub mod sorting;
pub mod view;

pub use aggregate::average_match_level;
pub use filters::{apply_filters, CompiledFilter, FilterCriteria, FilterField};
pub use input::MalformedInputError;
pub use normalize::{normalize, normalize_page};
pub use pagination::{PageSizes, PaginationState, ALL_MODE_PAGE_SIZE, DEFAULT_PAGE_SIZE};
pub use sorting::{key_of, sort_users, SortConfig, SortDirection, SortKey, SortValue};
pub use view::{
    DetailOutcome, DetailRequest, DetailSnapshot, DetailState, ListOutcome, ListRequest,
    UserRow, ViewController, ViewMode, ViewSnapshot, ViewState,
};
