mod config;
mod error;
pub mod flow;
pub mod format;
pub mod http;
pub mod notification;
pub mod pagination;
pub mod permissions;
pub mod route;
pub mod table;
pub mod types;
pub mod users;

pub use config::{BusinessConfig, DEFAULT_API_URL, DEFAULT_PER_PAGE};
pub use error::{ApiError, ApiResult};
pub use flow::{dismiss_notification, is_busy, navigate, reconcile, register};
pub use http::ApiClient;
pub use notification::{Notification, NotificationKind, Notifications};
pub use route::Route;
pub use types::{Paginated, Permission, SortDirection, User, UserFormValues};
