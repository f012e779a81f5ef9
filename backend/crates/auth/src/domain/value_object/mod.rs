pub mod display_name;
pub mod email;
pub mod user_id;
pub mod user_password;

// Re-exports
pub use display_name::DisplayName;
pub use email::Email;
pub use user_id::{UserId, UserMarker};
pub use user_password::{RawPassword, UserPassword};
