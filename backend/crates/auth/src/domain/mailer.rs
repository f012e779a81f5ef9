//! Mailer Trait
//!
//! Port for outbound mail. Implementation is in infrastructure layer.

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Reset mail port
#[trait_variant::make(ResetMailer: Send)]
pub trait LocalResetMailer {
    /// Send a password reset link to the user
    async fn send_reset_link(
        &self,
        to: &Email,
        display_name: &str,
        reset_url: &str,
    ) -> AuthResult<()>;
}
