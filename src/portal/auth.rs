//! Login flow against the portal's Spring Security endpoint.
//!
//! The portal hands out a CSRF token on the landing page which must be
//! echoed back in the login form. A successful login redirects to the
//! student dashboard; a failed one redirects back to the login form, so
//! success is detected by the absence of that form.

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::portal::client::PortalClient;
use crate::portal::scrape;

const LOGIN_PATH: &str = "/j_spring_security_check";

/// Establishes an authenticated session on the client's cookie store.
pub(crate) async fn perform_login(
    client: &PortalClient,
    credentials: &Credentials,
) -> Result<()> {
    let landing = client.get_text("/").await?;
    let csrf = scrape::csrf_token(&landing).ok_or_else(|| {
        Error::Authentication("login page did not provide a CSRF token".to_string())
    })?;

    let form = [
        ("j_username", credentials.username.as_str()),
        ("j_password", credentials.password.as_str()),
        ("_csrf", csrf.as_str()),
    ];
    let response = client.post_form(LOGIN_PATH, &form).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Authentication(format!(
            "login endpoint returned HTTP {}",
            status
        )));
    }

    let html = response.text().await?;
    if scrape::is_login_page(&html) {
        return Err(Error::Authentication(
            "the portal rejected the supplied credentials".to_string(),
        ));
    }

    tracing::debug!("Portal session established for {}", credentials.username);
    Ok(())
}
