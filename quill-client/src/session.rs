//! The authenticated principal, and the guard every admin action goes
//! through. A missing or rejected token clears the stored one so the
//! next run starts from a clean logged-out state.

use crate::{api::Api, tokens, Error, Result};
use quill_api::auth::ApiUser;
use tracing::{debug, warn};

pub struct Session {
    pub user: ApiUser,
    pub api: Api,
}

impl Session {
    /// Loads the stored token and verifies it against the backend.
    pub fn open() -> Result<Session> {
        let token = tokens::load().ok_or(Error::Unauthorized)?;
        let api = Api::new(Some(token))?;
        match api.verify() {
            Ok(Some(user)) => {
                debug!("session verified for {}", user.email);
                Ok(Session { user, api })
            }
            Ok(None) => {
                tokens::clear()?;
                Err(Error::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    pub fn login(email: &str, password: &str) -> Result<ApiUser> {
        let api = Api::new(None)?;
        let response = api.login(email, password)?;
        tokens::save(&response.token)?;
        Ok(response.user)
    }

    /// Tells the backend, then forgets the token locally either way.
    pub fn logout() -> Result<()> {
        if let Some(token) = tokens::load() {
            let api = Api::new(Some(token))?;
            if let Err(e) = api.logout() {
                warn!("logout request failed: {}", e);
            }
        }
        tokens::clear()
    }
}
