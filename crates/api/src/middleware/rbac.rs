//! Admin gate.
//!
//! Roles live on the `profiles` row, not in the token. The first request of
//! a new identity provisions its profile with the default role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_db::models::profile::Profile;
use storefront_db::repositories::ProfileRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] whose profile carries the `admin` role. Anyone else is
/// turned away with 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match profile_for(state, &user).await? {
            profile if profile.is_admin() => Ok(RequireAdmin(user)),
            profile => {
                tracing::debug!(user_id = %user.user_id, role = ?profile.role, "Not an admin");
                Err(CoreError::Forbidden("Admin role required".into()).into())
            }
        }
    }
}

/// The caller's profile, provisioned on first sight.
pub async fn profile_for(state: &AppState, user: &AuthUser) -> Result<Profile, AppError> {
    ProfileRepo::find_or_provision(&state.pool, user.user_id)
        .await
        .map_err(AppError::from)
}
