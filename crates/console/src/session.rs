//! Signed-in identity and role for the console.
//!
//! [`SessionContext`] publishes one [`AuthState`] at a time through a
//! `tokio::sync::watch` channel. Screens gate admin-only views on
//! [`AuthState::is_admin`] and show a spinner while [`AuthState::is_loading`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use storefront_core::types::UserId;
use storefront_db::models::profile::Role;
use tokio::sync::watch;

use crate::client::ApiClient;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
}

/// Where the role lookup for a signed-in user stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleState {
    Pending,
    /// `None` is a profile with no role at all.
    Resolved(Option<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Stored session not checked yet.
    Initializing,
    Anonymous,
    Authenticated { user: SessionUser, role: RoleState },
    /// The session or role could not be loaded. Any stored token is kept.
    Error(String),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            AuthState::Initializing
                | AuthState::Authenticated {
                    role: RoleState::Pending,
                    ..
                }
        )
    }

    pub fn is_ready(&self) -> bool {
        !self.is_loading()
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            AuthState::Authenticated {
                role: RoleState::Resolved(Some(Role::Admin)),
                ..
            }
        )
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            AuthState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }
}

/// Identity operations the session context needs from the outside world.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Email a one-time sign-in code. Success means the email went out.
    async fn request_code(&self, email: &str) -> Result<(), ClientError>;

    /// Exchange a code for a session and return its user.
    async fn verify_code(&self, email: &str, code: &str) -> Result<SessionUser, ClientError>;

    /// The user behind a stored session, or `None` when there is none.
    async fn restore(&self) -> Result<Option<SessionUser>, ClientError>;

    async fn fetch_role(&self) -> Result<Option<Role>, ClientError>;

    async fn sign_out(&self) -> Result<(), ClientError>;
}

pub struct SessionContext<B> {
    backend: B,
    state: watch::Sender<AuthState>,
}

impl<B: IdentityBackend> SessionContext<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(AuthState::Initializing);
        Self { backend, state }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receive every state change for as long as the context lives.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Check for a stored session and resolve its role.
    pub async fn initialize(&self) -> AuthState {
        self.publish(AuthState::Initializing);
        match self.backend.restore().await {
            Ok(None) => self.publish(AuthState::Anonymous),
            Ok(Some(user)) => self.resolve_role(user).await,
            Err(e) => {
                tracing::warn!(error = %e, "Could not restore session");
                self.publish(AuthState::Error(e.to_string()));
            }
        }
        self.current()
    }

    /// Ask for a sign-in code. The state does not change.
    pub async fn sign_in_with_otp(&self, email: &str) -> Result<(), ClientError> {
        self.backend.request_code(email).await
    }

    /// Complete sign-in with the emailed code, then resolve the role.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<(), ClientError> {
        let user = self.backend.verify_code(email, code).await?;
        tracing::info!(user_id = %user.id, "Console signed in");
        self.resolve_role(user).await;
        Ok(())
    }

    /// Drop the session. The state becomes anonymous even if the server
    /// could not be told.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let result = self.backend.sign_out().await;
        self.publish(AuthState::Anonymous);
        result
    }

    async fn resolve_role(&self, user: SessionUser) {
        self.publish(AuthState::Authenticated {
            user: user.clone(),
            role: RoleState::Pending,
        });
        match self.backend.fetch_role().await {
            Ok(role) => self.publish(AuthState::Authenticated {
                user,
                role: RoleState::Resolved(role),
            }),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Role lookup failed");
                self.publish(AuthState::Error(e.to_string()));
            }
        }
    }

    fn publish(&self, state: AuthState) {
        self.state.send_replace(state);
    }
}

// ---------------------------------------------------------------------------
// HTTP backend
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AuthTokens {
    access_token: String,
    user: SessionUser,
}

#[derive(Debug, Deserialize)]
struct SessionInfo {
    user: SessionUser,
    role: Option<Role>,
}

#[async_trait]
impl IdentityBackend for ApiClient {
    async fn request_code(&self, email: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self.post("/auth/otp", &json!({ "email": email })).await?;
        Ok(())
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<SessionUser, ClientError> {
        let tokens: AuthTokens = self
            .post("/auth/verify", &json!({ "email": email, "code": code }))
            .await?;
        self.set_token(Some(tokens.access_token)).await;
        Ok(tokens.user)
    }

    /// An expired or revoked stored token counts as no session.
    async fn restore(&self) -> Result<Option<SessionUser>, ClientError> {
        if !self.has_token().await {
            return Ok(None);
        }
        match self.get::<SessionInfo>("/auth/session").await {
            Ok(info) => Ok(Some(info.user)),
            Err(e) if e.is_unauthorized() => {
                self.set_token(None).await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_role(&self) -> Result<Option<Role>, ClientError> {
        let info: SessionInfo = self.get("/auth/session").await?;
        Ok(info.role)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let result = self.post_empty("/auth/logout").await;
        self.set_token(None).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use tokio::sync::oneshot;

    use super::*;

    fn owner() -> SessionUser {
        SessionUser {
            id: uuid::Uuid::nil(),
            email: "owner@shop.pk".into(),
        }
    }

    fn api_error(status: u16, message: &str) -> ClientError {
        ClientError::Api {
            status,
            code: "TEST".into(),
            message: message.into(),
        }
    }

    /// In-memory identity provider. `role` is what the role lookup returns;
    /// `role_gate` holds the lookup until the test releases it.
    #[derive(Default)]
    struct FakeIdentity {
        stored: Mutex<Option<SessionUser>>,
        role: Mutex<Option<Result<Option<Role>, String>>>,
        role_gate: Mutex<Option<oneshot::Receiver<()>>>,
        sent_codes: Mutex<Vec<String>>,
    }

    impl FakeIdentity {
        fn with_role(role: Option<Role>) -> Self {
            let fake = Self::default();
            *fake.role.lock().unwrap() = Some(Ok(role));
            fake
        }
    }

    #[async_trait]
    impl IdentityBackend for FakeIdentity {
        async fn request_code(&self, email: &str) -> Result<(), ClientError> {
            if !email.contains('@') {
                return Err(api_error(400, "A valid email address is required"));
            }
            self.sent_codes.lock().unwrap().push(email.to_string());
            Ok(())
        }

        async fn verify_code(&self, _email: &str, code: &str) -> Result<SessionUser, ClientError> {
            if code != "123456" {
                return Err(api_error(401, "Invalid or expired code"));
            }
            *self.stored.lock().unwrap() = Some(owner());
            Ok(owner())
        }

        async fn restore(&self) -> Result<Option<SessionUser>, ClientError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn fetch_role(&self) -> Result<Option<Role>, ClientError> {
            let gate = self.role_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match self.role.lock().unwrap().clone() {
                Some(Ok(role)) => Ok(role),
                Some(Err(message)) => Err(api_error(500, &message)),
                None => Ok(Some(Role::User)),
            }
        }

        async fn sign_out(&self) -> Result<(), ClientError> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn state_helpers() {
        assert!(AuthState::Initializing.is_loading());
        assert!(AuthState::Anonymous.is_ready());
        let pending = AuthState::Authenticated {
            user: owner(),
            role: RoleState::Pending,
        };
        assert!(pending.is_loading());
        assert!(!pending.is_admin());
        assert_eq!(pending.user(), Some(&owner()));

        let admin = AuthState::Authenticated {
            user: owner(),
            role: RoleState::Resolved(Some(Role::Admin)),
        };
        assert!(admin.is_ready());
        assert!(admin.is_admin());
        assert!(!AuthState::Error("boom".into()).is_loading());
    }

    #[tokio::test]
    async fn starts_initializing_then_anonymous_without_session() {
        let ctx = SessionContext::new(FakeIdentity::default());
        assert_eq!(ctx.current(), AuthState::Initializing);

        assert_eq!(ctx.initialize().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn stored_session_resolves_role() {
        let fake = FakeIdentity::with_role(Some(Role::Admin));
        *fake.stored.lock().unwrap() = Some(owner());
        let ctx = SessionContext::new(fake);

        let state = ctx.initialize().await;

        assert!(state.is_admin());
    }

    #[tokio::test]
    async fn sign_in_request_does_not_authenticate() {
        let ctx = SessionContext::new(FakeIdentity::default());
        ctx.initialize().await;

        ctx.sign_in_with_otp("owner@shop.pk").await.unwrap();

        assert_eq!(ctx.current(), AuthState::Anonymous);
        assert_eq!(ctx.backend().sent_codes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejected_email_surfaces_error() {
        let ctx = SessionContext::new(FakeIdentity::default());

        let err = ctx.sign_in_with_otp("nope").await.unwrap_err();

        assert_matches!(err, ClientError::Api { status: 400, .. });
    }

    #[tokio::test]
    async fn wrong_code_keeps_anonymous() {
        let ctx = SessionContext::new(FakeIdentity::default());
        ctx.initialize().await;

        assert!(ctx.verify_otp("owner@shop.pk", "000000").await.is_err());
        assert_eq!(ctx.current(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn role_is_pending_until_lookup_finishes() {
        let fake = FakeIdentity::with_role(Some(Role::User));
        let (release, gate) = oneshot::channel();
        *fake.role_gate.lock().unwrap() = Some(gate);
        let ctx = Arc::new(SessionContext::new(fake));
        let mut rx = ctx.subscribe();

        let task = tokio::spawn({
            let ctx = ctx.clone();
            async move { ctx.verify_otp("owner@shop.pk", "123456").await }
        });

        rx.wait_for(|s| {
            matches!(
                s,
                AuthState::Authenticated {
                    role: RoleState::Pending,
                    ..
                }
            )
        })
        .await
        .unwrap();
        assert!(ctx.current().is_loading());
        assert!(!ctx.current().is_admin());

        release.send(()).unwrap();
        task.await.unwrap().unwrap();

        assert_eq!(
            ctx.current(),
            AuthState::Authenticated {
                user: owner(),
                role: RoleState::Resolved(Some(Role::User)),
            }
        );
    }

    #[tokio::test]
    async fn null_role_is_not_admin() {
        let ctx = SessionContext::new(FakeIdentity::with_role(None));

        ctx.verify_otp("owner@shop.pk", "123456").await.unwrap();

        let state = ctx.current();
        assert!(state.is_ready());
        assert!(!state.is_admin());
        assert_matches!(
            state,
            AuthState::Authenticated {
                role: RoleState::Resolved(None),
                ..
            }
        );
    }

    #[tokio::test]
    async fn role_failure_moves_to_error_and_keeps_session() {
        let fake = FakeIdentity::default();
        *fake.role.lock().unwrap() = Some(Err("profiles unavailable".into()));
        let ctx = SessionContext::new(fake);

        ctx.verify_otp("owner@shop.pk", "123456").await.unwrap();

        assert_eq!(ctx.current(), AuthState::Error("profiles unavailable".into()));
        assert!(ctx.backend().stored.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn sign_out_notifies_subscribers() {
        let fake = FakeIdentity::with_role(Some(Role::Admin));
        *fake.stored.lock().unwrap() = Some(owner());
        let ctx = SessionContext::new(fake);
        let rx = ctx.subscribe();
        ctx.initialize().await;
        assert!(rx.borrow().is_admin());

        ctx.sign_out().await.unwrap();

        assert_eq!(*rx.borrow(), AuthState::Anonymous);
        assert!(ctx.backend().stored.lock().unwrap().is_none());
    }
}
