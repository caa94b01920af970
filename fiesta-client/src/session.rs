//! Identity/session collaborators and explicit application context
//!
//! Session and profile state is passed around explicitly instead of
//! living in an ambient global. Mutation ownership is narrow: only the
//! auth flow writes the session, and only the profile-edit flow (plus
//! the first-sign-in hook) writes the profile.

use crate::error::ClientResult;
use crate::store::{DataStore, Filter};
use async_trait::async_trait;
use serde_json::json;
use shared::error::AppError;
use shared::models::{Profile, ProfileCreate, ProfileUpdate};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Opaque authenticated session from the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable user identifier
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
}

/// Identity/session provider (external collaborator, interface only)
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The currently active session, if any
    async fn current_session(&self) -> ClientResult<Option<Session>>;

    /// Send a one-time sign-in link to the given email
    async fn sign_in_with_otp(&self, email: &str) -> ClientResult<()>;

    /// Sign in via a third-party OAuth provider
    async fn sign_in_with_oauth(&self, provider: &str) -> ClientResult<Session>;

    async fn sign_out(&self) -> ClientResult<()>;
}

#[derive(Debug, Default)]
struct ContextState {
    session: Option<Session>,
    profile: Option<Profile>,
}

/// Shared application state handle
///
/// Cheap to clone; all services hold the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    inner: Arc<RwLock<ContextState>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session (auth flow only)
    pub async fn set_session(&self, session: Session) {
        let mut state = self.inner.write().await;
        state.session = Some(session);
    }

    /// Clear session and profile on sign-out or owner change
    pub async fn clear_session(&self) {
        let mut state = self.inner.write().await;
        state.session = None;
        state.profile = None;
    }

    pub async fn session(&self) -> Option<Session> {
        self.inner.read().await.session.clone()
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.inner.read().await.profile.clone()
    }

    /// Load the profile for the current session, creating it on first
    /// sign-in. The email is copied from the auth identity and never
    /// changes afterwards.
    pub async fn ensure_profile<S: DataStore>(&self, store: &S) -> ClientResult<Profile> {
        let session = self
            .session()
            .await
            .ok_or_else(AppError::not_authenticated)?;

        let rows = store
            .select(
                "profiles",
                Filter::new().eq("user_id", json!(session.user_id)).limit(1),
            )
            .await?;

        let profile: Profile = match rows.into_iter().next() {
            Some(row) => serde_json::from_value(row)?,
            None => {
                tracing::info!(user_id = %session.user_id, "creating profile on first sign-in");
                let create = ProfileCreate {
                    user_id: session.user_id,
                    name: String::new(),
                    email: session.email.clone(),
                };
                let row = store.insert("profiles", serde_json::to_value(&create)?).await?;
                serde_json::from_value(row)?
            }
        };

        let mut state = self.inner.write().await;
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Apply a profile edit (profile-edit flow only; email is immutable
    /// by construction, [`ProfileUpdate`] has no email field).
    pub async fn update_profile<S: DataStore>(
        &self,
        store: &S,
        update: ProfileUpdate,
    ) -> ClientResult<Profile> {
        let current = self
            .profile()
            .await
            .ok_or_else(|| AppError::new(shared::ErrorCode::ProfileNotFound))?;
        let id = current
            .id
            .ok_or_else(|| AppError::internal("profile row has no id"))?;

        let rows = store
            .update(
                "profiles",
                Filter::new().eq("id", json!(id)),
                serde_json::to_value(&update)?,
            )
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::new(shared::ErrorCode::ProfileNotFound))?;
        let profile: Profile = serde_json::from_value(row)?;

        let mut state = self.inner.write().await;
        state.profile = Some(profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            access_token: "token".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ensure_profile_requires_session() {
        let context = AppContext::new();
        let store = MemoryStore::new();
        let err = context.ensure_profile(&store).await.unwrap_err();
        assert_eq!(err.code(), shared::ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_ensure_profile_creates_on_first_sign_in() {
        let context = AppContext::new();
        let store = MemoryStore::new();
        context.set_session(session()).await;

        let profile = context.ensure_profile(&store).await.unwrap();
        assert_eq!(profile.email, "ana@example.com");
        assert!(profile.id.is_some());

        // Second call finds the stored row instead of inserting again.
        let again = context.ensure_profile(&store).await.unwrap();
        assert_eq!(again.id, profile.id);
        assert_eq!(
            store
                .count("profiles", Filter::new())
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_update_profile_keeps_email() {
        let context = AppContext::new();
        let store = MemoryStore::new();
        context.set_session(session()).await;
        context.ensure_profile(&store).await.unwrap();

        let updated = context
            .update_profile(
                &store,
                ProfileUpdate {
                    name: Some("Ana Reyes".to_string()),
                    contact_number: Some("0917 000 0000".to_string()),
                    address: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana Reyes");
        assert_eq!(updated.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_clear_session_drops_profile() {
        let context = AppContext::new();
        let store = MemoryStore::new();
        context.set_session(session()).await;
        context.ensure_profile(&store).await.unwrap();

        context.clear_session().await;
        assert!(context.session().await.is_none());
        assert!(context.profile().await.is_none());
    }
}
