//! In-memory session store: the sole owner and mutator of conversations.
//!
//! Each conversation sits behind its own async mutex inside a `DashMap`.
//! Map lookups clone the `Arc` out immediately so no `DashMap` guard is ever
//! held across an `.await`.
//!
//! Under [`LockPolicy::Global`] every create and every lookup-and-mutate also
//! takes one process-wide lock, and a [`SessionGuard`] keeps holding it until
//! dropped. A turn therefore blocks all other sessions for the full duration
//! of its generation call. Under [`LockPolicy::PerSession`] only turns on the
//! same session wait for each other.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use parley_types::chat::{Conversation, Message, SessionId};
use parley_types::config::LockPolicy;
use parley_types::error::ChatError;

use super::factory::ConversationFactory;

/// Exclusive access to one session's conversation.
///
/// Dereferences to the `Conversation`. Access ends when the guard is dropped.
pub struct SessionGuard {
    id: SessionId,
    // Field order matters: the session lock is released before the global one.
    conversation: OwnedMutexGuard<Conversation>,
    _global: Option<OwnedMutexGuard<()>>,
}

impl SessionGuard {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Deref for SessionGuard {
    type Target = Conversation;

    fn deref(&self) -> &Conversation {
        &self.conversation
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }
}

/// Mapping from session id to conversation.
pub struct SessionStore {
    sessions: DashMap<SessionId, Arc<Mutex<Conversation>>>,
    global: Arc<Mutex<()>>,
    policy: LockPolicy,
    factory: ConversationFactory,
}

impl SessionStore {
    pub fn new(factory: ConversationFactory, policy: LockPolicy) -> Self {
        if policy == LockPolicy::Global {
            warn!(
                "Global lock policy: one slow or hung generation call blocks every session"
            );
        }
        Self {
            sessions: DashMap::new(),
            global: Arc::new(Mutex::new(())),
            policy,
            factory,
        }
    }

    pub fn policy(&self) -> LockPolicy {
        self.policy
    }

    pub fn factory(&self) -> &ConversationFactory {
        &self.factory
    }

    async fn acquire_global(&self) -> Option<OwnedMutexGuard<()>> {
        match self.policy {
            LockPolicy::Global => Some(Arc::clone(&self.global).lock_owned().await),
            LockPolicy::PerSession => None,
        }
    }

    /// Create a session bootstrapped with `system_prompt` and return its id.
    ///
    /// Never hands out an id that is already live.
    pub async fn create_session(&self, system_prompt: &str) -> SessionId {
        let _global = self.acquire_global().await;
        let conversation = self.factory.create(system_prompt);

        loop {
            let id = SessionId::new();
            match self.sessions.entry(id) {
                Entry::Occupied(_) => {
                    warn!(session_id = %id, "Session id collision, drawing a new one");
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(Mutex::new(conversation)));
                    info!(session_id = %id, sessions = self.sessions.len(), "Session created");
                    return id;
                }
            }
        }
    }

    /// Take exclusive access to a session's conversation.
    ///
    /// Waits behind any turn already running on the same session (and, under
    /// the global policy, behind every other store operation).
    pub async fn lock_session(&self, id: &SessionId) -> Result<SessionGuard, ChatError> {
        let global = self.acquire_global().await;

        let slot = self
            .sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ChatError::SessionNotFound(id.to_string()))?;

        let conversation = slot.lock_owned().await;
        debug!(session_id = %id, "Session locked");

        Ok(SessionGuard {
            id: *id,
            conversation,
            _global: global,
        })
    }

    /// Run `f` with exclusive access to a session's conversation.
    pub async fn with_session<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut Conversation) -> R,
    ) -> Result<R, ChatError> {
        let mut guard = self.lock_session(id).await?;
        Ok(f(&mut guard))
    }

    /// Cloned copy of a session's history.
    pub async fn snapshot(&self, id: &SessionId) -> Result<Vec<Message>, ChatError> {
        self.with_session(id, |conversation| conversation.messages().to_vec())
            .await
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
