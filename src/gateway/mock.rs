//! Scripted gateway doubles for testing the orchestrator in isolation.
//!
//! # Testing Strategy
//! The orchestrator's interesting behavior is its *policy* over gateway
//! outcomes, so tests need to dictate exactly which [`Remote`] outcome each
//! call observes. These doubles replay a queue of scripted outcomes and
//! count calls, so a test can also assert that a path made *no* remote call
//! at all. An unscripted call panics, which keeps expectation mismatches
//! loud in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::gateway::{CartGateway, IdentityGateway, Remote};

/// Identity gateway double replaying scripted outcomes.
#[derive(Debug, Default)]
pub struct ScriptedIdentityGateway {
    exists: Mutex<VecDeque<Remote<()>>>,
    users: Mutex<VecDeque<Remote<Value>>>,
    calls: AtomicUsize,
}

impl ScriptedIdentityGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next `check_exists` call.
    pub fn script_exists(&self, outcome: Remote<()>) -> &Self {
        self.exists.lock().unwrap().push_back(outcome);
        self
    }

    /// Queues the outcome of the next `user` call.
    pub fn script_user(&self, outcome: Remote<Value>) -> &Self {
        self.users.lock().unwrap().push_back(outcome);
        self
    }

    /// Total calls observed across both operations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Panics if any scripted outcome was never consumed.
    pub fn verify(&self) {
        let exists = self.exists.lock().unwrap().len();
        let users = self.users.lock().unwrap().len();
        assert_eq!(
            exists + users,
            0,
            "unconsumed identity gateway expectations: {exists} exists, {users} user"
        );
    }
}

#[async_trait]
impl IdentityGateway for ScriptedIdentityGateway {
    async fn check_exists(&self, user_id: u64) -> Remote<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.exists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected check_exists({user_id}) call"))
    }

    async fn user(&self, user_id: u64) -> Remote<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected user({user_id}) call"))
    }
}

/// Cart gateway double replaying scripted outcomes.
#[derive(Debug, Default)]
pub struct ScriptedCartGateway {
    user_carts: Mutex<VecDeque<Remote<Value>>>,
    carts: Mutex<VecDeque<Remote<Value>>>,
    calls: AtomicUsize,
}

impl ScriptedCartGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next `carts_for_user` call.
    pub fn script_user_carts(&self, outcome: Remote<Value>) -> &Self {
        self.user_carts.lock().unwrap().push_back(outcome);
        self
    }

    /// Queues the outcome of the next `cart` call.
    pub fn script_cart(&self, outcome: Remote<Value>) -> &Self {
        self.carts.lock().unwrap().push_back(outcome);
        self
    }

    /// Total calls observed across both operations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Panics if any scripted outcome was never consumed.
    pub fn verify(&self) {
        let user_carts = self.user_carts.lock().unwrap().len();
        let carts = self.carts.lock().unwrap().len();
        assert_eq!(
            user_carts + carts,
            0,
            "unconsumed cart gateway expectations: {user_carts} user-cart, {carts} cart"
        );
    }
}

#[async_trait]
impl CartGateway for ScriptedCartGateway {
    async fn carts_for_user(&self, user_id: u64) -> Remote<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_carts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected carts_for_user({user_id}) call"))
    }

    async fn cart(&self, cart_id: u64) -> Remote<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.carts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected cart({cart_id}) call"))
    }
}
