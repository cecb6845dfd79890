//! # Order Service
//!
//! An order-management service owning the Order + OrderItem aggregate,
//! with remote validation and enrichment against two sibling services: a
//! user registry and a shopping-cart store.
//!
//! ## Design Philosophy
//!
//! The interesting part of this service is not the CRUD — it is the
//! *policy over remote failure*:
//!
//! - **Fail-open validation**: creating an order checks the owning user
//!   against the identity registry. An explicit "no such user" answer is
//!   trusted and rejects the order; an unreachable registry does not, and
//!   the order proceeds unverified. Order intake must not inherit the
//!   registry's availability.
//! - **Fail-soft enrichment**: the composite order view pulls user and cart
//!   data live from both remote services. Each section degrades to a
//!   placeholder on its own; a gateway failure never fails the response.
//!
//! Both policies depend on one invariant: the gateways report "absent" and
//! "unreachable" as *distinct* outcomes (see [`gateway::Remote`]). Collapsing
//! them into a boolean would make the policies unimplementable.
//!
//! ## Module Tour
//!
//! - [`domain`] — the aggregate: [`Order`](domain::Order),
//!   [`OrderItem`](domain::OrderItem), and the pure line-total derivation
//!   [`compute_line_total`](domain::compute_line_total).
//! - [`store`] — the persistence collaborator: the
//!   [`OrderStore`](store::OrderStore) trait, filters and pagination, and
//!   the bundled [`MemoryOrderStore`](store::MemoryOrderStore).
//! - [`gateway`] — the remote collaborators: three-outcome
//!   [`Remote`](gateway::Remote) results, HTTP implementations built on
//!   `reqwest`, and scripted doubles for tests.
//! - [`service`] — the orchestration core:
//!   [`OrderService`](service::OrderService),
//!   [`OrderItemService`](service::OrderItemService), and the
//!   [`ServiceError`](service::ServiceError) taxonomy.
//! - [`runtime`] — composition root ([`OrderSystem`](runtime::OrderSystem))
//!   and tracing setup.
//! - [`config`] — explicit gateway configuration; no ambient globals.
//!
//! ## Quick Start
//!
//! ```no_run
//! use order_service::config::GatewayConfig;
//! use order_service::runtime::OrderSystem;
//!
//! # async fn demo() -> Result<(), order_service::service::ServiceError> {
//! let system = OrderSystem::new(GatewayConfig::from_env());
//!
//! let page = system.orders.orders(None, None, Default::default()).await?;
//! println!("{} orders", page.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Structured logging via `tracing`; see [`runtime::tracing`] for the
//! conventions and `RUST_LOG` examples.

pub mod config;
pub mod domain;
pub mod gateway;
pub mod runtime;
pub mod service;
pub mod store;
