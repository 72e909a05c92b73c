//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the aggregation/feed logic and the outside
//! world. Adapters implement them against the FanPulse REST API and
//! WebSocket feed; the test kit implements them in memory.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐          ┌──────────────┐              ┌─────────────┐
//! │Directory │          │  Per-artist  │              │  Realtime   │
//! │ Adapter  │          │  resources   │              │    feed     │
//! └──────────┘          └──────────────┘              └─────────────┘
//! ```

pub mod outbound;
