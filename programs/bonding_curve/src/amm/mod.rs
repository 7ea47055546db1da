//! # Automated Market Maker (AMM) Module
//!
//! Pricing for launched tokens uses a **constant-product bonding curve**
//! over virtual reserves:
//!
//! ```text
//!            virtual_base * virtual_token = k
//!
//!   ┌────────────────────────────────────────┐
//!   │  token ▲                               │
//!   │        │╲                              │
//!   │        │ ╲                             │
//!   │        │  ╲__        x * y = k         │
//!   │        │     ╲____                     │
//!   │        │          ╲__________          │
//!   │        └─────────────────────▶ SOL     │
//!   │                                        │
//!   │  Buying moves right (more SOL, fewer   │
//!   │  tokens); selling moves left.          │
//!   └────────────────────────────────────────┘
//! ```
//!
//! Virtual reserves are offset from the real ones by a fixed amount at launch
//! so the first buyer already sees a finite price.

pub mod constant_product;

pub use constant_product::*;
