//! Kubed - cluster sign-on session helper.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── launch        # Launch a sign-on session for a cluster
//! │   ├── vault         # Capture a vault token from the clipboard
//! │   ├── reduce        # Reduce a raw inventory to a cluster map
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── constants     # Fixed platform constants and file names
//!     ├── inventory     # Raw cluster inventory parsing + reduction
//!     ├── cluster       # Reduced cluster map: load, discover, resolve
//!     ├── store         # .env credential store operations
//!     ├── clipboard     # Clipboard capability trait + platform impls
//!     ├── platform      # Host platform enum and interpreter dispatch
//!     └── session       # Session environment build + script launch
//! ```
//!
//! # Features
//!
//! - One-pass inventory reduction to an ordered per-cluster config map
//! - Clipboard-based vault token capture into a local `.env` store
//! - Session launch with an explicit, non-global environment overlay

pub mod cli;
pub mod core;
pub mod error;
