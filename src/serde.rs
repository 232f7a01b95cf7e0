//! De-/Serialization support.
//!
//! With the `serde` feature enabled, [`crate::api::BDAddr`] serializes as its colon separated
//! string form, and [`crate::api::AdapterDetails`] and [`crate::config::Config`] derive
//! `Serialize`/`Deserialize`.
