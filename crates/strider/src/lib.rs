//! Umbrella crate that re-exports the `strider-*` building blocks.
//!
//! This crate is intended as a convenient entrypoint: depend on `strider` and
//! pick subsystems through features, or depend on the member crates directly.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use strider_core as core;

#[cfg(feature = "sense")]
#[cfg_attr(docsrs, doc(cfg(feature = "sense")))]
pub use strider_sense as sense;

#[cfg(feature = "traverse")]
#[cfg_attr(docsrs, doc(cfg(feature = "traverse")))]
pub use strider_traverse as traverse;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use strider_tools as tools;
