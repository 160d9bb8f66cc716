//! Exhibitor and society onboarding wizards.
//!
//! The wizard in progress lives in the session; every POST applies the
//! posted step fields and one action, then redirects back to the GET page.

pub mod exhibitor;
pub mod helpers;
pub mod society;
