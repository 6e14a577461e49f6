//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the session state and its rules (validation,
//! ordering, answer generation) so route handlers stay focused on form
//! decoding, cookies and redirects.

pub mod answer;
pub mod chat;
pub mod feedback;
pub mod ideas;
pub mod record;
pub mod reference;
pub mod session;
