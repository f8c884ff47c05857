pub mod editor;
pub mod keyboard;
pub mod layout;
pub mod message;
pub mod session;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
