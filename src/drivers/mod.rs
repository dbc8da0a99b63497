//! Hardware adapters for the nRF52840 build.
//!
//! Each driver implements one of the library's collaborator traits so the
//! receiver loop stays hardware-agnostic.

pub mod button;
pub mod flash;
pub mod tm1637;

pub use button::Button;
pub use flash::FlashStore;
pub use tm1637::Tm1637;
