//! # Events Module
//!
//! Progress reporting for the pairing pipeline.
//!
//! The core never prints. Workers push events into a crossbeam channel and
//! whoever holds the receiver (the CLI progress bar, a test) renders them.
//! The sender is cheap to clone and safe to share between rayon workers.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Compare(CompareEvent::Progress(p)) = event {
//!             println!("Compared {}/{}", p.comparisons_completed, p.total_comparisons);
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
