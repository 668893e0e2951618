//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pocketnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("pocketnote_core ping={}", pocketnote_core::ping());
    println!("pocketnote_core version={}", pocketnote_core::core_version());
}
