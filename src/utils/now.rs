/// Returns the current timestamp in microseconds since the UNIX epoch.
///
/// Packages are stamped with this value when they are built or decoded.
/// A clock reading before the epoch yields `0`.
///
/// # Example:
/// ```rust
/// use prpc::utils::now;
/// let timestamp = now(); // Gets the current time in microseconds
/// assert!(timestamp > 0);
/// ```
pub fn now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_micros()).unwrap_or(0)
}
