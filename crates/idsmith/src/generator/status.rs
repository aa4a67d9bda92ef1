use crate::SnowflakeId;

/// The outcome of a non-blocking attempt to generate an ID.
///
/// - [`IdGenStatus::Ready`] carries a newly generated ID.
/// - [`IdGenStatus::Pending`] means all 4096 sequence values of the current
///   millisecond are spent; retry after `yield_for` milliseconds.
///
/// This lets callers plug in their own back-off instead of the busy-wait in
/// `next_id`.
///
/// # Example
///
/// ```
/// use idsmith::{BasicSnowflakeGenerator, IdGenStatus, Identity, SystemClock};
///
/// let generator = BasicSnowflakeGenerator::new(Identity::default(), SystemClock)?;
/// let id = loop {
///     match generator.try_poll_id()? {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert_eq!(id.worker_id(), 1);
/// # Ok::<(), idsmith::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// The sequence is exhausted for the current millisecond.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: u64,
    },
}
