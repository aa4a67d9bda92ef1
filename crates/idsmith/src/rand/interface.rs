/// A source of randomness for the random ID and string generators.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// # Example
/// ```
/// use idsmith::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill_bytes(&self, dest: &mut [u8]) {
///         dest.fill(0xAB);
///     }
///
///     fn index(&self, _bound: usize) -> usize {
///         0
///     }
/// }
///
/// let mut buf = [0u8; 4];
/// FixedRand.fill_bytes(&mut buf);
/// assert_eq!(buf, [0xAB; 4]);
/// ```
pub trait RandSource {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);

    /// Returns a uniformly distributed index in `0..bound`.
    ///
    /// Callers guarantee `bound > 0`.
    fn index(&self, bound: usize) -> usize;
}
