use rand::Rng;

/// Uniform integer draws over a closed range.
///
/// Any `rand::Rng` qualifies, so a seeded `StdRng` gives reproducible runs.
/// Tests can plug in a scripted source instead.
pub trait ArrivalSource {
    /// Uniform draw from `low..=high`.
    fn draw(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng> ArrivalSource for R {
    fn draw(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..=high)
    }
}
