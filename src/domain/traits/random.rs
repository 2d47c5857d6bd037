/// Source of uniform random choices, shared by concurrent handlers
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`; `upper` must be non-zero
    fn below(&self, upper: usize) -> usize;

    /// Pick one option uniformly
    fn pick<'a>(&self, options: &[&'a str]) -> &'a str {
        options[self.below(options.len())]
    }

    /// Roll a die with faces `1..=faces`
    fn roll(&self, faces: u64) -> u64 {
        let upper = usize::try_from(faces).unwrap_or(usize::MAX);
        self.below(upper) as u64 + 1
    }
}
