//! Segmentation capability used to validate abbreviated pinyin.

/// Splits an unseparated pinyin string back into tokens.
///
/// Implementations must be deterministic for a given `(input, hint)` and free
/// of side effects. `hint` is the number of tokens the caller expects; a
/// segmenter may use it to choose between equally good readings.
pub trait Segmenter {
    fn segment(&self, input: &str, hint: usize) -> Vec<String>;

    /// Number of tokens recovered from `input`.
    fn count_tokens(&self, input: &str, hint: usize) -> usize {
        self.segment(input, hint).len()
    }
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn segment(&self, input: &str, hint: usize) -> Vec<String> {
        (**self).segment(input, hint)
    }

    fn count_tokens(&self, input: &str, hint: usize) -> usize {
        (**self).count_tokens(input, hint)
    }
}

impl<S: Segmenter + ?Sized> Segmenter for Box<S> {
    fn segment(&self, input: &str, hint: usize) -> Vec<String> {
        (**self).segment(input, hint)
    }

    fn count_tokens(&self, input: &str, hint: usize) -> usize {
        (**self).count_tokens(input, hint)
    }
}
