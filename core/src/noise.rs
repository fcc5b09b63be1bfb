//! Abbreviation noise for pinyin windows.
//!
//! Users of pinyin input methods often type only the initial of a syllable
//! ("zg" for "zhongguo"). A noisy copy of a window replaces tokens with their
//! abbreviation, but only if the abbreviated string still segments into as
//! many tokens as the window holds. Otherwise "t a m" (from "tian an men")
//! would be read back as "ta m" and the pinyin length would no longer match
//! the character target.

use phf::phf_set;
use rand::Rng;
use tracing::debug;

use crate::error::{check_probability, ConfigError};
use crate::segmenter::Segmenter;

/// Initials that abbreviate to two letters instead of one.
static ABBREVIATION_DIGRAPHS: phf::Set<&'static str> = phf_set! {
    "zh", "ch", "sh",
};

/// Abbreviated form of a pinyin token.
///
/// Alphabetic tokens map to their first two letters when those form one of
/// `zh`, `ch`, `sh`, and to their first letter otherwise. Anything else
/// (punctuation, markers) is returned unchanged.
///
/// ```rust
/// use datagen_core::abbreviate;
///
/// assert_eq!(abbreviate("zhong"), "zh");
/// assert_eq!(abbreviate("guo"), "g");
/// assert_eq!(abbreviate("shi"), "sh");
/// assert_eq!(abbreviate("，"), "，");
/// ```
pub fn abbreviate(token: &str) -> &str {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_alphabetic()) {
        return token;
    }
    if token.len() >= 2 && ABBREVIATION_DIGRAPHS.contains(&token[..2]) {
        &token[..2]
    } else {
        &token[..1]
    }
}

/// Generator of segmentation-preserving abbreviated copies.
#[derive(Debug, Clone, Copy)]
pub struct AbbreviationNoise {
    prob: f64,
}

impl AbbreviationNoise {
    /// `prob` is the chance each token is abbreviated; it must lie in `[0, 1]`.
    pub fn new(prob: f64) -> Result<Self, ConfigError> {
        check_probability("noise_token_probability", prob)?;
        Ok(Self { prob })
    }

    /// Produce an abbreviated copy of `pinyins`, or `None` when the copy
    /// would not segment back into `pinyins.len()` tokens.
    ///
    /// Each token is abbreviated independently with the configured
    /// probability. Both the noisy and the original concatenation are handed
    /// to `segmenter` with the token count as hint; the copy is accepted only
    /// when both come back with exactly that many tokens.
    pub fn generate<S, R>(&self, pinyins: &[String], segmenter: &S, rng: &mut R) -> Option<Vec<String>>
    where
        S: Segmenter + ?Sized,
        R: Rng + ?Sized,
    {
        if pinyins.is_empty() {
            return None;
        }

        let noisy: Vec<String> = pinyins
            .iter()
            .map(|token| {
                if rng.gen_bool(self.prob) {
                    abbreviate(token).to_string()
                } else {
                    token.clone()
                }
            })
            .collect();

        let expected = pinyins.len();
        let noisy_count = segmenter.count_tokens(&noisy.concat(), expected);
        let original_count = segmenter.count_tokens(&pinyins.concat(), expected);

        if noisy_count == original_count && noisy_count == expected {
            Some(noisy)
        } else {
            debug!(
                noisy = %noisy.join(" "),
                expected,
                noisy_count,
                original_count,
                "abbreviation rejected by segmentation check"
            );
            None
        }
    }
}
