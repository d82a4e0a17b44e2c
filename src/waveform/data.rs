//! Precomputed waveform magnitudes as delivered by the peaks backend.

use crate::error::InputError;

/// Per-step amplitude samples for one media file.
///
/// The backend serializes peaks with a trailing comma, which shows up as one
/// extra sample at the end. [`WaveformData::from_backend`] drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformData {
    samples: Vec<i32>,
}

impl WaveformData {
    /// Build from backend samples, stripping the trailing artifact.
    pub fn from_backend(mut samples: Vec<i32>) -> Result<Self, InputError> {
        if samples.pop().is_none() {
            return Err(InputError::EmptyWaveform);
        }
        Ok(Self { samples })
    }

    /// Parse a peaks document into raw backend samples.
    ///
    /// Tokens are separated by commas and/or whitespace. A trailing comma
    /// yields a final `0`, which is the artifact `from_backend` strips.
    pub fn parse_peaks(text: &str) -> Result<Vec<i32>, InputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyWaveform);
        }

        let tokens: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .collect();
        let last = tokens.len() - 1;

        let mut samples = Vec::with_capacity(tokens.len());
        for (position, token) in tokens.into_iter().enumerate() {
            if token.is_empty() {
                if position == last {
                    samples.push(0);
                }
                // "1, 2" splits into an empty token between the separators
                continue;
            }
            let value = token.parse::<i32>().map_err(|_| InputError::MalformedSample {
                position,
                token: token.to_string(),
            })?;
            samples.push(value);
        }
        Ok(samples)
    }

    /// Stored samples, artifact already removed.
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nearest sample for a position ratio in `[0, 1)`.
    ///
    /// No interpolation or averaging: cost stays independent of length.
    pub fn sample_at(&self, ratio: f64) -> Option<i32> {
        let index = (self.samples.len() as f64 * ratio).floor() as usize;
        self.samples
            .get(index.min(self.samples.len().saturating_sub(1)))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_artifact() {
        let data = WaveformData::from_backend(vec![10, -200, 3000, 0]).unwrap();
        assert_eq!(data.samples(), &[10, -200, 3000]);
    }

    #[test]
    fn single_sample_becomes_empty() {
        let data = WaveformData::from_backend(vec![0]).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.sample_at(0.0), None);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            WaveformData::from_backend(Vec::new()),
            Err(InputError::EmptyWaveform)
        );
    }

    #[test]
    fn nearest_sample_lookup() {
        let data = WaveformData::from_backend(vec![1, 2, 3, 4, 0]).unwrap();
        assert_eq!(data.sample_at(0.0), Some(1));
        assert_eq!(data.sample_at(0.49), Some(2));
        assert_eq!(data.sample_at(0.5), Some(3));
        assert_eq!(data.sample_at(0.99), Some(4));
        assert_eq!(data.sample_at(1.0), Some(4));
    }

    #[test]
    fn parses_backend_document_with_trailing_comma() {
        let raw = WaveformData::parse_peaks("120,-3400,8000,\n").unwrap();
        assert_eq!(raw, vec![120, -3400, 8000, 0]);
        let data = WaveformData::from_backend(raw).unwrap();
        assert_eq!(data.samples(), &[120, -3400, 8000]);
    }

    #[test]
    fn parses_mixed_separators() {
        let raw = WaveformData::parse_peaks("1, 2\n3\t4").unwrap();
        assert_eq!(raw, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reports_malformed_token() {
        let err = WaveformData::parse_peaks("1,two,3").unwrap_err();
        assert_eq!(
            err,
            InputError::MalformedSample {
                position: 1,
                token: "two".into()
            }
        );
    }

    #[test]
    fn blank_document_is_empty() {
        assert_eq!(
            WaveformData::parse_peaks("  \n"),
            Err(InputError::EmptyWaveform)
        );
    }
}
