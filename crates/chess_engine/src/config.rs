use crate::error::EngineError;

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 6;  // Deeper searches take minutes with full board cloning
pub const DEFAULT_DEPTH: u8 = 3;

/// How the computer opponent searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched from the root, between [`MIN_DEPTH`] and [`MAX_DEPTH`].
    pub depth: u8,
    /// Score root moves on the rayon pool instead of one after another.
    pub parallel_root: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel_root: false,
        }
    }
}

impl EngineConfig {
    pub fn new(depth: u8) -> Result<Self, EngineError> {
        let config = Self { depth, ..Self::default() };
        config.validate()?;
        Ok(config)
    }

    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if (MIN_DEPTH..=MAX_DEPTH).contains(&self.depth) {
            Ok(())
        } else {
            Err(EngineError::InvalidDepth {
                depth: self.depth,
                min: MIN_DEPTH,
                max: MAX_DEPTH,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert_eq!(EngineConfig::default().depth, DEFAULT_DEPTH);
    }

    #[test]
    fn depth_outside_range_is_rejected() {
        assert!(matches!(EngineConfig::new(0), Err(EngineError::InvalidDepth { depth: 0, .. })));
        assert!(EngineConfig::new(MAX_DEPTH + 1).is_err());
        assert_eq!(EngineConfig::new(2).unwrap().with_parallel_root(true).depth, 2);
    }
}
