use core::hash::{Hash as _, Hasher as _};
use std::collections::hash_map::DefaultHasher;

const MULTIPLIER: u64 = 397;

/// Order-sensitive rolling hash `h = (h * 397) ^ v` identifying the rule set
/// that produced a bundle.
///
/// Two elements with equal hashes share one bundle. Collisions are not
/// detected: a collision hands an element the wrong bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleSetHash(u64);

impl RuleSetHash {
    #[inline]
    pub fn fold(&mut self, value: u64) {
        self.0 = self.0.wrapping_mul(MULTIPLIER) ^ value;
    }

    pub fn fold_str(&mut self, value: &str) {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        self.fold(hasher.finish());
    }

    #[inline]
    pub fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_is_order_sensitive() {
        let mut forward = RuleSetHash::default();
        forward.fold(1);
        forward.fold(2);
        let mut backward = RuleSetHash::default();
        backward.fold(2);
        backward.fold(1);
        assert_eq!(forward.finish(), 397 ^ 2);
        assert_ne!(forward, backward);
    }

    #[test]
    fn equal_names_fold_equally() {
        let mut first = RuleSetHash::default();
        first.fold_str("Button");
        let mut second = RuleSetHash::default();
        second.fold_str("Button");
        let mut other = RuleSetHash::default();
        other.fold_str("Label");
        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
