//! Size hints and size policies for layout negotiation.

use crate::paint::Size;

/// How a widget wants to be sized relative to its size hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SizePolicy {
    /// The widget always stays at its size hint.
    Fixed = 0,
    /// The size hint is the minimum; growing is allowed but pointless.
    Minimum = 1,
    /// The size hint is the maximum; the widget can only shrink.
    Maximum = 2,
    /// The size hint is preferred but the widget can grow and shrink.
    #[default]
    Preferred = 3,
    /// The widget actively wants as much space as possible.
    Expanding = 4,
}

impl SizePolicy {
    /// Whether the policy allows the widget to grow.
    #[inline]
    pub fn can_grow(self) -> bool {
        !matches!(self, Self::Fixed | Self::Maximum)
    }

    /// Whether the policy allows the widget to shrink.
    #[inline]
    pub fn can_shrink(self) -> bool {
        !matches!(self, Self::Fixed | Self::Minimum)
    }

    /// Whether the widget actively wants more space.
    #[inline]
    pub fn wants_to_grow(self) -> bool {
        matches!(self, Self::Expanding)
    }
}

/// Horizontal and vertical size policies with stretch factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicyPair {
    /// Horizontal size policy.
    pub horizontal: SizePolicy,
    /// Vertical size policy.
    pub vertical: SizePolicy,
    /// Horizontal stretch factor for proportional space distribution.
    pub horizontal_stretch: u8,
    /// Vertical stretch factor.
    pub vertical_stretch: u8,
}

impl Default for SizePolicyPair {
    fn default() -> Self {
        Self {
            horizontal: SizePolicy::Preferred,
            vertical: SizePolicy::Preferred,
            horizontal_stretch: 0,
            vertical_stretch: 0,
        }
    }
}

impl SizePolicyPair {
    /// Create a size policy pair with the specified policies.
    pub fn new(horizontal: SizePolicy, vertical: SizePolicy) -> Self {
        Self {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    /// The same policy for both dimensions.
    pub fn uniform(policy: SizePolicy) -> Self {
        Self::new(policy, policy)
    }

    /// A fixed size policy (widget cannot resize).
    pub fn fixed() -> Self {
        Self::uniform(SizePolicy::Fixed)
    }

    /// A preferred size policy (default).
    pub fn preferred() -> Self {
        Self::uniform(SizePolicy::Preferred)
    }

    /// An expanding size policy.
    pub fn expanding() -> Self {
        Self::uniform(SizePolicy::Expanding)
    }

    /// Set both stretch factors.
    pub fn with_stretch(mut self, horizontal: u8, vertical: u8) -> Self {
        self.horizontal_stretch = horizontal;
        self.vertical_stretch = vertical;
        self
    }
}

/// Preferred, minimum, and maximum sizes for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    /// The preferred size for the widget to display optimally.
    pub preferred: Size,
    /// The minimum acceptable size, if constrained.
    pub minimum: Option<Size>,
    /// The maximum size, if constrained.
    pub maximum: Option<Size>,
}

impl SizeHint {
    /// Create a size hint with the specified preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
            maximum: None,
        }
    }

    /// Create a size hint with explicit width and height.
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(Size::new(width, height))
    }

    /// Create a fixed size hint (preferred = minimum = maximum).
    pub fn fixed(size: Size) -> Self {
        Self {
            preferred: size,
            minimum: Some(size),
            maximum: Some(size),
        }
    }

    /// Set the minimum size.
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the maximum size.
    pub fn with_maximum(mut self, maximum: Size) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set minimum dimensions.
    pub fn with_minimum_dimensions(mut self, width: f32, height: f32) -> Self {
        self.minimum = Some(Size::new(width, height));
        self
    }

    /// The effective minimum size (zero if not set).
    pub fn effective_minimum(&self) -> Size {
        self.minimum.unwrap_or(Size::ZERO)
    }

    /// The effective maximum size (unbounded if not set).
    pub fn effective_maximum(&self) -> Size {
        self.maximum.unwrap_or(Size::new(f32::MAX, f32::MAX))
    }

    /// Clamp a size into the minimum/maximum bounds.
    pub fn constrain(&self, size: Size) -> Size {
        let min = self.effective_minimum();
        let max = self.effective_maximum();
        Size::new(
            size.width.clamp(min.width, max.width),
            size.height.clamp(min.height, max.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_policy_grow_shrink() {
        assert!(!SizePolicy::Fixed.can_grow());
        assert!(!SizePolicy::Fixed.can_shrink());
        assert!(SizePolicy::Preferred.can_grow());
        assert!(SizePolicy::Preferred.can_shrink());
        assert!(!SizePolicy::Maximum.can_grow());
        assert!(!SizePolicy::Minimum.can_shrink());
        assert!(SizePolicy::Expanding.wants_to_grow());
        assert!(!SizePolicy::Preferred.wants_to_grow());
    }

    #[test]
    fn test_size_policy_pair_default() {
        let policy = SizePolicyPair::default();
        assert_eq!(policy.horizontal, SizePolicy::Preferred);
        assert_eq!(policy.vertical, SizePolicy::Preferred);
        assert_eq!(policy.horizontal_stretch, 0);
    }

    #[test]
    fn test_size_hint_constrain() {
        let hint = SizeHint::new(Size::new(100.0, 100.0))
            .with_minimum(Size::new(50.0, 50.0))
            .with_maximum(Size::new(200.0, 200.0));

        assert_eq!(
            hint.constrain(Size::new(150.0, 150.0)),
            Size::new(150.0, 150.0)
        );
        assert_eq!(hint.constrain(Size::new(25.0, 25.0)), Size::new(50.0, 50.0));
        assert_eq!(
            hint.constrain(Size::new(300.0, 300.0)),
            Size::new(200.0, 200.0)
        );
    }

    #[test]
    fn test_size_hint_fixed() {
        let hint = SizeHint::fixed(Size::new(100.0, 50.0));
        assert_eq!(hint.minimum, Some(Size::new(100.0, 50.0)));
        assert_eq!(hint.maximum, Some(Size::new(100.0, 50.0)));
    }
}
