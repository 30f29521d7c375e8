//! Per-rank scale, opacity and z-order, shared by both layout strategies.

use crate::geometry::Point;

use super::types::SlotPresentation;

/// Inputs that shape how presentation falls off with rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    /// Effective per-step scale factor (already floor-clamped).
    pub scale_factor: f32,
    /// Uniform multiplier for every non-clamped slot scale.
    pub slot_scale: f32,
    pub opacity_factor: f32,
    pub max_visible: usize,
    /// Nominal card height.
    pub card_height: f32,
    /// Height available in the current bounds.
    pub bounds_height: f32,
}

impl Falloff {
    /// Rank 0 shrinks to fit when the card is taller than the viewport;
    /// every other rank loses one `scale_factor` step per pair of ranks.
    pub fn scale(&self, rank: usize) -> f32 {
        if rank == 0 && self.card_height > self.bounds_height {
            if self.card_height <= 0.0 {
                return 1.0;
            }
            return (self.bounds_height / self.card_height).clamp(0.0, 1.0);
        }
        let steps = rank.div_ceil(2) as i32;
        self.scale_factor.max(0.0).powi(steps) * self.slot_scale
    }

    /// `None` when opacity falloff is disabled.
    pub fn opacity(&self, rank: usize) -> Option<f32> {
        if self.opacity_factor <= 0.0 {
            return None;
        }
        let level = rank.div_ceil(2) as f32;
        Some((1.0 - level * self.opacity_factor).clamp(0.0, 1.0))
    }

    /// Strictly decreasing with rank; rank 0 is topmost.
    pub fn z(&self, rank: usize) -> f32 {
        self.max_visible as f32 - rank as f32
    }

    pub fn present(&self, rank: usize, position: Point) -> SlotPresentation {
        SlotPresentation {
            rank,
            position,
            scale: self.scale(rank),
            opacity: self.opacity(rank),
            z: self.z(rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falloff() -> Falloff {
        Falloff {
            scale_factor: 0.95,
            slot_scale: 0.9,
            opacity_factor: 0.05,
            max_visible: 5,
            card_height: 300.0,
            bounds_height: 400.0,
        }
    }

    #[test]
    fn ranks_pair_up_by_distance() {
        let f = falloff();
        assert!((f.scale(0) - 0.9).abs() < 1e-6);
        assert_eq!(f.scale(1), f.scale(2));
        assert!((f.scale(3) - 0.95 * 0.95 * 0.9).abs() < 1e-6);
        assert_eq!(f.opacity(0), Some(1.0));
        assert_eq!(f.opacity(1), f.opacity(2));
    }

    #[test]
    fn focused_card_fits_short_viewport() {
        let f = Falloff {
            bounds_height: 150.0,
            ..falloff()
        };
        assert!((f.scale(0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn monotone_within_window() {
        let f = falloff();
        for rank in 1..f.max_visible {
            assert!(f.scale(rank - 1) >= f.scale(rank));
            assert!(f.opacity(rank - 1) >= f.opacity(rank));
            assert!(f.z(rank - 1) > f.z(rank));
        }
    }

    #[test]
    fn opacity_disabled_and_clamped() {
        let f = Falloff {
            opacity_factor: 0.0,
            ..falloff()
        };
        assert_eq!(f.opacity(3), None);

        let f = Falloff {
            opacity_factor: 0.6,
            ..falloff()
        };
        assert_eq!(f.opacity(4), Some(0.0));
    }
}
