//! Looping parallax bands
//!
//! Each band is two copies of the same layer stacked one layer-height
//! apart. Both scroll down every frame; a layer whose top edge falls below
//! the bottom of the screen jumps up by two layer-heights, back on top of
//! its twin.

use glam::Vec2;

use super::body::Body;

/// Elapsed time between ticks; the first tick after (re)start sees zero
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, 0 on the first call
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Debug)]
pub struct ParallaxBand {
    pub layers: [Body; 2],
    /// Downward speed (pixels/s)
    pub speed: f32,
}

impl ParallaxBand {
    /// `bottom` is the position of the lower layer; its twin sits one height above
    pub fn new(name: &str, bottom: Vec2, size: Vec2, anchor: Vec2, z: i32, speed: f32) -> Self {
        let layer = |pos: Vec2| {
            Body::new(name, size)
                .at(pos)
                .with_anchor(anchor)
                .with_z(z)
        };
        Self {
            layers: [layer(bottom), layer(bottom + Vec2::new(0.0, size.y))],
            speed,
        }
    }

    pub fn layer_height(&self) -> f32 {
        self.layers[0].size.y
    }

    /// Scroll both layers by `speed * dt`, recycling any that left the screen.
    /// Returns how many recycles happened; a long stall can need several.
    pub fn scroll(&mut self, dt: f32, view_bottom: f32) -> usize {
        let step = self.speed * dt;
        let mut recycled = 0;
        for layer in &mut self.layers {
            layer.pos.y -= step;
            if layer.size.y <= 0.0 {
                continue;
            }
            while layer.frame().max.y < view_bottom {
                layer.pos.y += layer.size.y * 2.0;
                recycled += 1;
            }
        }
        recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn band() -> ParallaxBand {
        ParallaxBand::new(
            "background",
            Vec2::ZERO,
            Vec2::new(375.0, 667.0),
            Vec2::ZERO,
            -1,
            250.0,
        )
    }

    #[test]
    fn test_frame_clock_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(10.0), 0.0);
        assert!((clock.delta(10.5) - 0.5).abs() < 1e-6);
        clock.reset();
        assert_eq!(clock.delta(42.0), 0.0);
    }

    #[test]
    fn test_layers_start_one_height_apart() {
        let b = band();
        assert_eq!(b.layers[1].pos.y - b.layers[0].pos.y, 667.0);
    }

    #[test]
    fn test_long_stall_recycles_back_on_screen() {
        let mut b = band();
        // 10 s at 250 px/s is several layer heights in one tick
        let recycled = b.scroll(10.0, 0.0);
        assert!(recycled > 2);
        for layer in &b.layers {
            assert!(layer.frame().max.y >= 0.0);
            assert!(layer.pos.y < 667.0);
        }
        let gap = (b.layers[1].pos.y - b.layers[0].pos.y).abs();
        assert!((gap - 667.0).abs() < 1e-2);
    }

    #[test]
    fn test_recycle_jumps_two_heights() {
        let mut b = band();
        // Bottom layer's top edge reaches y = -1
        let recycled = b.scroll(668.0 / 250.0, 0.0);
        assert_eq!(recycled, 1);
        assert!((b.layers[0].pos.y - (667.0 * 2.0 - 668.0)).abs() < 1e-3);
        assert!((b.layers[1].pos.y - (667.0 - 668.0)).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_layers_stay_one_height_apart(steps in proptest::collection::vec(0.0f32..0.1, 1..400)) {
            let mut b = band();
            let height = b.layer_height();
            for dt in steps {
                let before = [b.layers[0].pos.y, b.layers[1].pos.y];
                let recycled = b.scroll(dt, 0.0);
                prop_assert!(recycled <= 1);
                for (i, layer) in b.layers.iter().enumerate() {
                    let moved = layer.pos.y - before[i];
                    let expected = -b.speed * dt;
                    // Either a plain scroll or a scroll plus exactly one 2h jump
                    let plain = (moved - expected).abs() < 1e-2;
                    let jumped = (moved - expected - 2.0 * height).abs() < 1e-2;
                    prop_assert!(plain || jumped);
                }
                let gap = (b.layers[0].pos.y - b.layers[1].pos.y).abs();
                prop_assert!((gap - height).abs() < 0.5);
                // Every layer keeps overlapping the loop window
                for layer in &b.layers {
                    prop_assert!(layer.frame().max.y >= 0.0);
                }
            }
        }
    }
}
