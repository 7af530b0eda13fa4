//! Sprite-vs-sprite collision tests.
//!
//! All three tests are symmetric: `a.is_x_collision(&b) == b.is_x_collision(&a)`.

use crate::sprite::Sprite;
use crate::types::util;

impl Sprite {
    /// Axis-aligned overlap of the two bounds.
    pub fn is_rect_collision(&self, other: &Sprite) -> bool {
        self.bound().intersects(&other.bound())
    }

    /// Center distance compared against the sum of both radii.
    pub fn is_circle_collision(&self, other: &Sprite) -> bool {
        let dx = (other.cx() as i64 - self.cx() as i64) as f64;
        let dy = (other.cy() as i64 - self.cy() as i64) as f64;
        let reach = (self.radius() + other.radius()) as f64;
        dx * dx + dy * dy < reach * reach
    }

    /// Exact test: some canvas pixel is opaque in both sprites.
    pub fn is_pixel_collision(&self, other: &Sprite) -> bool {
        let (a, b) = (self.bound(), other.bound());
        let Some(area) = a.intersection(&b) else {
            return false;
        };

        for py in area.y1..area.y2 {
            for px in area.x1..area.x2 {
                if self.texel(px - a.x1, py - a.y1).is_some()
                    && other.texel(px - b.x1, py - b.y1).is_some()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Squared distance between the two centers, or the rooted distance.
    pub fn distance_to(&self, other: &Sprite, root: bool) -> i32 {
        util::distance(self.cx(), self.cy(), other.cx(), other.cy(), root)
    }

    /// True if this sprite's center lies within the given circle.
    pub fn is_center_in_circle(&self, cx: i32, cy: i32, radius: i32) -> bool {
        util::is_point_in_circle(self.cx(), self.cy(), cx, cy, radius)
    }

    /// True if this sprite's center lies within the circle around `other`.
    pub fn is_center_in_sprite_circle(&self, other: &Sprite) -> bool {
        self.is_center_in_circle(other.cx(), other.cy(), other.radius() as i32)
    }
}
