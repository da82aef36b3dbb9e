const X_ROTATION_SPEED: cgmath::Rad<f32> = cgmath::Rad(-0.4);
const Y_ROTATION_SPEED: cgmath::Rad<f32> = cgmath::Rad(-0.7);

/// Rotation of the cube, advanced once per frame by the time since the
/// previous frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeAnimation {
    pub x_rotation: cgmath::Rad<f32>,
    pub y_rotation: cgmath::Rad<f32>,
}

impl Default for CubeAnimation {
    fn default() -> Self {
        Self {
            x_rotation: cgmath::Rad(0.0),
            y_rotation: cgmath::Rad(0.0),
        }
    }
}

impl CubeAnimation {
    pub fn advance(&mut self, delta_time: std::time::Duration) {
        let delta_time = delta_time.as_secs_f32();

        self.x_rotation += X_ROTATION_SPEED * delta_time;
        self.y_rotation += Y_ROTATION_SPEED * delta_time;
    }

    pub fn model_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_angle_x(self.x_rotation) * cgmath::Matrix4::from_angle_y(self.y_rotation)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cgmath::SquareMatrix;

    use super::*;

    #[test]
    fn starts_unrotated() {
        let animation = CubeAnimation::default();

        assert_eq!(animation.model_matrix(), cgmath::Matrix4::identity());
    }

    #[test]
    fn advances_by_elapsed_time() {
        let mut animation = CubeAnimation::default();

        animation.advance(Duration::from_millis(500));
        animation.advance(Duration::from_millis(1500));

        assert!((animation.x_rotation.0 - -0.8).abs() < 1e-5);
        assert!((animation.y_rotation.0 - -1.4).abs() < 1e-5);
    }

    #[test]
    fn zero_delta_keeps_rotation() {
        let mut animation = CubeAnimation::default();
        animation.advance(Duration::from_secs(1));
        let before = animation;

        animation.advance(Duration::ZERO);

        assert_eq!(animation, before);
    }
}
