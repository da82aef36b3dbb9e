use cgmath::EuclideanSpace;

pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0, 1.0,
);

/// A fixed perspective camera looking at the cube.
pub struct Camera {
    pub position: cgmath::Point3<f32>,
    pub target: cgmath::Point3<f32>,
    pub up: cgmath::Vector3<f32>,
    pub fovy: cgmath::Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: cgmath::Point3::new(0.0, 0.0, 2.0),
            target: cgmath::Point3::origin(),
            up: cgmath::Vector3::unit_y(),
            fovy: cgmath::Deg(60.0).into(),
            znear: 1.0,
            zfar: 2000.0,
        }
    }
}

impl Camera {
    pub fn create_projection_matrix(&self, aspect_ratio: f32) -> cgmath::Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, aspect_ratio, self.znear, self.zfar)
    }

    pub fn create_view_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn create_view_projection_matrix(&self, aspect_ratio: f32) -> cgmath::Matrix4<f32> {
        self.create_projection_matrix(aspect_ratio) * self.create_view_matrix()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeUniform {
    pub matrix: [[f32; 4]; 4],
}

impl CubeUniform {
    pub fn new(matrix: cgmath::Matrix4<f32>) -> Self {
        Self {
            matrix: matrix.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Transform};

    use super::*;

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let camera = Camera::default();
        let eye = camera.create_view_matrix().transform_point(camera.position);

        assert!(eye.to_vec().magnitude2() < 1e-10);
    }

    #[test]
    fn cube_center_projects_into_wgpu_depth_range() {
        let camera = Camera::default();
        let center = camera
            .create_view_projection_matrix(1.0)
            .transform_point(cgmath::Point3::origin());

        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);
        assert!(center.z > 0.0 && center.z < 1.0);
    }
}
