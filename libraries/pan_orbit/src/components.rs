use bevy::prelude::*;

// The internal state of the pan-orbit controller
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct PanOrbitState {
    pub center: Vec3,
    pub radius: f32,
    pub upside_down: bool,
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for PanOrbitState {
    fn default() -> Self {
        PanOrbitState {
            center: Vec3::ZERO,
            radius: 1.0,
            upside_down: false,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl PanOrbitState {
    /// State of a camera placed at `eye` and looking at `center`.
    pub fn looking_from(center: Vec3, eye: Vec3) -> Self {
        let offset = eye - center;
        let direction = offset.normalize_or(Vec3::Z);
        Self {
            center,
            radius: offset.length(),
            upside_down: false,
            pitch: -direction.y.clamp(-1.0, 1.0).asin(),
            yaw: direction.x.atan2(direction.z),
        }
    }

    pub fn rotation(&self) -> Quat {
        // YXZ Euler Rotation performs yaw/pitch/roll.
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn eye(&self) -> Vec3 {
        self.center + self.rotation() * Vec3::Z * self.radius
    }
}

/// The configuration of the pan-orbit controller
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(PanOrbitState)]
pub struct PanOrbitCamera {
    /// World units per pixel of mouse motion
    pub pan_sensitivity: f32,
    /// Radians per pixel of mouse motion
    pub orbit_sensitivity: f32,
    /// Exponent per pixel of mouse motion
    pub zoom_sensitivity: f32,
    /// For devices with a notched scroll wheel, like desktop mice
    pub scroll_line_sensitivity: f32,
    /// For devices with smooth scrolling, like touchpads
    pub scroll_pixel_sensitivity: f32,
}

impl Default for PanOrbitCamera {
    fn default() -> Self {
        PanOrbitCamera {
            pan_sensitivity: 0.001,
            orbit_sensitivity: 0.2f32.to_radians(),
            zoom_sensitivity: 0.01,
            scroll_line_sensitivity: 16.0, // 1 "line" == 16 "pixels of motion"
            scroll_pixel_sensitivity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-3);
    }

    #[test]
    fn looking_from_reproduces_the_eye() {
        for (center, eye) in [
            (Vec3::ZERO, Vec3::new(0.0, 60.0, 160.0)),
            (Vec3::new(26.0, 0.0, 0.0), Vec3::new(26.0, 3.2, 6.4)),
            (Vec3::new(-10.0, 2.0, 5.0), Vec3::new(3.0, -4.0, -8.0)),
        ] {
            let state = PanOrbitState::looking_from(center, eye);
            assert_vec_eq(state.eye(), eye);
            assert_abs_diff_eq!(state.radius, center.distance(eye), epsilon = 1e-4);
        }
    }

    #[test]
    fn looking_from_faces_the_center() {
        let center = Vec3::new(45.0, 0.0, 0.0);
        let eye = Vec3::new(45.0, 8.0, 16.0);
        let state = PanOrbitState::looking_from(center, eye);
        let forward = state.rotation() * Vec3::NEG_Z;
        assert_vec_eq(forward, (center - eye).normalize());
    }

    #[test]
    fn default_view_has_no_yaw() {
        let state = PanOrbitState::looking_from(Vec3::ZERO, Vec3::new(0.0, 60.0, 160.0));
        assert_abs_diff_eq!(state.yaw, 0.0);
        assert!(state.pitch < 0.0);
    }
}
