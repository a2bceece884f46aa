use crate::body::OrbitPivot;
use bevy::prelude::*;
use std::f32::consts;

pub struct OrbitLinesPlugin {
    pub draw_orbits: bool,
}

impl Default for OrbitLinesPlugin {
    fn default() -> Self {
        Self { draw_orbits: true }
    }
}

impl Plugin for OrbitLinesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DrawOrbits(self.draw_orbits)).add_systems(
            PostUpdate,
            draw_orbits
                .after(TransformSystem::TransformPropagate)
                .run_if(should_draw_orbits),
        );
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct DrawOrbits(pub bool);

fn should_draw_orbits(draw_orbits: Res<DrawOrbits>) -> bool {
    **draw_orbits
}

fn draw_orbits(mut g: Gizmos, q: Query<(&OrbitPivot, &GlobalTransform)>) {
    // Circles are drawn in the XY plane; orbits lie in XZ.
    let rotation = Quat::from_rotation_x(consts::FRAC_PI_2);
    for (pivot, transform) in &q {
        g.circle(
            Isometry3d::new(transform.translation(), rotation),
            pivot.radius,
            Color::srgba(1.0, 1.0, 1.0, 0.15),
        )
        .resolution(120);
    }
}
