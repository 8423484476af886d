use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use constants::scene::{DISK_INNER_RADIUS, DISK_OUTER_RADIUS, DISK_SPIN_RATE, HORIZON_RADIUS};

use crate::engine::systems::scene_controls::SceneControls;

#[derive(Component)]
pub struct EventHorizon;

/// Flat accretion disk; `scaled_time` accumulates frame time × time scale.
#[derive(Component, Default)]
pub struct AccretionDisk {
    pub scaled_time: f32,
}

const DISK_EMISSIVE: LinearRgba = LinearRgba::rgb(4.0, 1.6, 0.4);

pub fn spawn_black_hole(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(HORIZON_RADIUS).mesh().uv(64, 64))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        EventHorizon,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Annulus::new(DISK_INNER_RADIUS, DISK_OUTER_RADIUS).mesh().resolution(128))),
        MeshMaterial3d(materials.add(disk_material(1.0))),
        disk_transform(0.0),
        AccretionDisk::default(),
    ));
}

/// Lit so the emissive term reaches the output; unlit materials drop it.
fn disk_material(intensity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb(1.0, 0.55, 0.2),
        emissive: disk_emissive(intensity),
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn disk_emissive(intensity: f32) -> LinearRgba {
    DISK_EMISSIVE * intensity
}

/// Disk lies in the XZ plane and spins about the world up axis.
pub fn disk_transform(scaled_time: f32) -> Transform {
    Transform::from_rotation(
        Quat::from_rotation_x(-FRAC_PI_2) * Quat::from_rotation_z(scaled_time * DISK_SPIN_RATE),
    )
}

pub fn animate_accretion_disk(
    time: Res<Time>,
    controls: Res<SceneControls>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut disk_query: Query<(
        &mut AccretionDisk,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (mut disk, mut transform, material) in &mut disk_query {
        disk.scaled_time += time.delta_secs() * controls.time_scale;
        *transform = disk_transform(disk.scaled_time);

        if controls.is_changed() {
            if let Some(material) = materials.get_mut(&material.0) {
                material.emissive = disk_emissive(controls.intensity);
            }
        }
    }
}
