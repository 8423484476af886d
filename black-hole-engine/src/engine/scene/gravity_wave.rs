use bevy::prelude::*;
use constants::scene::{
    MAX_CONCURRENT_WAVES, WAVE_BASE_SCALE, WAVE_DURATION, WAVE_LAYER_DELAY, WAVE_LAYERS,
    WAVE_SCALE_SPAN,
};

use crate::engine::systems::scene_controls::GravityWaveEvent;

/// Start times of the waves currently expanding, one slot per group.
#[derive(Resource, Debug, Default)]
pub struct WavePool {
    slots: [Option<f32>; MAX_CONCURRENT_WAVES],
}

impl WavePool {
    /// Claim a free slot. Returns false when every group is busy.
    pub fn emit(&mut self, now: f32) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(now);
                true
            }
            None => false,
        }
    }

    /// Release groups whose waves have run their course.
    pub fn expire(&mut self, now: f32) {
        for slot in &mut self.slots {
            if slot.is_some_and(|start| now - start >= WAVE_DURATION) {
                *slot = None;
            }
        }
    }

    pub fn elapsed(&self, group: usize, now: f32) -> Option<f32> {
        self.slots.get(group).copied().flatten().map(|start| now - start)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingState {
    pub scale: f32,
    pub opacity: f32,
}

/// Scale and opacity of ring `layer` at `elapsed` seconds into its wave, or
/// `None` while the ring is hidden.
pub fn ring_state(elapsed: f32, layer: usize) -> Option<RingState> {
    if elapsed >= WAVE_DURATION {
        return None;
    }

    let delay = layer as f32 * WAVE_LAYER_DELAY;
    let progress = ((elapsed - delay) / (WAVE_DURATION - delay)).max(0.0);
    if progress <= 0.0 {
        return None;
    }

    let eased = 1.0 - (1.0 - progress).powi(3);
    Some(RingState {
        scale: WAVE_BASE_SCALE + eased * WAVE_SCALE_SPAN,
        opacity: (1.0 - progress) * (1.0 - layer as f32 / WAVE_LAYERS as f32 * 0.5),
    })
}

#[derive(Component, Debug, Clone, Copy)]
pub struct WaveRing {
    pub group: usize,
    pub layer: usize,
}

pub fn spawn_wave_rings(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    for layer in 0..WAVE_LAYERS {
        let mesh = meshes.add(Torus {
            minor_radius: 0.03 + layer as f32 * 0.01,
            major_radius: 1.0,
        });

        for group in 0..MAX_CONCURRENT_WAVES {
            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(0.6, 0.8, 1.0, 0.0),
                    emissive: LinearRgba::rgb(0.6, 0.9, 1.5),
                    alpha_mode: AlphaMode::Add,
                    unlit: true,
                    ..default()
                })),
                Transform::default(),
                Visibility::Hidden,
                WaveRing { group, layer },
            ));
        }
    }
}

pub fn update_gravity_waves(
    time: Res<Time>,
    mut pool: ResMut<WavePool>,
    mut wave_events: EventReader<GravityWaveEvent>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rings: Query<(
        &WaveRing,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let now = time.elapsed_secs();
    pool.expire(now);

    for event in wave_events.read() {
        if !pool.emit(now) {
            debug!("Gravity wave from {:?} dropped, all groups busy", event.source);
        }
    }

    for (ring, mut transform, mut visibility, material) in &mut rings {
        let state = pool
            .elapsed(ring.group, now)
            .and_then(|elapsed| ring_state(elapsed, ring.layer));

        let Some(state) = state else {
            *visibility = Visibility::Hidden;
            continue;
        };

        *visibility = Visibility::Visible;
        transform.scale = Vec3::new(state.scale, 1.0, state.scale);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(state.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_caps_concurrent_waves() {
        let mut pool = WavePool::default();
        for _ in 0..MAX_CONCURRENT_WAVES {
            assert!(pool.emit(0.0));
        }
        assert!(!pool.emit(0.1));
        pool.expire(WAVE_DURATION);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.emit(WAVE_DURATION));
    }

    #[test]
    fn rings_start_staggered_and_grow() {
        assert_eq!(ring_state(0.0, 0), None);
        assert_eq!(ring_state(0.05, 1), None);

        let early = ring_state(0.5, 0).unwrap();
        let late = ring_state(3.0, 0).unwrap();
        assert!(late.scale > early.scale);
        assert!(late.opacity < early.opacity);
        assert!(early.scale > WAVE_BASE_SCALE);
    }

    #[test]
    fn outer_layers_are_dimmer() {
        let inner = ring_state(1.0, 0).unwrap();
        let outer = ring_state(1.0, WAVE_LAYERS - 1).unwrap();
        assert!(outer.opacity < inner.opacity);
        assert_eq!(ring_state(WAVE_DURATION, 0), None);
    }
}
